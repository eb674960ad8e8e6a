//! Text templates for the compound invoice blocks.
//!
//! The three block templates are fixed; records only supply the values.

mod expander;
mod text;

use serde::Serialize;

use crate::core::{BillingRecord, PaymentInfo};

pub use expander::TemplateExpander;
pub use text::{DATE_FORMAT, format_date, title_case};

/// Issue date and invoice number.
pub const HEADER_TEMPLATE: &str = concat!(
    "{{title (t \"date\")}}: {{date}}\n",
    "{{title (t \"invoiceNumber\")}}: {{number}}",
);

/// Postal and tax identity of a [`Party`](crate::core::Party).
pub const PARTY_TEMPLATE: &str = concat!(
    "{{name}}\n",
    "{{address}}\n",
    "{{zip_code}} {{city}}\n",
    "{{country}}\n",
    "{{title (t \"vatNumber\")}}: {{vat_number}}",
);

/// Bank transfer instructions.
pub const PAYMENT_TEMPLATE: &str = concat!(
    "{{title (t \"bankTransfer\")}}\n",
    "{{title (t \"accountNumber\")}}: {{account_number}}\n",
    "{{title (t \"dueDate\")}}: {{due_date}}",
);

/// Values available to [`HEADER_TEMPLATE`].
#[derive(Debug, Serialize)]
pub struct HeaderFields<'r> {
    pub date: String,
    pub number: &'r str,
}

impl<'r> HeaderFields<'r> {
    pub fn new(record: &'r BillingRecord) -> Self {
        Self {
            date: format_date(record.date),
            number: &record.number,
        }
    }
}

/// Values available to [`PAYMENT_TEMPLATE`].
#[derive(Debug, Serialize)]
pub struct PaymentFields<'r> {
    pub account_number: &'r str,
    pub due_date: String,
}

impl<'r> PaymentFields<'r> {
    pub fn new(payment: &'r PaymentInfo) -> Self {
        Self {
            account_number: &payment.account_number,
            due_date: format_date(payment.due_date),
        }
    }
}
