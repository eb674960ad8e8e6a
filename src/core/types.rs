use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::loader::flexible_date;
use super::money::{CurrencyAmount, TaxRate};

/// Everything needed to issue one invoice.
///
/// Created once per invocation (by [`load_billing_record`](super::load_billing_record)
/// or [`BillingRecordBuilder`](super::BillingRecordBuilder)) and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Invoice number as printed on the document.
    pub number: String,
    /// Issue date.
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    /// Seller.
    pub company: Party,
    /// Buyer.
    pub bill_to: Party,
    /// Currency code appended to every amount (e.g. "PLN"). Not validated.
    pub currency: String,
    /// Hide the tax column. Tax is still applied to every amount.
    #[serde(default)]
    pub no_tax: bool,
    /// Line items in document order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Payment instructions.
    pub payment: PaymentInfo,
}

impl BillingRecord {
    /// Sum of all item amounts after tax, at full precision. `None` when an
    /// item or the sum does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.final_amount()?))
    }

    /// Check that every taxed amount, every tax percentage and the total are
    /// representable, so composing the record never overflows.
    pub(crate) fn check_amounts(&self) -> Result<(), String> {
        for (i, item) in self.items.iter().enumerate() {
            if item.final_amount().is_none() {
                return Err(format!(
                    "item {} `{}`: amount {} with tax rate {} is out of range",
                    i + 1,
                    item.name,
                    item.amount,
                    item.tax.value()
                ));
            }
            if item.tax.percent().is_none() {
                return Err(format!(
                    "item {} `{}`: tax rate {} is out of range",
                    i + 1,
                    item.name,
                    item.tax.value()
                ));
            }
        }
        if self.total().is_none() {
            return Err("total of all items is out of range".to_string());
        }
        Ok(())
    }

    /// Pair `amount` with this record's currency.
    pub fn amount(&self, amount: Decimal) -> CurrencyAmount {
        CurrencyAmount::new(amount, self.currency.clone())
    }
}

/// Seller or buyer.
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: String,
    /// Street and house number.
    pub address: String,
    pub city: String,
    #[serde(rename = "zip_code", alias = "postal_code")]
    pub postal_code: String,
    pub country: String,
    /// Tax registration number.
    pub vat_number: String,
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Base name, used when no localized name matches.
    pub name: String,
    /// Localized names keyed by language tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub name_lang: BTreeMap<String, String>,
    /// Net amount for the line.
    pub amount: Decimal,
    #[serde(default)]
    pub tax: TaxRate,
}

impl LineItem {
    /// Name in `language`, or the base name when no non-empty translation exists.
    pub fn localized_name(&self, language: &LanguageTag) -> &str {
        self.name_lang
            .iter()
            .find(|(tag, name)| !name.is_empty() && LanguageTag::new(tag.as_str()) == *language)
            .map(|(_, name)| name.as_str())
            .unwrap_or(self.name.as_str())
    }

    /// Amount after applying the line's tax rate, or `None` on overflow.
    pub fn final_amount(&self) -> Option<Decimal> {
        self.tax.apply(self.amount)
    }
}

/// Bank transfer details printed at the bottom of the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub account_number: String,
    #[serde(with = "flexible_date")]
    pub due_date: NaiveDate,
}

impl PaymentInfo {
    pub fn new(account_number: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            account_number: account_number.into(),
            due_date,
        }
    }
}

/// Language selector for catalog lookups and localized item names.
///
/// Opaque apart from normalization: surrounding whitespace is trimmed and
/// ASCII letters are lower-cased, so `"PL"` and `"pl"` select the same catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
