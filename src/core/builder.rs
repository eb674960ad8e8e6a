use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::RachunekError;
use super::money::TaxRate;
use super::types::*;

/// Builder for billing records constructed in code rather than loaded from YAML.
///
/// ```
/// use chrono::NaiveDate;
/// use rachunek::core::*;
/// use rust_decimal_macros::dec;
///
/// let record = BillingRecordBuilder::new("01/11/2020", NaiveDate::from_ymd_opt(2020, 11, 1).unwrap())
///     .currency("PLN")
///     .seller(PartyBuilder::new("John Snow Co.").city("Winterfell").build())
///     .buyer(PartyBuilder::new("Lannister Ltd.").city("Casterly Rock").build())
///     .add_item(LineItemBuilder::new("Tech support", dec!(5000)).tax(dec!(0.23)).build())
///     .payment(PaymentInfo::new("PL 61 1090 1014", NaiveDate::from_ymd_opt(2020, 11, 15).unwrap()))
///     .build()
///     .unwrap();
///
/// assert_eq!(record.total(), Some(dec!(6150)));
/// ```
pub struct BillingRecordBuilder {
    number: String,
    date: NaiveDate,
    currency: String,
    no_tax: bool,
    company: Option<Party>,
    bill_to: Option<Party>,
    items: Vec<LineItem>,
    payment: Option<PaymentInfo>,
}

impl BillingRecordBuilder {
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
            currency: "EUR".to_string(),
            no_tax: false,
            company: None,
            bill_to: None,
            items: Vec::new(),
            payment: None,
        }
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    /// Hide the tax column on the rendered invoice.
    pub fn no_tax(mut self, no_tax: bool) -> Self {
        self.no_tax = no_tax;
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.company = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.bill_to = Some(party);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn payment(mut self, payment: PaymentInfo) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn build(self) -> Result<BillingRecord, RachunekError> {
        let company = self
            .company
            .ok_or_else(|| RachunekError::Builder("seller is required".into()))?;
        let bill_to = self
            .bill_to
            .ok_or_else(|| RachunekError::Builder("buyer is required".into()))?;
        let payment = self
            .payment
            .ok_or_else(|| RachunekError::Builder("payment info is required".into()))?;

        let record = BillingRecord {
            number: self.number,
            date: self.date,
            company,
            bill_to,
            currency: self.currency,
            no_tax: self.no_tax,
            items: self.items,
            payment,
        };
        record.check_amounts().map_err(RachunekError::Builder)?;
        Ok(record)
    }
}

/// Builder for Party (seller/buyer).
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party {
                name: name.into(),
                ..Party::default()
            },
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.party.address = address.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.party.city = city.into();
        self
    }

    pub fn postal_code(mut self, code: impl Into<String>) -> Self {
        self.party.postal_code = code.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.party.country = country.into();
        self
    }

    pub fn vat_number(mut self, number: impl Into<String>) -> Self {
        self.party.vat_number = number.into();
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for LineItem. Tax defaults to zero.
pub struct LineItemBuilder {
    name: String,
    name_lang: BTreeMap<String, String>,
    amount: Decimal,
    tax: TaxRate,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            name_lang: BTreeMap::new(),
            amount,
            tax: TaxRate::ZERO,
        }
    }

    /// Fractional tax rate, e.g. `dec!(0.23)`.
    pub fn tax(mut self, rate: Decimal) -> Self {
        self.tax = TaxRate::new(rate);
        self
    }

    pub fn localized(mut self, language: impl Into<LanguageTag>, name: impl Into<String>) -> Self {
        let language: LanguageTag = language.into();
        self.name_lang.insert(language.into(), name.into());
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            name: self.name,
            name_lang: self.name_lang,
            amount: self.amount,
            tax: self.tax,
        }
    }
}
