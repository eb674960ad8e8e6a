//! # rachunek
//!
//! Invoice composition engine: turns a billing record into a localized,
//! paginated invoice.
//!
//! The pipeline is a pure function of its inputs. A [`BillingRecord`] and a
//! [`LanguageTag`] go into [`compose::InvoiceComposer`], which resolves every
//! label through a [`TranslationSource`](i18n::TranslationSource), expands
//! the header, party and payment templates, applies per-item tax and emits
//! an ordered list of [`compose::LayoutBlock`]s. Any
//! [`DocumentSink`](compose::DocumentSink) can consume those blocks; the
//! `pdf` feature ships one built on `lopdf`.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rachunek::compose::{LayoutBlock, compose};
//! use rachunek::core::*;
//! use rachunek::i18n::Catalog;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2020, 11, 1).unwrap();
//! let record = BillingRecordBuilder::new("01/11/2020", date)
//!     .currency("PLN")
//!     .seller(PartyBuilder::new("John Snow Co.").city("Winterfell").build())
//!     .buyer(PartyBuilder::new("Lannister Ltd.").city("Casterly Rock").build())
//!     .add_item(LineItemBuilder::new("Consulting", dec!(35000)).tax(dec!(0.23)).build())
//!     .add_item(LineItemBuilder::new("Support", dec!(5000)).localized("pl", "Wsparcie").build())
//!     .payment(PaymentInfo::new("PL 61 1090 1014", date))
//!     .build()
//!     .unwrap();
//!
//! let blocks = compose(&record, &Catalog::builtin(), &"pl".into());
//! let LayoutBlock::Table(table) = &blocks[5] else { unreachable!() };
//! assert_eq!(table.rows[1], ["Wsparcie", "0%", "5000.00 PLN"]);
//! assert_eq!(table.rows[2], ["RAZEM", "", "48050.00 PLN"]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, translation catalogs, templates, composer |
//! | `pdf` (default) | `lopdf` document sink and `generate` |
//! | `cli` | The `rachunek` command-line binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod i18n;

#[cfg(feature = "core")]
pub mod template;

#[cfg(feature = "core")]
pub mod compose;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
