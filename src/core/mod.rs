//! Billing record types, tax and currency values, loading, and diagnostics.
//!
//! Everything in this module is plain data: records are built once per
//! invocation and never mutated by the composer.

mod builder;
mod diagnostics;
mod error;
mod loader;
mod money;
mod types;

pub use builder::*;
pub use diagnostics::*;
pub use error::*;
pub use loader::{load_billing_record, parse_date};
pub use money::*;
pub use types::*;
