use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};

use super::error::RachunekError;
use super::types::BillingRecord;

/// Parse a YAML billing record from `reader`.
///
/// Records whose taxed amounts or total do not fit in a `Decimal` are
/// rejected here.
pub fn load_billing_record<R: Read>(reader: R) -> Result<BillingRecord, RachunekError> {
    let record: BillingRecord =
        serde_yaml::from_reader(reader).map_err(|e| RachunekError::Record(e.to_string()))?;
    record.check_amounts().map_err(RachunekError::Record)?;
    Ok(record)
}

impl BillingRecord {
    /// Read and parse a YAML billing record file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RachunekError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RachunekError::io(path, e))?;
        load_billing_record(file).map_err(|e| match e {
            RachunekError::Record(msg) => {
                RachunekError::Record(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

/// Serde adapter for dates written either as plain dates or as timestamps.
pub(crate) mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        date.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
