//! Record normalization.
//!
//! Turns raw text rows into records the aggregator can work with:
//! - numeric fields are coerced to `f64` (bad input reads as 0)
//! - country names are reconciled through a canonical alias table

pub mod alias;
pub mod numeric;

pub use alias::AliasTable;
pub use numeric::coerce_number;

use crate::parser::RawRecord;
use std::collections::HashMap;

/// A record with coerced numbers and canonical names
///
/// Text fields are the raw fields with name fields replaced by their
/// canonical form. Numeric fields hold the coerced values of the fields the
/// normalizer was configured with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    text: HashMap<String, String>,
    numbers: HashMap<String, f64>,
}

impl NormalizedRecord {
    /// Text of a field; blank or absent fields read as `None`
    pub fn text(&self, field: &str) -> Option<&str> {
        self.text
            .get(field)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Coerced value of a numeric field
    ///
    /// Fields that were not configured as numeric are coerced on the fly, so
    /// this never fails and never returns a non-finite value.
    pub fn number(&self, field: &str) -> f64 {
        match self.numbers.get(field) {
            Some(value) => *value,
            None => coerce_number(self.text.get(field).map(String::as_str)),
        }
    }
}

/// Configured record normalizer
///
/// # Example
/// ```ignore
/// let normalizer = Normalizer::new(AliasTable::with_defaults())
///     .with_name_field(COUNTRY_FIELD)
///     .with_numeric_field(REFUGEES_FIELD);
/// let record = normalizer.normalize(&raw);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
    numeric_fields: Vec<String>,
    name_fields: Vec<String>,
}

impl Normalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            numeric_fields: Vec::new(),
            name_fields: Vec::new(),
        }
    }

    pub fn with_numeric_field(mut self, field: impl Into<String>) -> Self {
        self.numeric_fields.push(field.into());
        self
    }

    pub fn with_name_field(mut self, field: impl Into<String>) -> Self {
        self.name_fields.push(field.into());
        self
    }

    /// Normalize a single record
    pub fn normalize(&self, record: &RawRecord) -> NormalizedRecord {
        let mut text: HashMap<String, String> = record
            .fields()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        if !self.aliases.is_empty() {
            for field in &self.name_fields {
                if let Some(value) = text.get_mut(field) {
                    let canonical = self.aliases.canonical(value.trim()).to_string();
                    if canonical != *value {
                        *value = canonical;
                    }
                }
            }
        }

        let numbers = self
            .numeric_fields
            .iter()
            .map(|field| (field.clone(), coerce_number(record.get(field))))
            .collect();

        NormalizedRecord { text, numbers }
    }

    /// Normalize a whole table
    pub fn normalize_all(&self, records: &[RawRecord]) -> Vec<NormalizedRecord> {
        records.iter().map(|r| self.normalize(r)).collect()
    }
}
