//! Allow-listed attribute filters for document listing.
//!
//! Filter keys arrive as free text from callers. They are parsed into
//! [`FilterKey`], whose column names are compile-time constants, so no
//! caller-supplied text ever reaches query construction except as a bound
//! parameter.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;

use super::model::DocumentSummary;

/// A filterable document column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKey {
    Name,
    Mimetype,
    IsFile,
    IsPublic,
}

impl FilterKey {
    /// Qualified column the key maps to in the documents table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "d.name",
            Self::Mimetype => "d.mimetype",
            Self::IsFile => "d.is_file",
            Self::IsPublic => "d.is_public",
        }
    }

    fn is_flag(&self) -> bool {
        matches!(self, Self::IsFile | Self::IsPublic)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Mimetype => "mimetype",
            Self::IsFile => "is-file",
            Self::IsPublic => "is-public",
        };
        f.write_str(s)
    }
}

impl FromStr for FilterKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "mimetype" | "mime" => Ok(Self::Mimetype),
            "is-file" | "is_file" | "file" => Ok(Self::IsFile),
            "is-public" | "is_public" | "public" => Ok(Self::IsPublic),
            _ => Err(AppError::validation(format!(
                "Filter key '{}' is not allowed.",
                s.trim()
            ))),
        }
    }
}

/// Typed filter operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
}

/// A `key = value` predicate on a listed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeFilter {
    pub key: FilterKey,
    pub value: FilterValue,
}

impl AttributeFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Returns `Ok(None)` when no key was supplied; a key without a value,
    /// an unknown key, or a non-boolean value for a flag key is rejected.
    pub fn parse(key: Option<&str>, value: Option<&str>) -> AppResult<Option<Self>> {
        let Some(key) = key.filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };
        let key: FilterKey = key.parse()?;
        let raw = value
            .ok_or_else(|| AppError::validation(format!("Filter '{key}' requires a value.")))?;

        let value = if key.is_flag() {
            match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => FilterValue::Flag(true),
                "false" | "0" => FilterValue::Flag(false),
                _ => {
                    return Err(AppError::validation(format!(
                        "Filter '{key}' expects true or false."
                    )));
                }
            }
        } else {
            FilterValue::Text(raw.to_string())
        };

        Ok(Some(Self { key, value }))
    }

    /// Evaluate the predicate against a summary.
    pub fn matches(&self, doc: &DocumentSummary) -> bool {
        match (&self.key, &self.value) {
            (FilterKey::Name, FilterValue::Text(v)) => doc.filename == *v,
            (FilterKey::Mimetype, FilterValue::Text(v)) => doc.mimetype.as_deref() == Some(v),
            (FilterKey::IsFile, FilterValue::Flag(v)) => doc.is_file == *v,
            (FilterKey::IsPublic, FilterValue::Flag(v)) => doc.is_public == *v,
            _ => false,
        }
    }
}
