use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::issue::NewRecord;
use crate::patch::IssuePatch;
use crate::CoreError;

/// Client input rejected before any store access. `Display` is the exact
/// message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field(s) missing")]
    RequiredFieldsMissing,
    #[error("missing _id")]
    MissingId,
    #[error("no update field(s) sent")]
    NoUpdateFields,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewIssue {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub issue_title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub issue_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status_text: Option<String>,
}

impl NewIssue {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewRecord, ValidationError> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            present(self.issue_title),
            present(self.issue_text),
            present(self.created_by),
        ) else {
            return Err(ValidationError::RequiredFieldsMissing);
        };

        Ok(NewRecord {
            issue_title,
            issue_text,
            created_by,
            assigned_to: self.assigned_to.unwrap_or_default(),
            status_text: self.status_text.unwrap_or_default(),
            open: true,
            created_on: now,
            updated_on: now,
        })
    }
}

/// Body of an update request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssue {
    #[serde(default, rename = "_id", deserialize_with = "deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub issue_title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub issue_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub open: Option<bool>,
}

/// An update that passed validation. `id` is still raw text; whether it names
/// an issue is for the store to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub id: String,
    pub patch: IssuePatch,
}

impl UpdateIssue {
    pub fn validate(self) -> Result<ValidatedUpdate, ValidationError> {
        let id = present_id(self.id)?;
        let patch = IssuePatch {
            issue_title: present(self.issue_title),
            issue_text: present(self.issue_text),
            created_by: present(self.created_by),
            assigned_to: present(self.assigned_to),
            status_text: present(self.status_text),
            open: self.open,
        };
        if patch.is_empty() {
            return Err(ValidationError::NoUpdateFields);
        }
        Ok(ValidatedUpdate { id, patch })
    }
}

/// Body (or query) of a delete request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueRef {
    #[serde(default, rename = "_id", deserialize_with = "deserialize_text")]
    pub id: Option<String>,
}

impl IssueRef {
    pub fn validate(self) -> Result<String, ValidationError> {
        present_id(self.id)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present_id(value: Option<String>) -> Result<String, ValidationError> {
    present(value)
        .map(|id| id.trim().to_string())
        .ok_or(ValidationError::MissingId)
}

pub fn parse_flag(s: &str) -> Result<bool, CoreError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CoreError::InvalidBoolean(s.to_string())),
    }
}

/// Reads any scalar as text, so a numeric `_id` is just an id nothing matches.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Accepts a JSON boolean or the text forms posted by HTML forms.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = Option<bool>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or \"true\"/\"false\"")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if v.trim().is_empty() {
                return Ok(None);
            }
            parse_flag(v).map(Some).map_err(E::custom)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(FlagVisitor)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
