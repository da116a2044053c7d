//! Contact request models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, WhiseError};

/// Contact payload for the create and upsert endpoints.
///
/// Only the fields the API requires (or that upsert matches on) are typed;
/// everything else goes through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_email: Option<String>,
    pub country_id: u64,
    pub language_id: String,
    pub office_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_criteria: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        country_id: u64,
        language_id: impl Into<String>,
        office_ids: Vec<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            country_id,
            language_id: language_id.into(),
            office_ids,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn with_private_email(mut self, email: impl Into<String>) -> Self {
        self.private_email = Some(email.into());
        self
    }

    /// Attach an arbitrary API field not modelled here.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fields required by `/v1/contacts/create`.
    ///
    /// # Errors
    /// `WhiseError::Configuration` naming the first missing field.
    pub fn validate_for_create(&self) -> Result<()> {
        require(!self.name.trim().is_empty(), "Contact name is required")?;
        require(self.country_id != 0, "Country ID is required")?;
        require(!self.language_id.trim().is_empty(), "Language ID is required")?;
        require(!self.office_ids.is_empty(), "At least one Office ID is required")
    }

    /// Fields required by `/v1/contacts/upsert`, which matches on email.
    ///
    /// # Errors
    /// `WhiseError::Configuration` naming the first missing field.
    pub fn validate_for_upsert(&self) -> Result<()> {
        require(!self.name.trim().is_empty(), "Contact name is required")?;
        require(
            self.private_email.as_deref().is_some_and(|e| !e.trim().is_empty()),
            "Contact email is required",
        )?;
        require(self.country_id != 0, "Country ID is required")?;
        require(!self.language_id.trim().is_empty(), "Language ID is required")?;
        require(!self.office_ids.is_empty(), "At least one Office ID is required")
    }
}

fn require(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(WhiseError::Configuration(message.to_string()))
    }
}
