//! Address: a delivery location owned by exactly one user.
//!
//! A user owns any number of addresses, and once they own at least one,
//! exactly one of them is flagged default. The flag bookkeeping lives in the
//! application layer and the store; this module owns the record, the request
//! shape and its validation.

mod view;

pub use view::{AddressView, format_address};

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EstoreError, ValidationError};
use crate::id::{AddressId, LocalityId, UserId};
use crate::Timestamp;

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("static regex should not panic"));

/// Kind of place an address points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

impl AddressType {
    /// Upper-case name used on the wire and in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Work => "WORK",
            Self::Other => "OTHER",
        }
    }

    /// Inverse of [`AddressType::as_str`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HOME" => Some(Self::Home),
            "WORK" => Some(Self::Work),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A stored delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub locality_id: LocalityId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub address_type: AddressType,
    pub is_default: bool,
    pub created_at: Timestamp,
}

impl Address {
    /// Materialise a new address for `user_id` from a validated request.
    ///
    /// `is_default` is decided by the caller, not taken from the draft: the
    /// first address of a user is default whatever the request says.
    #[must_use]
    pub fn from_draft(user_id: UserId, draft: ValidatedDraft, is_default: bool) -> Self {
        Self {
            id: AddressId::new(),
            user_id,
            locality_id: draft.locality_id,
            address_line1: draft.address_line1,
            address_line2: draft.address_line2,
            landmark: draft.landmark,
            contact_name: draft.contact_name,
            contact_phone: draft.contact_phone,
            address_type: draft.address_type,
            is_default,
            created_at: chrono::Utc::now(),
        }
    }

    /// Overwrite every mutable field, the default flag included.
    ///
    /// Owner, id and creation time never change.
    pub fn apply(&mut self, draft: ValidatedDraft) {
        self.locality_id = draft.locality_id;
        self.address_line1 = draft.address_line1;
        self.address_line2 = draft.address_line2;
        self.landmark = draft.landmark;
        self.contact_name = draft.contact_name;
        self.contact_phone = draft.contact_phone;
        self.address_type = draft.address_type;
        self.is_default = draft.is_default;
    }
}

/// Create/update request for an address, as received from a caller.
///
/// Every field defaults so that missing input surfaces as a
/// [`ValidationError`] from [`AddressDraft::validate`] rather than as a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressDraft {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub locality_id: Option<LocalityId>,
    pub is_default: bool,
    pub contact_name: String,
    pub contact_phone: String,
    pub address_type: Option<AddressType>,
}

/// An [`AddressDraft`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub locality_id: LocalityId,
    pub is_default: bool,
    pub contact_name: String,
    pub contact_phone: String,
    pub address_type: AddressType,
}

impl AddressDraft {
    /// Check field-level rules and normalise the request.
    ///
    /// Required text is trimmed; blank optional text becomes `None`. The
    /// contact phone is matched as sent, surrounding whitespace included.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] when a required field is blank or
    /// missing, or when the contact phone is not a 10-digit mobile number
    /// starting with 6–9.
    pub fn validate(self) -> Result<ValidatedDraft, EstoreError> {
        let address_line1 = required(self.address_line1, "address_line1")?;
        let locality_id = self
            .locality_id
            .ok_or(ValidationError::MissingField("locality_id"))?;
        let contact_name = required(self.contact_name, "contact_name")?;
        if self.contact_phone.trim().is_empty() {
            return Err(ValidationError::EmptyField("contact_phone").into());
        }
        if !MOBILE_NUMBER.is_match(&self.contact_phone) {
            return Err(ValidationError::InvalidPhone.into());
        }
        let contact_phone = self.contact_phone;
        let address_type = self
            .address_type
            .ok_or(ValidationError::MissingField("address_type"))?;

        Ok(ValidatedDraft {
            address_line1,
            address_line2: optional(self.address_line2),
            landmark: optional(self.landmark),
            locality_id,
            is_default: self.is_default,
            contact_name,
            contact_phone,
            address_type,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
