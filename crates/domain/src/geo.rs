//! Geography: the state → city → locality hierarchy addresses point into.
//!
//! Records reference their parent by id only; [`LocalityPath`] is the
//! resolved chain handed out by the locality repository when an address has
//! to be displayed.

use serde::{Deserialize, Serialize};

use crate::error::{EstoreError, ValidationError};
use crate::id::{CityId, LocalityId, StateId};

/// A state or union territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    /// Two-letter code, upper-case (`KA`, `MH`, …).
    pub code: String,
}

impl State {
    /// Build a new state with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if the name is blank or the code is
    /// not two ASCII letters.
    pub fn new(name: &str, code: &str) -> Result<Self, EstoreError> {
        let state = Self {
            id: StateId::new(),
            name: name.trim().to_string(),
            code: code.trim().to_ascii_uppercase(),
        };
        state.validate()?;
        Ok(state)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// See [`State::new`].
    pub fn validate(&self) -> Result<(), EstoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.code.len() != 2 || !self.code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidStateCode.into());
        }
        Ok(())
    }
}

/// A city inside a [`State`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state_id: StateId,
}

impl City {
    /// Build a new city with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if the name is blank.
    pub fn new(name: &str, state_id: StateId) -> Result<Self, EstoreError> {
        let city = Self {
            id: CityId::new(),
            name: name.trim().to_string(),
            state_id,
        };
        city.validate()?;
        Ok(city)
    }

    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if the name is blank.
    pub fn validate(&self) -> Result<(), EstoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        Ok(())
    }
}

/// The smallest geographic unit, identified by its postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    pub id: LocalityId,
    pub name: String,
    pub pincode: String,
    pub city_id: CityId,
}

impl Locality {
    /// Build a new locality with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if the name or pincode is blank.
    pub fn new(name: &str, pincode: &str, city_id: CityId) -> Result<Self, EstoreError> {
        let locality = Self {
            id: LocalityId::new(),
            name: name.trim().to_string(),
            pincode: pincode.trim().to_string(),
            city_id,
        };
        locality.validate()?;
        Ok(locality)
    }

    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if the name or pincode is blank.
    pub fn validate(&self) -> Result<(), EstoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.pincode.is_empty() {
            return Err(ValidationError::EmptyField("pincode").into());
        }
        Ok(())
    }
}

/// A locality together with its city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityPath {
    pub locality: Locality,
    pub city: City,
    pub state: State,
}
