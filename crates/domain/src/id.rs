//! Typed record identifiers.
//!
//! Every record is keyed by a random UUID behind its own newtype, so a
//! locality id never type-checks where an address id is expected. A failed
//! parse names the field it came from and surfaces as
//! [`ValidationError::InvalidId`] without further mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Behaviour shared by every typed identifier.
pub trait Identifier: Copy + Eq + fmt::Display + FromStr<Err = ValidationError> {
    /// Field name reported when a value fails to parse.
    const FIELD: &'static str;
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident => $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Identifier for $name {
            const FIELD: &'static str = $field;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.as_hyphenated().fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId($field))
            }
        }
    };
}

typed_id!(
    /// Owner of addresses; see [`User`](crate::user::User).
    UserId => "user_id"
);

typed_id!(
    /// Key of an [`Address`](crate::address::Address).
    AddressId => "address_id"
);

typed_id!(
    /// Key of a [`State`](crate::geo::State).
    StateId => "state_id"
);

typed_id!(
    /// Key of a [`City`](crate::geo::City).
    CityId => "city_id"
);

typed_id!(
    /// Key of a [`Locality`](crate::geo::Locality).
    LocalityId => "locality_id"
);

typed_id!(
    /// Key of a [`Category`](crate::category::Category).
    CategoryId => "category_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_field_when_parsing_fails() {
        assert_eq!(
            "42".parse::<AddressId>(),
            Err(ValidationError::InvalidId("address_id"))
        );
        assert_eq!(
            "not-a-uuid".parse::<CategoryId>(),
            Err(ValidationError::InvalidId("category_id"))
        );
    }

    #[test]
    fn should_parse_back_its_display_form() {
        let id = LocalityId::new();
        assert_eq!(id.to_string().parse::<LocalityId>(), Ok(id));
    }

    #[test]
    fn should_serialize_as_bare_uuid_string() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn should_expose_field_names_through_the_trait() {
        fn field<T: Identifier>() -> &'static str {
            T::FIELD
        }
        assert_eq!(field::<StateId>(), "state_id");
        assert_eq!(field::<CityId>(), "city_id");
    }
}
