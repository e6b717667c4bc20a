//! Expanded, display-ready form of an [`Address`].

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressType};
use crate::geo::LocalityPath;
use crate::id::{AddressId, CityId, LocalityId, StateId, UserId};

/// An address joined with its locality, city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressView {
    pub id: AddressId,
    pub user_id: UserId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub is_default: bool,
    pub address_type: AddressType,
    pub locality_id: LocalityId,
    pub locality_name: String,
    pub pincode: String,
    pub city_id: CityId,
    pub city_name: String,
    pub state_id: StateId,
    pub state_name: String,
    pub formatted_address: String,
}

impl AddressView {
    /// Denormalise `address` using its resolved locality chain.
    #[must_use]
    pub fn new(address: Address, path: LocalityPath) -> Self {
        let formatted_address = format_address(&address, &path);
        let LocalityPath {
            locality,
            city,
            state,
        } = path;
        Self {
            id: address.id,
            user_id: address.user_id,
            address_line1: address.address_line1,
            address_line2: address.address_line2,
            landmark: address.landmark,
            contact_name: address.contact_name,
            contact_phone: address.contact_phone,
            is_default: address.is_default,
            address_type: address.address_type,
            locality_id: locality.id,
            locality_name: locality.name,
            pincode: locality.pincode,
            city_id: city.id,
            city_name: city.name,
            state_id: state.id,
            state_name: state.name,
            formatted_address,
        }
    }
}

/// Single-line postal form:
/// `line1[, line2][, Near landmark], locality, city, state - pincode`.
#[must_use]
pub fn format_address(address: &Address, path: &LocalityPath) -> String {
    let mut out = address.address_line1.clone();

    if let Some(line2) = non_blank(address.address_line2.as_deref()) {
        out.push_str(", ");
        out.push_str(line2);
    }
    if let Some(landmark) = non_blank(address.landmark.as_deref()) {
        out.push_str(", Near ");
        out.push_str(landmark);
    }

    for part in [&path.locality.name, &path.city.name, &path.state.name] {
        out.push_str(", ");
        out.push_str(part);
    }
    out.push_str(" - ");
    out.push_str(&path.locality.pincode);
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{City, Locality, State};

    fn path() -> LocalityPath {
        let state = State::new("Greater London", "GL").unwrap();
        let city = City::new("London", state.id).unwrap();
        let locality = Locality::new("Marylebone", "NW16XE", city.id).unwrap();
        LocalityPath {
            locality,
            city,
            state,
        }
    }

    fn address(path: &LocalityPath) -> Address {
        Address {
            id: AddressId::new(),
            user_id: UserId::new(),
            locality_id: path.locality.id,
            address_line1: "221B Baker Street".to_string(),
            address_line2: None,
            landmark: Some("near park".to_string()),
            contact_name: "Sherlock".to_string(),
            contact_phone: "9876543210".to_string(),
            address_type: AddressType::Home,
            is_default: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn should_format_address_with_landmark() {
        let path = path();
        let formatted = format_address(&address(&path), &path);
        assert_eq!(
            formatted,
            "221B Baker Street, Near near park, Marylebone, London, Greater London - NW16XE"
        );
    }

    #[test]
    fn should_include_second_line_before_landmark() {
        let path = path();
        let mut addr = address(&path);
        addr.address_line2 = Some("Flat 2".to_string());
        let formatted = format_address(&addr, &path);
        assert_eq!(
            formatted,
            "221B Baker Street, Flat 2, Near near park, Marylebone, London, Greater London - NW16XE"
        );
    }

    #[test]
    fn should_skip_blank_optional_parts() {
        let path = path();
        let mut addr = address(&path);
        addr.address_line2 = Some("   ".to_string());
        addr.landmark = None;
        let formatted = format_address(&addr, &path);
        assert_eq!(
            formatted,
            "221B Baker Street, Marylebone, London, Greater London - NW16XE"
        );
    }

    #[test]
    fn should_denormalise_hierarchy_into_view() {
        let path = path();
        let addr = address(&path);
        let view = AddressView::new(addr.clone(), path.clone());
        assert_eq!(view.id, addr.id);
        assert_eq!(view.locality_name, "Marylebone");
        assert_eq!(view.pincode, "NW16XE");
        assert_eq!(view.city_id, path.city.id);
        assert_eq!(view.state_name, "Greater London");
        assert!(view.is_default);
    }
}
