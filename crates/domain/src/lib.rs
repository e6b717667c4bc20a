//! # estore-domain
//!
//! Pure domain model for the estore back-office.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** and the **access context** every operation is checked against
//! - Define the **geography** hierarchy (state → city → locality)
//! - Define **Addresses**, request validation and the expanded address view
//! - Build the human-readable formatted address
//! - Define the **category** tree of the catalogue
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod access;
pub mod address;
pub mod category;
pub mod geo;
pub mod user;

/// UTC instant used for `created_at` and `updated_at` fields.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
