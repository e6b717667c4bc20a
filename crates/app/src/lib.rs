//! # estore-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`: create and look up users
//!   - `StateRepository`, `CityRepository`, `LocalityRepository`: geography
//!   - `AddressRepository`: addresses, with atomic default-flag swaps
//!   - `CategoryRepository`: the catalogue tree and its ancestry queries
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AddressService`: address CRUD and the one-default-per-user rule
//!   - `GeoService`: states, cities, localities
//!   - `CategoryService`: category tree maintenance without cycles
//!   - `UserService`: user accounts
//! - Serialize per-user writes in-process (`UserLocks`)
//! - Check the caller's capabilities before any write
//!
//! ## Dependency rule
//! Depends on `estore-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod user_locks;
