//! # estore-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for the geography catalogue (`/api/states`,
//!   `/api/cities`, `/api/localities`), the category tree
//!   (`/api/categories`), users (`/api/users`) and each user's addresses
//!   (`/api/users/{user_id}/addresses`)
//! - Turn the identity headers set by the gateway into an
//!   [`AccessContext`](estore_domain::access::AccessContext)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `estore-app` (for port traits and services) and `estore-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod access;
pub mod api;
pub mod error;
pub mod router;
pub mod state;
