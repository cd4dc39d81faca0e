//! Protocol bindings for the Grouper Web Services REST API.
//!
//! [`v1`] holds the serde shapes of the JSON bodies exchanged with the
//! `servicesRest` endpoints, [`model`] holds the typed records hydrated from
//! them.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::trivially_copy_pass_by_ref)]

pub mod model;
pub mod utils;
pub mod v1;

/// The source id Grouper reports for subjects that are themselves groups.
pub const GROUP_SOURCE_ID: &str = "g:gsa";
