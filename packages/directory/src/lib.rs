#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived views over the canonical temple collection.
//!
//! Everything here is a pure function of the collection except
//! [`edit::EditOverlay`], which holds at most one in-progress edit and
//! writes it back by id on save. Nothing is persisted.

pub mod edit;
pub mod filter;
pub mod markers;

pub use edit::{EditError, EditOverlay};
pub use filter::{ALL_STATES, filter_temples, unique_states};
pub use markers::{LocationSummary, plottable};
