//! LingYe site library
//!
//! Translation resolution and product template merging for the
//! catalogue site, exposed as a library for the binaries and tests.

pub mod api;
pub mod catalog;
pub mod core;
pub mod i18n;
