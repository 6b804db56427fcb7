//! Configuration-driven building blocks for record administration screens.
//!
//! - [`table`]: column model, filter/sort/paginate pipeline, pinned layout.
//! - [`form`]: field schema, dynamic resolution, and the editing session.
//! - [`validation`]: composable field validators and built-in rules.
//! - [`model`]: the dynamic [`Value`](model::Value) and [`Record`](model::Record) types.
//! - [`config`]: grid and form defaults, loadable from JSON.
//!
//! Everything here is rendering-agnostic: pages own the rows and hand the
//! committed record to their own persistence layer.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod table;
pub mod validation;
