//! Error types

mod config;
mod session;
mod table;

pub use config::*;
pub use session::*;
pub use table::*;
