//! Row and value model shared by the table and form engines

mod record;
mod row;
mod value;

pub use record::*;
pub use row::*;
pub use value::*;
