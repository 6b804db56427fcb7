//! Tabular view pipeline.
//!
//! A table is described by a [`ColumnModel`] (static configuration) and a
//! [`TableState`] (what the user changed: sort, filters, page, column
//! widths, selection). [`process`] turns the caller's rows plus those two
//! into the visible page, and [`pinned_layout`] computes sticky offsets
//! for pinned columns.
//!
//! # Example
//!
//! ```
//! use adminkit::config::GridConfig;
//! use adminkit::model::Record;
//! use adminkit::table::{Column, ColumnModel, PinSide, TableState, pinned_layout, process};
//!
//! let columns = ColumnModel::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("cityName", "City"),
//!     Column::new("status", "Status").width(96).pin(PinSide::Right),
//! ])
//! .unwrap();
//!
//! let rows = vec![Record::new("1").set("name", "North").set("cityName", "Abilene")];
//!
//! let mut state = TableState::default();
//! state.set_global_filter("abil");
//!
//! let view = process(&rows, &columns, &state);
//! assert_eq!(view.total, 1);
//!
//! let layout = pinned_layout(&columns, &state, &GridConfig::default());
//! assert_eq!(layout.right.get("status"), Some(&100));
//! ```

mod column;
mod pinned;
mod pipeline;
mod selection;
mod state;

pub use column::{Column, ColumnModel, ColumnWidth, PinSide};
pub use pinned::{PinnedLayout, compute_right_offsets, pinned_layout};
pub use pipeline::{PageView, process};
pub use selection::{Selection, SelectionMode};
pub use state::{PageState, SortDirection, SortSpec, TableState};
