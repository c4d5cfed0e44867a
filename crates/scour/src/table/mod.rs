//! In-memory table model: cells, kind-tagged columns and tables.

mod column;
#[allow(clippy::module_inception)]
mod table;
mod types;

pub use column::Column;
pub use table::Table;
pub use types::{Cell, CellKey, ColumnKind, TEMPORAL_RENDER_FORMAT};
