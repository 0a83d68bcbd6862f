mod indexed_table;
mod row;
mod slot_map;

pub use indexed_table::Table;
pub use row::{Row, RowSnapshot};
pub use slot_map::SlotMap;
