pub mod row;
pub mod sheet;

pub use row::to_item;
pub use sheet::{SheetRow, parse_rows};
