//! Historical price series and table loading

mod data;
pub mod loader;

pub use data::{ComplexSeries, PriceSeries};
pub use loader::{load_table, load_table_from_reader, LoadedTable};
