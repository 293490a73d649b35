//! Data module - CSV loading, table model and row filters

pub mod filter;
mod loader;
pub mod model;

pub use filter::{query_by_age, select_entities};
pub use loader::{DataLoader, LoadError};
pub use model::{Row, SelectionSet, Table};
