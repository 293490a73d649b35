//! CSV Data Loader Module
//! Reads the growth dataset with Polars and converts it into a typed [`Table`].

use crate::config::DashboardConfig;
use crate::data::model::{Row, Table};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{column}' row {row}: expected a non-negative number")]
    InvalidValue { column: String, row: usize },
}

/// Loads the growth dataset, mapping configured column names onto [`Row`] fields.
pub struct DataLoader {
    tree_col: String,
    age_col: String,
    circumference_col: String,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl DataLoader {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            tree_col: config.tree_column.clone(),
            age_col: config.age_column.clone(),
            circumference_col: config.circumference_column.clone(),
        }
    }

    /// Load a CSV file. The first column is the row index.
    pub fn load_csv(&self, path: &Path) -> Result<Table, LoadError> {
        if !path.is_file() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let table = self.table_from_dataframe(&df)?;
        log::info!(
            "Loaded {} rows for {} trees from {}",
            table.len(),
            table.distinct_trees().len(),
            path.display()
        );
        Ok(table)
    }

    /// Convert an already-read DataFrame into a [`Table`].
    pub fn table_from_dataframe(&self, df: &DataFrame) -> Result<Table, LoadError> {
        let index_col = df
            .get_columns()
            .first()
            .map(|c| c.name().to_string())
            .ok_or_else(|| LoadError::MissingColumn("index".to_string()))?;

        // The index must be its own column, not one of the measurement columns.
        if [&self.tree_col, &self.age_col, &self.circumference_col].contains(&&index_col) {
            return Err(LoadError::MissingColumn("index".to_string()));
        }

        let index = Self::text_column(df, &index_col, true)?;
        let trees = Self::text_column(df, &self.tree_col, false)?;
        let ages = Self::numeric_column(df, &self.age_col)?;
        let circumferences = Self::numeric_column(df, &self.circumference_col)?;

        Ok(index
            .into_iter()
            .zip(trees)
            .zip(ages.into_iter().zip(circumferences))
            .map(|((index, tree), (age, circumference))| Row {
                index,
                tree,
                age,
                circumference,
            })
            .collect())
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoadError> {
        df.column(name)
            .map_err(|_| LoadError::MissingColumn(name.to_string()))
    }

    fn text_column(df: &DataFrame, name: &str, allow_null: bool) -> Result<Vec<String>, LoadError> {
        let casted = Self::column(df, name)?.cast(&DataType::String)?;
        casted
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(s) => Ok(s.to_string()),
                None if allow_null => Ok(String::new()),
                None => Err(LoadError::InvalidValue {
                    column: name.to_string(),
                    row,
                }),
            })
            .collect()
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoadError> {
        let casted = Self::column(df, name)?.cast(&DataType::Float64)?;
        casted
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(LoadError::InvalidValue {
                    column: name.to_string(),
                    row,
                }),
            })
            .collect()
    }
}
