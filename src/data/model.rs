//! Core table types: measurement rows, the loaded table and the tree selection.

use serde::Serialize;
use std::collections::BTreeSet;

/// One measurement of a single tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Row label from the source's index column.
    pub index: String,
    pub tree: String,
    /// Days.
    pub age: f64,
    /// Centimetres.
    pub circumference: f64,
}

impl Row {
    pub fn new(index: impl Into<String>, tree: impl Into<String>, age: f64, circumference: f64) -> Self {
        Self {
            index: index.into(),
            tree: tree.into(),
            age,
            circumference,
        }
    }
}

/// Ordered measurements in source order. Read-only after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ages(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.age).collect()
    }

    pub fn circumferences(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.circumference).collect()
    }

    /// Distinct tree identifiers in order of first appearance.
    pub fn distinct_trees(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.tree.as_str()))
            .map(|r| r.tree.clone())
            .collect()
    }

    /// (min, max) age over every row, or None for an empty table.
    pub fn age_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.rows.iter().map(|r| r.age);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
    }

    /// Clamp an age threshold into this table's age range.
    pub fn clamp_age(&self, age: f64) -> f64 {
        match self.age_bounds() {
            Some((lo, hi)) => age.clamp(lo, hi),
            None => age,
        }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Trees chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    trees: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new<I, S>(trees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trees: trees.into_iter().map(Into::into).collect(),
        }
    }

    /// Singleton of the first tree in the table, or empty for an empty table.
    pub fn default_for(table: &Table) -> Self {
        Self::new(table.rows().first().map(|r| r.tree.clone()))
    }

    pub fn contains(&self, tree: &str) -> bool {
        self.trees.contains(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Toggle a tree in or out of the selection.
    pub fn toggle(&mut self, tree: &str) {
        if !self.trees.remove(tree) {
            self.trees.insert(tree.to_string());
        }
    }
}
