//! Name-based access to query result rows.
//!
//! A [`RowView`] pairs one row's values with a shared [`ColumnIndex`], so
//! callers can read `row.get_by_name("title")` instead of remembering that the
//! title is column 3. All rows of one result set share the same index.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Column index {index} out of bounds (columns: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Column not found: {name}")]
    UnknownColumn { name: String },

    #[error("Cannot convert column '{column}' of type {type_name}: {message}")]
    Conversion {
        column: String,
        type_name: String,
        message: String,
    },
}

/// Column names of a result set and their positions.
///
/// Names are matched case-sensitively. If a name appears more than once, the
/// last position wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self { names, positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Names in result order, duplicates included.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One result row, readable by position or column name.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<V> {
    columns: Arc<ColumnIndex>,
    values: Vec<V>,
}

impl<V> RowView<V> {
    /// Wrap row values with a shared column index.
    ///
    /// `values` should be in the same order as the index's names.
    pub fn new(columns: Arc<ColumnIndex>, values: Vec<V>) -> Self {
        Self { columns, values }
    }

    /// Build a standalone row from column names and values.
    pub fn from_parts<I, S>(names: I, values: Vec<V>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Arc::new(ColumnIndex::new(names)), values)
    }

    /// Value at a 0-based position.
    pub fn get_by_index(&self, index: usize) -> Result<&V, RowError> {
        self.values.get(index).ok_or(RowError::IndexOutOfRange {
            index,
            count: self.values.len(),
        })
    }

    /// Value of the named column.
    pub fn get_by_name(&self, name: &str) -> Result<&V, RowError> {
        let index = self
            .columns
            .position(name)
            .ok_or_else(|| RowError::UnknownColumn {
                name: name.to_string(),
            })?;
        self.get_by_index(index)
    }

    /// Value of the named column, or `None` if there is no such column.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.get_by_name(name).ok()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    pub fn columns(&self) -> &Arc<ColumnIndex> {
        &self.columns
    }

    /// Iterate over `(column name, value)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

impl<V: Clone> RowView<V> {
    /// Value of the named column, or `default` if there is no such column.
    pub fn get_by_name_or_default(&self, name: &str, default: V) -> V {
        self.get(name).cloned().unwrap_or(default)
    }
}
