//! Merged warehouse schema - the output side of reconciliation.
//!
//! A [`Schema`] describes the full column layout of a destination table:
//! every column the table already has, in physical order, followed by the
//! columns that still need to be added. It is consumed immediately by the
//! sink side (to diff against current DDL) and holds no further state.

use gantry_protocol::DataType;
use serde::{Deserialize, Serialize};

/// One column of a merged warehouse schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseField {
    /// The name the column was recognized under: the canonical identifier
    /// for recognized columns, the raw table text for foreign columns, the
    /// warehouse name for newly planned columns.
    pub source_name: String,

    /// The name used when writing this column to the warehouse. Empty for
    /// foreign columns, which Gantry never writes.
    pub warehouse_name: String,

    /// Semantic type of the column's values. `None` for foreign columns.
    pub data_type: Option<DataType>,
}

impl WarehouseField {
    /// A column with a known declaration.
    pub fn new(
        source_name: impl Into<String>,
        warehouse_name: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            warehouse_name: warehouse_name.into(),
            data_type: Some(data_type),
        }
    }

    /// A foreign column: present in the table, unknown to Gantry, left
    /// untouched as an opaque placeholder.
    pub fn untyped(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            warehouse_name: String::new(),
            data_type: None,
        }
    }

    /// Whether this column has a canonical declaration behind it.
    pub fn is_recognized(&self) -> bool {
        self.data_type.is_some()
    }
}

/// A merged warehouse schema: the ordered column layout of a destination
/// table after reconciliation.
///
/// Equality is deep and order-sensitive, comparing all three components of
/// every field positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    fields: Vec<WarehouseField>,
}

impl Schema {
    pub fn new(fields: Vec<WarehouseField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[WarehouseField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WarehouseField> {
        self.fields.iter()
    }

    /// Look up a column by its source name, case-insensitively.
    pub fn field_for_column(&self, name: &str) -> Option<&WarehouseField> {
        self.fields
            .iter()
            .find(|field| field.source_name.eq_ignore_ascii_case(name))
    }

    /// The columns a caller must add to a table that currently has
    /// `existing_count` columns.
    ///
    /// Reconciliation keeps every existing column at its position, so the
    /// migration plan is exactly the trailing slice past that prefix, in
    /// append order.
    pub fn columns_to_add(&self, existing_count: usize) -> &[WarehouseField] {
        &self.fields[existing_count.min(self.fields.len())..]
    }

    /// Source names of every column, in order. A table materialized from
    /// this schema reports these as its existing columns.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|field| field.source_name.as_str())
            .collect()
    }
}

impl From<Vec<WarehouseField>> for Schema {
    fn from(fields: Vec<WarehouseField>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a WarehouseField;
    type IntoIter = std::slice::Iter<'a, WarehouseField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
