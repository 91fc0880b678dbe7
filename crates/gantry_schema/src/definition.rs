//! Canonical field declarations and the schema builder.
//!
//! The exporting application declares its fields once, in ordered groups.
//! Concatenating those groups yields a [`SchemaDefinition`] - the canonical
//! schema - which then reconciles against whatever column layout a
//! destination table already has.

use crate::schema::{Schema, WarehouseField};
use gantry_protocol::DataType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A canonical field declaration.
///
/// `name` is the identifier used to recognize the field in an existing
/// table's column list; `warehouse_name` is the name the field gets when
/// written going forward. The two differ only for renamed fields, where
/// `name` stays on the historical identifier so old tables keep matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub warehouse_name: String,
    pub data_type: DataType,
}

impl FieldSpec {
    /// Declare a field whose warehouse name matches its identifier.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        Self {
            warehouse_name: name.clone(),
            name,
            data_type,
        }
    }

    /// Declare a renamed field: matched under `name`, written under
    /// `warehouse_name`.
    pub fn renamed(
        name: impl Into<String>,
        warehouse_name: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            warehouse_name: warehouse_name.into(),
            data_type,
        }
    }
}

/// An ordered, fixed sequence of field declarations contributed by one
/// logical source (e.g. the base web export, the mobile extension).
///
/// Declaration order inside a group is fixed by the group's definition and
/// never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Where a looked-up column name points.
enum Slot {
    Canonical(usize),
    Deprecated(usize),
}

/// The canonical export schema: every declared field, in declaration order.
///
/// Built fresh from the application's declarations per reconciliation call
/// and immutable thereafter. Holds no state between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchemaDefinition {
    fields: Vec<FieldSpec>,
    deprecated: Vec<FieldSpec>,
}

impl SchemaDefinition {
    /// Concatenate field groups into a canonical schema.
    ///
    /// Order is preserved exactly: group order first, then declaration order
    /// inside each group. Nothing is deduplicated or validated - declaring
    /// the same field name in two groups is a caller error, and the later
    /// declaration wins the reconciler's lookup.
    pub fn from_groups(groups: &[FieldGroup]) -> Self {
        let fields = groups
            .iter()
            .flat_map(|group| group.fields().iter().cloned())
            .collect();
        Self {
            fields,
            deprecated: Vec::new(),
        }
    }

    /// Attach declarations for fields that are no longer exported.
    ///
    /// A deprecated field is still recognized in place, with its canonical
    /// name and type, when an old table contains it - but it is never
    /// appended to tables that lack it and never appears in new-table
    /// schemas. Canonical declarations win name collisions.
    pub fn with_deprecated(mut self, fields: Vec<FieldSpec>) -> Self {
        self.deprecated = fields;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn deprecated(&self) -> &[FieldSpec] {
        &self.deprecated
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The schema for a brand-new destination table: every canonical field
    /// in declaration order, written under its warehouse name.
    pub fn new_table_schema(&self) -> Schema {
        self.reconcile_with_existing::<&str>(&[])
    }

    /// Merge this definition with the column layout of an existing table.
    ///
    /// Every existing column keeps its physical position. Columns with a
    /// matching declaration (by `name`, case-insensitively - never by
    /// `warehouse_name`) are annotated with the declaration's canonical name
    /// and type; columns Gantry does not recognize pass through verbatim as
    /// untyped placeholders. Canonical fields the table does not yet have
    /// are appended at the end, in declaration order, under their warehouse
    /// names.
    ///
    /// A duplicate existing column name cannot claim a declaration twice:
    /// occurrences after the first are treated as unrecognized.
    pub fn reconcile_with_existing<S: AsRef<str>>(&self, existing_columns: &[S]) -> Schema {
        // Deprecated declarations go in first so canonical ones win
        // collisions; within each set, later declarations win.
        let mut lookup: HashMap<String, Slot> =
            HashMap::with_capacity(self.fields.len() + self.deprecated.len());
        for (idx, field) in self.deprecated.iter().enumerate() {
            lookup.insert(field.name.to_lowercase(), Slot::Deprecated(idx));
        }
        for (idx, field) in self.fields.iter().enumerate() {
            lookup.insert(field.name.to_lowercase(), Slot::Canonical(idx));
        }

        let mut consumed = vec![false; self.fields.len()];
        let mut consumed_deprecated = vec![false; self.deprecated.len()];
        let mut merged = Vec::with_capacity(existing_columns.len() + self.fields.len());

        for column in existing_columns {
            let column = column.as_ref();
            let spec = match lookup.get(&column.to_lowercase()) {
                Some(Slot::Canonical(idx)) if !consumed[*idx] => {
                    consumed[*idx] = true;
                    Some(&self.fields[*idx])
                }
                Some(Slot::Deprecated(idx)) if !consumed_deprecated[*idx] => {
                    consumed_deprecated[*idx] = true;
                    Some(&self.deprecated[*idx])
                }
                // Already claimed, or no declaration at all: the column
                // passes through untouched.
                _ => None,
            };
            merged.push(match spec {
                Some(field) => {
                    WarehouseField::new(&field.name, &field.warehouse_name, field.data_type)
                }
                None => WarehouseField::untyped(column),
            });
        }

        let matched = merged.iter().filter(|field| field.is_recognized()).count();
        let unknown = merged.len() - matched;

        for (idx, field) in self.fields.iter().enumerate() {
            if !consumed[idx] {
                merged.push(WarehouseField::new(
                    &field.warehouse_name,
                    &field.warehouse_name,
                    field.data_type,
                ));
            }
        }

        debug!(
            "Reconciled schema: {} matched, {} unknown, {} to append",
            matched,
            unknown,
            merged.len() - existing_columns.len()
        );

        Schema::new(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Vec<FieldGroup> {
        vec![
            FieldGroup::new(
                "core",
                vec![
                    FieldSpec::new("UserId", DataType::Int64),
                    FieldSpec::renamed("PageAgent", "PageUserAgent", DataType::String),
                    FieldSpec::new("EventStart", DataType::Timestamp),
                ],
            ),
            FieldGroup::new(
                "extras",
                vec![
                    FieldSpec::new("Score", DataType::Float64),
                    FieldSpec::new("Label", DataType::String),
                ],
            ),
        ]
    }

    #[test]
    fn test_field_spec_new_mirrors_name() {
        let spec = FieldSpec::new("UserId", DataType::Int64);
        assert_eq!(spec.name, "UserId");
        assert_eq!(spec.warehouse_name, "UserId");
    }

    #[test]
    fn test_from_groups_preserves_order() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let names: Vec<&str> = definition
            .fields()
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["UserId", "PageAgent", "EventStart", "Score", "Label"]
        );
    }

    #[test]
    fn test_new_table_schema_uses_warehouse_names() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let schema = definition.new_table_schema();

        assert_eq!(schema.len(), 5);
        for field in &schema {
            assert_eq!(field.source_name, field.warehouse_name);
            assert!(field.is_recognized());
        }
        assert_eq!(schema.fields()[1].source_name, "PageUserAgent");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let schema = definition.reconcile_with_existing(&["userid"]);

        assert_eq!(
            schema.fields()[0],
            WarehouseField::new("UserId", "UserId", DataType::Int64)
        );
    }

    #[test]
    fn test_unknown_columns_pass_through_verbatim() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let schema = definition.reconcile_with_existing(&["Mystery_Col", ""]);

        assert_eq!(schema.fields()[0], WarehouseField::untyped("Mystery_Col"));
        // An empty column name is not a fault, just another unknown.
        assert_eq!(schema.fields()[1], WarehouseField::untyped(""));
    }

    #[test]
    fn test_duplicate_existing_column_claims_once() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let schema = definition.reconcile_with_existing(&["UserId", "USERID"]);

        assert_eq!(
            schema.fields()[0],
            WarehouseField::new("UserId", "UserId", DataType::Int64)
        );
        assert_eq!(schema.fields()[1], WarehouseField::untyped("USERID"));
        // The declaration was claimed by the first occurrence only.
        let appends = schema.columns_to_add(2);
        assert!(appends.iter().all(|field| field.source_name != "UserId"));
    }

    #[test]
    fn test_renamed_field_matches_legacy_name_only() {
        let definition = SchemaDefinition::from_groups(&two_groups());

        let legacy = definition.reconcile_with_existing(&["PageAgent"]);
        assert_eq!(
            legacy.fields()[0],
            WarehouseField::new("PageAgent", "PageUserAgent", DataType::String)
        );
        // Matched, so it must not show up again in the appended suffix.
        assert!(legacy
            .columns_to_add(1)
            .iter()
            .all(|field| field.warehouse_name != "PageUserAgent"));

        // The new name is not a match key.
        let renamed = definition.reconcile_with_existing(&["PageUserAgent"]);
        assert_eq!(renamed.fields()[0], WarehouseField::untyped("PageUserAgent"));
    }

    #[test]
    fn test_appends_follow_declaration_order() {
        let definition = SchemaDefinition::from_groups(&two_groups());
        let schema = definition.reconcile_with_existing(&["Score"]);

        let appended: Vec<&str> = schema
            .columns_to_add(1)
            .iter()
            .map(|field| field.source_name.as_str())
            .collect();
        assert_eq!(
            appended,
            vec!["UserId", "PageUserAgent", "EventStart", "Label"]
        );
    }

    #[test]
    fn test_deprecated_field_recognized_but_never_appended() {
        let definition = SchemaDefinition::from_groups(&two_groups())
            .with_deprecated(vec![FieldSpec::new("OldChecksum", DataType::String)]);

        let with_legacy = definition.reconcile_with_existing(&["oldchecksum", "UserId"]);
        assert_eq!(
            with_legacy.fields()[0],
            WarehouseField::new("OldChecksum", "OldChecksum", DataType::String)
        );

        // Absent from a fresh table and from the appended suffix.
        let fresh = definition.new_table_schema();
        assert_eq!(fresh.len(), 5);
        assert!(fresh
            .iter()
            .all(|field| field.source_name != "OldChecksum"));
    }

    #[test]
    fn test_canonical_declaration_wins_name_collision_with_deprecated() {
        let definition = SchemaDefinition::from_groups(&two_groups())
            .with_deprecated(vec![FieldSpec::new("UserId", DataType::String)]);

        let schema = definition.reconcile_with_existing(&["UserId"]);
        assert_eq!(schema.fields()[0].data_type, Some(DataType::Int64));
    }

    #[test]
    fn test_serde_roundtrip() {
        let definition = SchemaDefinition::from_groups(&two_groups())
            .with_deprecated(vec![FieldSpec::new("OldChecksum", DataType::String)]);
        let json = serde_json::to_string(&definition).unwrap();
        let parsed: SchemaDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, definition);
    }
}
