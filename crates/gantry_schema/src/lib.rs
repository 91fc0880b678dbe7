//! Warehouse Export Schema
//!
//! # Philosophy: never move a materialized column
//!
//! Destination tables live in customer-owned warehouses. Those warehouses
//! are happy to append columns to an existing table, but reordering or
//! renaming a physical column in place ranges from expensive to impossible.
//! So once a column has been materialized, its position and name are fixed
//! facts this layer works around, not mistakes to repair.
//!
//! The schema lifecycle in Gantry:
//!
//! 1. **Declare**: the application declares ordered field groups ([`groups`])
//! 2. **Build**: groups concatenate into a [`SchemaDefinition`]
//! 3. **Reconcile**: the definition merges with a live table's column list,
//!    recognizing known columns in place and planning appends for the rest
//! 4. **Apply**: the caller adds the trailing columns
//!    ([`Schema::columns_to_add`]) via whatever DDL mechanism it implements
//!
//! Reconciliation never asks the caller to move, rename, or drop anything:
//! the output is always a safe migration plan. Columns Gantry does not
//! recognize pass through untouched, and fields that were renamed keep
//! matching tables that still use the old name.
//!
//! # Modules
//!
//! - [`definition`]: canonical field declarations and the schema builder
//! - [`schema`]: merged schema model produced by reconciliation
//! - [`groups`]: the concrete field groups declared by the exporter

pub mod definition;
pub mod groups;
pub mod schema;

pub use definition::{FieldGroup, FieldSpec, SchemaDefinition};
pub use schema::{Schema, WarehouseField};

/// Canonical scalar type used for schema declarations (shared across crates).
pub use gantry_protocol::DataType;
