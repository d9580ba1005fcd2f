//! Schema registry: the declarative layout of every document kind.
//!
//! Each kind's product element is described by a tree of [`FieldSpec`]s in
//! schema order. The tables are embedded in the crate and built once; the
//! codec and validator are driven entirely by them.

mod common;
mod config;
mod das;
mod dvs;
mod registry;
mod rit;
mod types;

pub use config::{create_infoplus_registry, infoplus};
pub use registry::{SchemaEntry, SchemaRegistry};
pub use types::{Constraint, FieldSpec, FieldType, NodeKind, Occurs};
