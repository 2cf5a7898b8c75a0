//! Schema side of the pipeline: raw entity definitions, type resolution,
//! field classification and reachable-graph discovery.

pub mod introspect;
pub mod resolver;
pub mod types;
pub mod walker;

pub use introspect::{classify_field, introspect, is_builtin};
pub use resolver::{EntityResolver, StaticResolver, YamlEntityResolver};
pub use types::{EntityDescriptor, EntitySpec, FieldDescriptor, FieldKind, RawEntityDef, RawFieldDef};
pub use walker::discover;
