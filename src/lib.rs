//! # Crudgen: Schema-Driven CRUD Scaffolding Generator
//!
//! Crudgen takes the name of a root entity plus a directory of YAML entity
//! definitions, discovers every entity reachable from that root, and emits a
//! parallel set of Java/Spring companion sources: one DTO and one mapper per
//! discovered entity, plus fixed-shape repository/service/controller
//! scaffolding for the root.
//!
//! ## Features
//!
//! - **Cycle-safe graph discovery**: mutually and self-referencing entities
//!   are each generated exactly once
//! - **Mirrored DTOs**: entity-typed fields are substituted with their DTO
//!   counterparts, with recursive serialization suppressed on cyclic edges
//! - **Mapper strategies**: structural (MapStruct) or reflective (Jackson
//!   round-trip) conversion, selected once per run
//! - **Idempotent emission**: existing files are left untouched unless
//!   overwriting is requested
//!
//! ## Example: entity definition
//!
//! ```yaml
//! entity:
//!   name: Order
//!   fields:
//!     - name: id
//!       type: Long
//!     - name: customer
//!       type: Customer
//!     - name: items
//!       type: List<OrderItem>
//! ```
//!
//! ## Example: running a generation
//!
//! ```no_run
//! use crudgen::{generate_all, GenerationConfig, YamlEntityResolver};
//!
//! let config = GenerationConfig::from_file("crudgen.yaml").unwrap();
//! let resolver = YamlEntityResolver::from_dir(&config.schema_dir).unwrap();
//! let report = generate_all(&config, &resolver).unwrap();
//! println!("generated {} artifacts", report.written.len());
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod schema;

// Re-export key types
pub use config::{parse_mapper_strategy, GenerationConfig, SkipFlags};
pub use diagnostics::Diagnostics;
pub use error::GenerateError;
pub use generator::{
    generate_all, ArtifactKind, GenerationReport, MapperDefinition, MapperStrategy, MirroredShape,
    OverwritePolicy,
};
pub use schema::{
    discover, EntityDescriptor, EntityResolver, FieldDescriptor, FieldKind, RawEntityDef,
    RawFieldDef, StaticResolver, YamlEntityResolver,
};
