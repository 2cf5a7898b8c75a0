//! Generation side of the pipeline: naming, synthesis, rendering and
//! emission of companion artifacts.

pub mod dto;
pub mod emit;
pub mod mapper;
pub mod naming;
pub mod pipeline;
pub mod scaffold;

pub use dto::{synthesize_dto, MirrorField, MirroredShape};
pub use emit::{ArtifactEmitter, EmitOutcome, OverwritePolicy};
pub use mapper::{synthesize_mapper, BackRefFixup, MapperDefinition, MapperStrategy};
pub use naming::ArtifactKind;
pub use pipeline::{generate_all, GenerationReport};
