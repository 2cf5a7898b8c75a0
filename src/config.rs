//! Generation configuration.
//!
//! A run is fully described by one `GenerationConfig`, loadable from a
//! `crudgen.yaml` file or assembled from CLI flags. Configuration is scoped
//! to a single run and discarded afterward.

use crate::generator::emit::OverwritePolicy;
use crate::generator::mapper::MapperStrategy;
use crate::generator::naming::ArtifactKind;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schema")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("src/main/java")
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Simple name of the root entity (e.g. "Order")
    pub root_entity: String,
    /// Root package for generated artifacts (e.g. "com.acme.shop")
    pub root_namespace: String,
    /// Directory containing YAML entity definitions
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,
    /// Root of the emitted source tree
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Conversion strategy shared by every mapper in the run
    #[serde(default)]
    pub mapper: MapperStrategy,
    /// Replace existing files instead of leaving them untouched
    #[serde(default)]
    pub overwrite: bool,
    /// Per-artifact-kind skip switches
    #[serde(default)]
    pub skip: SkipFlags,
}

/// Per-kind skip switches, all off by default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkipFlags {
    #[serde(default)]
    pub dto: bool,
    #[serde(default)]
    pub mapper: bool,
    #[serde(default)]
    pub repository: bool,
    #[serde(default)]
    pub service: bool,
    #[serde(default)]
    pub controller: bool,
}

impl SkipFlags {
    pub fn skips(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Dto => self.dto,
            ArtifactKind::Mapper => self.mapper,
            ArtifactKind::Repository => self.repository,
            ArtifactKind::Service => self.service,
            ArtifactKind::Controller => self.controller,
        }
    }
}

impl GenerationConfig {
    /// Build a configuration with defaults for everything but the root.
    pub fn with_root(root_entity: impl Into<String>, root_namespace: impl Into<String>) -> Self {
        GenerationConfig {
            root_entity: root_entity.into(),
            root_namespace: root_namespace.into(),
            schema_dir: default_schema_dir(),
            output_root: default_output_root(),
            mapper: MapperStrategy::default(),
            overwrite: false,
            skip: SkipFlags::default(),
        }
    }

    /// Load a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        let config: GenerationConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Check names and strategy before any work happens.
    pub fn validate(&self) -> Result<(), String> {
        static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
        static NAMESPACE_RE: OnceLock<Regex> = OnceLock::new();

        let entity_re =
            ENTITY_RE.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid pattern"));
        let namespace_re = NAMESPACE_RE.get_or_init(|| {
            Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*$")
                .expect("valid pattern")
        });

        if self.root_entity.is_empty() {
            return Err("root_entity cannot be empty".to_string());
        }
        if !entity_re.is_match(&self.root_entity) {
            return Err(format!(
                "root_entity '{}' is not a valid entity name (expected PascalCase, e.g. 'Order')",
                self.root_entity
            ));
        }
        if self.root_namespace.is_empty() {
            return Err("root_namespace cannot be empty".to_string());
        }
        if !namespace_re.is_match(&self.root_namespace) {
            return Err(format!(
                "root_namespace '{}' is not a valid package name (e.g. 'com.acme.shop')",
                self.root_namespace
            ));
        }

        Ok(())
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        if self.overwrite {
            OverwritePolicy::AlwaysOverwrite
        } else {
            OverwritePolicy::SkipIfExists
        }
    }
}

/// Parse a mapper strategy name from the CLI.
pub fn parse_mapper_strategy(value: &str) -> Result<MapperStrategy, String> {
    match value.to_lowercase().as_str() {
        "structural" | "mapstruct" => Ok(MapperStrategy::Structural),
        "reflective" | "object_mapper" => Ok(MapperStrategy::Reflective),
        other => Err(format!(
            "Unsupported mapper strategy: '{}'. Supported strategies: structural, reflective",
            other
        )),
    }
}
