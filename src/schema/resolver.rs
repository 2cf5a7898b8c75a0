//! Entity type resolution.
//!
//! The generator never reflects over compiled classes; it asks an
//! [`EntityResolver`] for the raw definition of a type name. The YAML-backed
//! resolver loads every definition from a schema directory once, eagerly, so
//! all blocking I/O happens at the start of a run.

use crate::schema::types::{EntitySpec, RawEntityDef};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Resolves an entity type name to its raw definition.
pub trait EntityResolver {
    /// Returns the definition for `type_name`, or `None` when the type is
    /// unknown. Unknown types are fatal to the run; the decision is made by
    /// the caller, not here.
    fn resolve(&self, type_name: &str) -> Option<&RawEntityDef>;
}

/// Resolver backed by a directory of YAML entity definitions.
#[derive(Debug)]
pub struct YamlEntityResolver {
    entities: HashMap<String, RawEntityDef>,
}

impl YamlEntityResolver {
    /// Load all `*.yaml` / `*.yml` entity definitions from a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, String> {
        let dir_path = dir.as_ref();

        if !dir_path.exists() {
            return Err(format!("Schema directory does not exist: {}", dir_path.display()));
        }
        if !dir_path.is_dir() {
            return Err(format!("Schema path is not a directory: {}", dir_path.display()));
        }

        let read_dir = fs::read_dir(dir_path)
            .map_err(|e| format!("Failed to read schema directory {}: {}", dir_path.display(), e))?;

        let mut entities = HashMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
            let path = entry.path();

            let Some(ext) = path.extension() else { continue };
            if ext != "yaml" && ext != "yml" {
                continue;
            }

            let entity = load_entity_file(&path)
                .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

            if let Some(previous) = entities.insert(entity.name.clone(), entity) {
                return Err(format!(
                    "Duplicate entity definition for '{}' in {}",
                    previous.name,
                    dir_path.display()
                ));
            }
        }

        Ok(Self { entities })
    }

    /// Number of loaded entity definitions.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Names of all loaded entities, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl EntityResolver for YamlEntityResolver {
    fn resolve(&self, type_name: &str) -> Option<&RawEntityDef> {
        self.entities.get(type_name)
    }
}

/// In-memory resolver for embedding callers and tests.
#[derive(Debug, Default)]
pub struct StaticResolver {
    entities: HashMap<String, RawEntityDef>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, keyed by its entity name.
    pub fn with_entity(mut self, entity: RawEntityDef) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }
}

impl EntityResolver for StaticResolver {
    fn resolve(&self, type_name: &str) -> Option<&RawEntityDef> {
        self.entities.get(type_name)
    }
}

/// Load and validate a single entity definition from a YAML file.
fn load_entity_file(path: &Path) -> Result<RawEntityDef, String> {
    let yaml_content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let spec: EntitySpec =
        serde_yaml::from_str(&yaml_content).map_err(|e| format!("Failed to parse YAML: {}", e))?;

    validate_entity(&spec.entity)?;
    Ok(spec.entity)
}

/// Validate a raw entity definition.
pub fn validate_entity(entity: &RawEntityDef) -> Result<(), String> {
    if entity.name.is_empty() {
        return Err("Entity name cannot be empty".to_string());
    }

    for field in &entity.fields {
        if field.name.is_empty() {
            return Err(format!("Field name cannot be empty in entity '{}'", entity.name));
        }
        if field.declared_type.trim().is_empty() {
            return Err(format!(
                "Field '{}' in entity '{}' has no declared type",
                field.name, entity.name
            ));
        }
    }

    let mut seen = Vec::new();
    for field in &entity.fields {
        if seen.contains(&&field.name) {
            return Err(format!(
                "Duplicate field '{}' in entity '{}'",
                field.name, entity.name
            ));
        }
        seen.push(&field.name);
    }

    Ok(())
}
