//! Mapper synthesis: bidirectional conversion between an entity and its
//! mirror.
//!
//! One strategy is selected per run and shared by every entity in it:
//! structural mappers are MapStruct interfaces wired together through their
//! `uses` clause; reflective mappers round-trip through Jackson and recover
//! locally from conversion failures by returning the `null` sentinel.

use crate::generator::naming::{self, ArtifactKind};
use crate::schema::types::{EntityDescriptor, FieldKind};
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// How entity <-> mirror conversion code is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperStrategy {
    /// Field-by-field mapping contract (MapStruct interface).
    #[default]
    Structural,
    /// Serialize/deserialize round-trip (Jackson ObjectMapper).
    Reflective,
}

/// Post-conversion step restoring a child -> parent back-pointer that a pure
/// field-by-field copy would leave null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackRefFixup {
    /// The one-to-many field on the parent entity.
    pub field: String,
    /// The child entity whose back-pointer gets re-linked.
    pub child: String,
}

/// Conversion definition for one entity.
#[derive(Debug, Clone)]
pub struct MapperDefinition {
    pub entity: String,
    pub strategy: MapperStrategy,
    /// Distinct non-self entities reachable through this entity's fields;
    /// their mappers are invoked as part of this entity's conversion.
    pub uses: Vec<String>,
    pub fixups: Vec<BackRefFixup>,
}

impl MapperDefinition {
    /// Mapper class names for the dependency set, in field order.
    pub fn dependency_mappers(&self) -> Vec<String> {
        self.uses
            .iter()
            .map(|entity| naming::class_name(entity, ArtifactKind::Mapper))
            .collect()
    }
}

/// Build the conversion definition for one entity.
///
/// `discovered` is the full entity set found by the walker for this run;
/// a one-to-many fix-up is only emitted when the child entity is part of it.
pub fn synthesize_mapper(
    entity: &EntityDescriptor,
    discovered: &[String],
    strategy: MapperStrategy,
) -> MapperDefinition {
    let uses = entity
        .entity_targets()
        .into_iter()
        .filter(|target| *target != entity.name)
        .map(String::from)
        .collect();

    let fixups = entity
        .fields
        .iter()
        .filter_map(|field| match &field.kind {
            FieldKind::ListOfEntity { target } if discovered.iter().any(|e| e == target) => {
                Some(BackRefFixup {
                    field: field.name.clone(),
                    child: target.clone(),
                })
            }
            _ => None,
        })
        .collect();

    MapperDefinition {
        entity: entity.name.clone(),
        strategy,
        uses,
        fixups,
    }
}

/// Render a mapper definition as Java source.
pub fn render_mapper(
    definition: &MapperDefinition,
    entity: &EntityDescriptor,
    root_namespace: &str,
) -> String {
    match definition.strategy {
        MapperStrategy::Structural => render_structural(definition, entity, root_namespace),
        MapperStrategy::Reflective => render_reflective(entity, root_namespace),
    }
}

fn render_structural(
    definition: &MapperDefinition,
    entity: &EntityDescriptor,
    root_namespace: &str,
) -> String {
    let class_name = naming::class_name(&entity.name, ArtifactKind::Mapper);
    let dto = naming::class_name(&entity.name, ArtifactKind::Dto);
    let entity_var = entity.name.to_case(Case::Camel);

    let mut out = String::new();
    out.push_str(&format!(
        "package {};\n\n",
        naming::package_name(root_namespace, ArtifactKind::Mapper)
    ));

    out.push_str(&format!(
        "import {}.{};\n",
        naming::package_name(root_namespace, ArtifactKind::Dto),
        dto
    ));
    out.push_str(&format!(
        "import {}.{};\n",
        entity.model_package(root_namespace),
        entity.name
    ));
    if !definition.fixups.is_empty() {
        out.push_str("import org.mapstruct.AfterMapping;\n");
    }
    out.push_str("import org.mapstruct.Mapper;\n");
    if !definition.fixups.is_empty() {
        out.push_str("import org.mapstruct.MappingTarget;\n");
    }

    // Sibling mappers in the uses clause share this package, no imports.
    if definition.uses.is_empty() {
        out.push_str("\n@Mapper(componentModel = \"spring\")\n");
    } else {
        let uses: Vec<String> = definition
            .dependency_mappers()
            .into_iter()
            .map(|mapper| format!("{}.class", mapper))
            .collect();
        out.push_str(&format!(
            "\n@Mapper(componentModel = \"spring\", uses = {{{}}})\n",
            uses.join(", ")
        ));
    }

    out.push_str(&format!("public interface {} {{\n\n", class_name));
    out.push_str(&format!("    {} toDto({} entity);\n\n", dto, entity.name));
    out.push_str(&format!("    {} toEntity({} dto);\n", entity.name, dto));

    for fixup in &definition.fixups {
        // A self-referencing list would shadow the parent variable.
        let mut child_var = fixup.child.to_case(Case::Camel);
        if child_var == entity_var {
            child_var.push_str("Child");
        }
        let getter = format!("get{}", fixup.field.to_case(Case::Pascal));
        let setter = format!("set{}", entity.name.to_case(Case::Pascal));
        out.push_str(&format!(
            "\n    @AfterMapping\n    default void link{}(@MappingTarget {} {}) {{\n",
            fixup.field.to_case(Case::Pascal),
            entity.name,
            entity_var
        ));
        out.push_str(&format!(
            "        if ({}.{}() != null) {{\n",
            entity_var, getter
        ));
        out.push_str(&format!(
            "            {}.{}().forEach({} -> {}.{}({}));\n",
            entity_var, getter, child_var, child_var, setter, entity_var
        ));
        out.push_str("        }\n    }\n");
    }

    out.push_str("}\n");
    out
}

fn render_reflective(entity: &EntityDescriptor, root_namespace: &str) -> String {
    let class_name = naming::class_name(&entity.name, ArtifactKind::Mapper);
    let dto = naming::class_name(&entity.name, ArtifactKind::Dto);
    let package = naming::package_name(root_namespace, ArtifactKind::Mapper);
    let dto_import = format!(
        "{}.{}",
        naming::package_name(root_namespace, ArtifactKind::Dto),
        dto
    );
    let model_import = format!("{}.{}", entity.model_package(root_namespace), entity.name);
    let entity_name = &entity.name;

    format!(
        r#"package {package};

import com.fasterxml.jackson.core.JsonProcessingException;
import com.fasterxml.jackson.databind.ObjectMapper;
import {dto_import};
import lombok.extern.slf4j.Slf4j;
import org.springframework.stereotype.Component;
import {model_import};

@Component
@Slf4j
public class {class_name} {{

    private final ObjectMapper objectMapper;

    public {class_name}() {{
        this.objectMapper = new ObjectMapper();
    }}

    public {dto} toDto({entity_name} entity) {{
        try {{
            return objectMapper.readValue(objectMapper.writeValueAsString(entity), {dto}.class);
        }} catch (JsonProcessingException e) {{
            log.error("Failed to convert {entity_name} to {dto}", e);
            return null;
        }}
    }}

    public {entity_name} toEntity({dto} dto) {{
        try {{
            return objectMapper.readValue(objectMapper.writeValueAsString(dto), {entity_name}.class);
        }} catch (JsonProcessingException e) {{
            log.error("Failed to convert {dto} to {entity_name}", e);
            return null;
        }}
    }}
}}
"#
    )
}
