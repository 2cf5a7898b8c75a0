//! High-level orchestration for one generation run.
//!
//! One sequential pass: introspect the root, walk the reachable entity
//! graph, synthesize mirrors and mappers for every discovered entity,
//! render the fixed-shape scaffolding for the root only, and emit
//! everything through the configured overwrite policy.

use crate::config::GenerationConfig;
use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::generator::emit::{ArtifactEmitter, EmitOutcome};
use crate::generator::naming::{self, ArtifactKind};
use crate::generator::{dto, mapper, scaffold};
use crate::schema::resolver::EntityResolver;
use crate::schema::types::EntityDescriptor;
use crate::schema::walker::discover;
use std::path::PathBuf;

/// Outcome of a completed generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Discovered entities, root first, in discovery order.
    pub entities: Vec<String>,
    /// Artifacts written in this run.
    pub written: Vec<PathBuf>,
    /// Artifacts left untouched under the skip-if-exists policy.
    pub skipped: Vec<PathBuf>,
    /// Recoverable conditions encountered along the way.
    pub warnings: Vec<String>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, outcome: EmitOutcome) {
        match outcome {
            EmitOutcome::Written => self.written.push(path),
            EmitOutcome::SkippedExisting => self.skipped.push(path),
        }
    }
}

/// Run the full pipeline for one configuration.
pub fn generate_all(
    config: &GenerationConfig,
    resolver: &dyn EntityResolver,
) -> Result<GenerationReport, GenerateError> {
    config.validate().map_err(GenerateError::Config)?;

    let mut diagnostics = Diagnostics::new();
    let entities = discover(&config.root_entity, resolver, &mut diagnostics)?;
    let discovered: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();
    tracing::info!(
        "Discovered {} entities from root '{}': {}",
        entities.len(),
        config.root_entity,
        discovered.join(", ")
    );

    let emitter = ArtifactEmitter::new(config.overwrite_policy());
    let mut report = GenerationReport {
        entities: discovered.clone(),
        ..Default::default()
    };

    if config.skip.dto {
        tracing::info!("DTO generation skipped");
    } else {
        let dto_package = naming::package_name(&config.root_namespace, ArtifactKind::Dto);
        for (class_name, contents) in [
            (
                "PaginationRequestDto",
                dto::render_pagination_request_dto(&config.root_namespace),
            ),
            (
                "BaseResponseDto",
                dto::render_base_response_dto(&config.root_namespace),
            ),
        ] {
            let path = naming::class_file_path(&config.output_root, &dto_package, class_name);
            let outcome = emitter.emit(&path, &contents)?;
            report.record(path, outcome);
        }

        for entity in &entities {
            let shape = dto::synthesize_dto(entity);
            let path = naming::artifact_path(
                &config.output_root,
                &config.root_namespace,
                &entity.name,
                ArtifactKind::Dto,
            );
            let outcome = emitter.emit(&path, &dto::render_dto(&shape, &config.root_namespace))?;
            report.record(path, outcome);
        }
    }

    if config.skip.mapper {
        tracing::info!("Mapper generation skipped");
    } else {
        for entity in &entities {
            let definition = mapper::synthesize_mapper(entity, &discovered, config.mapper);
            let path = naming::artifact_path(
                &config.output_root,
                &config.root_namespace,
                &entity.name,
                ArtifactKind::Mapper,
            );
            let contents = mapper::render_mapper(&definition, entity, &config.root_namespace);
            let outcome = emitter.emit(&path, &contents)?;
            report.record(path, outcome);
        }
    }

    // Repository, service and controller apply a constant pattern once per
    // root entity, independent of the graph walk.
    if let Some(root) = entities.first() {
        let scaffolds: [(ArtifactKind, fn(&EntityDescriptor, &str) -> String); 3] = [
            (ArtifactKind::Repository, scaffold::render_repository),
            (ArtifactKind::Service, scaffold::render_service),
            (ArtifactKind::Controller, scaffold::render_controller),
        ];
        for (kind, render) in scaffolds {
            if config.skip.skips(kind) {
                tracing::info!("{} generation skipped", kind.suffix());
                continue;
            }
            let path = naming::artifact_path(
                &config.output_root,
                &config.root_namespace,
                &root.name,
                kind,
            );
            let outcome = emitter.emit(&path, &render(root, &config.root_namespace))?;
            report.record(path, outcome);
        }
    }

    report.warnings = diagnostics.into_warnings();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkipFlags;
    use crate::generator::mapper::MapperStrategy;
    use crate::schema::resolver::StaticResolver;
    use crate::schema::types::{RawEntityDef, RawFieldDef};
    use std::path::Path;

    fn entity(name: &str, fields: &[(&str, &str)]) -> RawEntityDef {
        RawEntityDef {
            name: name.to_string(),
            namespace: None,
            doc: None,
            fields: fields
                .iter()
                .map(|(field_name, declared_type)| RawFieldDef {
                    name: field_name.to_string(),
                    declared_type: declared_type.to_string(),
                    doc: None,
                })
                .collect(),
        }
    }

    fn shop_resolver() -> StaticResolver {
        StaticResolver::new()
            .with_entity(entity(
                "Order",
                &[
                    ("id", "Long"),
                    ("total", "Double"),
                    ("customer", "Customer"),
                    ("items", "List<OrderItem>"),
                ],
            ))
            .with_entity(entity("Customer", &[("id", "Long"), ("name", "String")]))
            .with_entity(entity("OrderItem", &[("id", "Long"), ("sku", "String")]))
    }

    fn config(output_root: &Path) -> GenerationConfig {
        GenerationConfig {
            root_entity: "Order".to_string(),
            root_namespace: "com.acme.shop".to_string(),
            schema_dir: PathBuf::from("unused"),
            output_root: output_root.to_path_buf(),
            mapper: MapperStrategy::Structural,
            overwrite: false,
            skip: SkipFlags::default(),
        }
    }

    #[test]
    fn test_full_run_emits_expected_artifact_set() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let report = generate_all(&config, &shop_resolver()).unwrap();

        assert_eq!(report.entities, vec!["Order", "Customer", "OrderItem"]);
        let base = dir.path().join("com/acme/shop");
        for expected in [
            "dto/PaginationRequestDto.java",
            "dto/BaseResponseDto.java",
            "dto/OrderDto.java",
            "dto/CustomerDto.java",
            "dto/OrderItemDto.java",
            "mapper/OrderMapper.java",
            "mapper/CustomerMapper.java",
            "mapper/OrderItemMapper.java",
            "repository/OrderRepository.java",
            "service/OrderService.java",
            "controller/OrderController.java",
        ] {
            assert!(base.join(expected).is_file(), "missing {}", expected);
        }

        // Scaffolding exists for the root only.
        assert!(!base.join("repository/CustomerRepository.java").exists());
        assert!(!base.join("service/OrderItemService.java").exists());
        assert!(report.skipped.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_second_run_without_overwrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let resolver = shop_resolver();

        let first = generate_all(&config, &resolver).unwrap();
        let dto_path = dir.path().join("com/acme/shop/dto/OrderDto.java");
        std::fs::write(&dto_path, "hand edited").unwrap();

        let second = generate_all(&config, &resolver).unwrap();

        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), first.written.len());
        assert_eq!(std::fs::read_to_string(&dto_path).unwrap(), "hand edited");
    }

    #[test]
    fn test_overwrite_replaces_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.overwrite = true;
        let resolver = shop_resolver();

        generate_all(&config, &resolver).unwrap();
        let dto_path = dir.path().join("com/acme/shop/dto/OrderDto.java");
        std::fs::write(&dto_path, "stale").unwrap();

        let report = generate_all(&config, &resolver).unwrap();

        assert!(report.skipped.is_empty());
        assert!(std::fs::read_to_string(&dto_path)
            .unwrap()
            .contains("public class OrderDto {"));
    }

    #[test]
    fn test_skip_flags_suppress_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.skip = SkipFlags {
            dto: true,
            controller: true,
            ..Default::default()
        };

        generate_all(&config, &shop_resolver()).unwrap();

        let base = dir.path().join("com/acme/shop");
        assert!(!base.join("dto").exists());
        assert!(!base.join("controller").exists());
        assert!(base.join("mapper/OrderMapper.java").is_file());
        assert!(base.join("service/OrderService.java").is_file());
    }

    #[test]
    fn test_unresolvable_root_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.root_entity = "Missing".to_string();

        let err = generate_all(&config, &shop_resolver()).unwrap_err();
        assert!(matches!(err, GenerateError::TypeNotFound { .. }));
        // Nothing was emitted.
        assert!(!dir.path().join("com").exists());
    }

    #[test]
    fn test_fallback_warnings_surface_in_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let resolver = StaticResolver::new()
            .with_entity(entity("Order", &[("tags", "Set<String>"), ("customer", "Customer")]))
            .with_entity(entity("Customer", &[("name", "String")]));

        let report = generate_all(&config, &resolver).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Order.tags"));
        // The run still completed.
        assert!(dir
            .path()
            .join("com/acme/shop/dto/OrderDto.java")
            .is_file());
    }
}
