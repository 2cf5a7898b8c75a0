//! crudgen CLI - schema-driven CRUD scaffolding generation
//!
//! Generates Java/Spring DTOs, mappers and CRUD scaffolding from YAML entity
//! definitions.

use clap::{Parser, Subcommand};
use crudgen::{
    generate_all, parse_mapper_strategy, GenerationConfig, SkipFlags, YamlEntityResolver,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version, about = "Schema-driven CRUD scaffolding generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DTOs, mappers and CRUD scaffolding from a schema directory
    Generate {
        /// Path to a crudgen.yaml configuration file; CLI flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Simple name of the root entity (e.g. Order)
        #[arg(long)]
        root_entity: Option<String>,

        /// Root package for generated artifacts (e.g. com.acme.shop)
        #[arg(long)]
        root_namespace: Option<String>,

        /// Directory containing YAML entity definitions
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Root of the emitted source tree
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mapper strategy (structural, reflective)
        #[arg(short, long)]
        mapper: Option<String>,

        /// Replace existing files instead of leaving them untouched
        #[arg(long)]
        overwrite: bool,

        /// Skip DTO generation
        #[arg(long)]
        skip_dto: bool,

        /// Skip mapper generation
        #[arg(long)]
        skip_mapper: bool,

        /// Skip repository generation
        #[arg(long)]
        skip_repository: bool,

        /// Skip service generation
        #[arg(long)]
        skip_service: bool,

        /// Skip controller generation
        #[arg(long)]
        skip_controller: bool,
    },

    /// Validate configuration and schema without generating code
    Validate {
        /// Path to a crudgen.yaml configuration file
        #[arg(short, long, default_value = "crudgen.yaml")]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            root_entity,
            root_namespace,
            schema,
            output,
            mapper,
            overwrite,
            skip_dto,
            skip_mapper,
            skip_repository,
            skip_service,
            skip_controller,
        } => {
            let skip = SkipFlags {
                dto: skip_dto,
                mapper: skip_mapper,
                repository: skip_repository,
                service: skip_service,
                controller: skip_controller,
            };
            run_generate(
                config,
                root_entity,
                root_namespace,
                schema,
                output,
                mapper,
                overwrite,
                skip,
            )
        }
        Commands::Validate { config } => run_validate(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Assemble the effective configuration: file values first, CLI overrides on
/// top. Without a file, root entity and namespace must come from flags.
#[allow(clippy::too_many_arguments)]
fn build_config(
    config_file: Option<PathBuf>,
    root_entity: Option<String>,
    root_namespace: Option<String>,
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    mapper: Option<String>,
    overwrite: bool,
    skip: SkipFlags,
) -> Result<GenerationConfig, String> {
    let mut config = match config_file {
        Some(path) => {
            println!("📋 Loading configuration from {}...", path.display());
            let mut config = GenerationConfig::from_file(&path)?;
            if let Some(root_entity) = root_entity {
                config.root_entity = root_entity;
            }
            if let Some(root_namespace) = root_namespace {
                config.root_namespace = root_namespace;
            }
            config
        }
        None => {
            let root_entity = root_entity
                .ok_or("--root-entity is required when no config file is given")?;
            let root_namespace = root_namespace
                .ok_or("--root-namespace is required when no config file is given")?;
            GenerationConfig::with_root(root_entity, root_namespace)
        }
    };
    if let Some(schema) = schema {
        config.schema_dir = schema;
    }
    if let Some(output) = output {
        config.output_root = output;
    }
    if let Some(mapper) = mapper {
        config.mapper = parse_mapper_strategy(&mapper)?;
    }
    if overwrite {
        config.overwrite = true;
    }
    config.skip.dto |= skip.dto;
    config.skip.mapper |= skip.mapper;
    config.skip.repository |= skip.repository;
    config.skip.service |= skip.service;
    config.skip.controller |= skip.controller;

    config.validate()?;
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    config_file: Option<PathBuf>,
    root_entity: Option<String>,
    root_namespace: Option<String>,
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    mapper: Option<String>,
    overwrite: bool,
    skip: SkipFlags,
) -> Result<(), String> {
    let config = build_config(
        config_file,
        root_entity,
        root_namespace,
        schema,
        output,
        mapper,
        overwrite,
        skip,
    )?;

    println!("🚀 Starting CRUD generation for entity: {}", config.root_entity);

    let resolver = YamlEntityResolver::from_dir(&config.schema_dir)?;
    println!(
        "  ✓ Loaded {} entity definitions from {}",
        resolver.len(),
        config.schema_dir.display()
    );

    let report = generate_all(&config, &resolver).map_err(|e| e.to_string())?;

    println!(
        "  ✓ Discovered {} entities: {}",
        report.entities.len(),
        report.entities.join(", ")
    );
    for path in &report.written {
        println!("  ✓ Wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("  ℹ Skipped existing {}", path.display());
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }

    println!("🎉 CRUD generation completed successfully!");
    Ok(())
}

fn run_validate(config_file: PathBuf) -> Result<(), String> {
    println!("🔍 Validating {}...", config_file.display());

    let config = GenerationConfig::from_file(&config_file)?;
    config.validate()?;
    println!("  ✓ Configuration is valid");

    let resolver = YamlEntityResolver::from_dir(&config.schema_dir)?;
    println!(
        "  ✓ Loaded {} entity definitions from {}",
        resolver.len(),
        config.schema_dir.display()
    );

    // Walk the graph without emitting anything so unresolvable references
    // surface here instead of halfway through a generation.
    let mut diagnostics = crudgen::Diagnostics::new();
    let entities = crudgen::discover(&config.root_entity, &resolver, &mut diagnostics)
        .map_err(|e| e.to_string())?;
    println!(
        "  ✓ {} entities reachable from {}: {}",
        entities.len(),
        config.root_entity,
        entities
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for warning in diagnostics.warnings() {
        println!("  ⚠ {}", warning);
    }

    println!("✨ Validation complete!");
    Ok(())
}
