//! Deterministic artifact naming.
//!
//! Pure functions from entity identity + artifact kind to class name,
//! package and output path. Collision-free as long as entity simple names
//! are unique within the generation root namespace; that assumption is a
//! documented limitation and is not validated here.

use std::path::{Path, PathBuf};

/// The kinds of companion artifacts a generation run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Dto,
    Mapper,
    Repository,
    Service,
    Controller,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Dto,
        ArtifactKind::Mapper,
        ArtifactKind::Repository,
        ArtifactKind::Service,
        ArtifactKind::Controller,
    ];

    /// Class-name suffix, e.g. `Dto` in `OrderDto`.
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Dto => "Dto",
            ArtifactKind::Mapper => "Mapper",
            ArtifactKind::Repository => "Repository",
            ArtifactKind::Service => "Service",
            ArtifactKind::Controller => "Controller",
        }
    }

    /// Package segment appended to the root namespace, e.g. `dto` in
    /// `com.acme.shop.dto`.
    pub fn package_segment(&self) -> &'static str {
        match self {
            ArtifactKind::Dto => "dto",
            ArtifactKind::Mapper => "mapper",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service",
            ArtifactKind::Controller => "controller",
        }
    }
}

/// `Order` + `Dto` -> `OrderDto`.
pub fn class_name(entity: &str, kind: ArtifactKind) -> String {
    format!("{}{}", entity, kind.suffix())
}

/// `com.acme.shop` + `Dto` -> `com.acme.shop.dto`.
pub fn package_name(root_namespace: &str, kind: ArtifactKind) -> String {
    format!("{}.{}", root_namespace, kind.package_segment())
}

/// Output path for an arbitrary class in a package:
/// `{output_root}/{package-as-path}/{ClassName}.java`.
pub fn class_file_path(output_root: &Path, package: &str, class_name: &str) -> PathBuf {
    let mut path = output_root.to_path_buf();
    for segment in package.split('.') {
        path.push(segment);
    }
    path.push(format!("{}.java", class_name));
    path
}

/// Output path for an entity's artifact of the given kind.
pub fn artifact_path(
    output_root: &Path,
    root_namespace: &str,
    entity: &str,
    kind: ArtifactKind,
) -> PathBuf {
    class_file_path(
        output_root,
        &package_name(root_namespace, kind),
        &class_name(entity, kind),
    )
}
