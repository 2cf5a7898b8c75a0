//! DTO synthesis: one mirrored shape per entity.
//!
//! The mirror keeps the source field list, order included, and substitutes
//! entity-typed fields with references to sibling mirrors. Entity-ref fields
//! are tagged cycle-sensitive, because the mirror graph can be cyclic; the
//! rendered Java suppresses naive recursive serialization of those fields
//! with `@JsonIgnore`. There is no recursion here: one entity in, one shape
//! out, de-duplication is the walker's job.

use crate::generator::naming::{self, ArtifactKind};
use crate::schema::types::{EntityDescriptor, FieldKind};
use std::collections::BTreeSet;

/// Mirrored data shape of one entity.
#[derive(Debug, Clone)]
pub struct MirroredShape {
    pub entity: String,
    pub class_name: String,
    pub fields: Vec<MirrorField>,
}

/// One field of a mirrored shape, already rewritten to mirror identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorField {
    pub name: String,
    /// Rendered Java type, e.g. `Long`, `CustomerDto`, `List<OrderItemDto>`.
    pub java_type: String,
    /// Single entity reference whose recursive serialization must be
    /// suppressed in the rendered mirror.
    pub cycle_sensitive: bool,
}

/// Build the mirrored shape for one introspected entity.
pub fn synthesize_dto(entity: &EntityDescriptor) -> MirroredShape {
    let fields = entity
        .fields
        .iter()
        .map(|field| {
            let (java_type, cycle_sensitive) = match &field.kind {
                FieldKind::Scalar | FieldKind::ScalarCollection => {
                    (field.declared_type.clone(), false)
                }
                FieldKind::EntityRef { target } => {
                    (naming::class_name(target, ArtifactKind::Dto), true)
                }
                FieldKind::ListOfEntity { target } => (
                    format!("List<{}>", naming::class_name(target, ArtifactKind::Dto)),
                    false,
                ),
                FieldKind::MapValueEntity { key_type, target } => (
                    format!(
                        "Map<{}, {}>",
                        key_type,
                        naming::class_name(target, ArtifactKind::Dto)
                    ),
                    false,
                ),
            };
            MirrorField {
                name: field.name.clone(),
                java_type,
                cycle_sensitive,
            }
        })
        .collect();

    MirroredShape {
        entity: entity.name.clone(),
        class_name: naming::class_name(&entity.name, ArtifactKind::Dto),
        fields,
    }
}

/// Render a mirrored shape as a Lombok data class.
pub fn render_dto(shape: &MirroredShape, root_namespace: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "package {};\n\n",
        naming::package_name(root_namespace, ArtifactKind::Dto)
    ));

    if shape.fields.iter().any(|f| f.cycle_sensitive) {
        out.push_str("import com.fasterxml.jackson.annotation.JsonIgnore;\n");
    }
    out.push_str("import lombok.Data;\n");
    out.push_str("import lombok.RequiredArgsConstructor;\n");

    let java_imports = collect_java_imports(shape);
    if !java_imports.is_empty() {
        out.push('\n');
        for import in &java_imports {
            out.push_str(&format!("import {};\n", import));
        }
    }

    out.push_str(&format!(
        "\n@RequiredArgsConstructor\n@Data\npublic class {} {{\n",
        shape.class_name
    ));

    for field in &shape.fields {
        out.push('\n');
        if field.cycle_sensitive {
            out.push_str("    @JsonIgnore\n");
        }
        out.push_str(&format!("    private {} {};\n", field.java_type, field.name));
    }

    out.push_str("}\n");
    out
}

/// Shared request wrapper for paginated list endpoints, rendered once per
/// run into the dto package.
pub fn render_pagination_request_dto(root_namespace: &str) -> String {
    let package = naming::package_name(root_namespace, ArtifactKind::Dto);
    format!(
        r#"package {package};

import lombok.Data;
import lombok.RequiredArgsConstructor;
import org.springframework.data.domain.PageRequest;

@RequiredArgsConstructor
@Data
public class PaginationRequestDto {{

    private Integer pageNumber = 0;

    private Integer pageSize = 10;

    public PageRequest toPageRequest() {{
        return PageRequest.of(pageNumber, pageSize);
    }}
}}
"#
    )
}

/// Shared generic response envelope, rendered once per run into the dto
/// package.
pub fn render_base_response_dto(root_namespace: &str) -> String {
    let package = naming::package_name(root_namespace, ArtifactKind::Dto);
    format!(
        r#"package {package};

import lombok.AllArgsConstructor;
import lombok.Data;

@AllArgsConstructor
@Data
public class BaseResponseDto<T> {{

    private Boolean success = true;

    private String message;

    private T data;

    public BaseResponseDto(T data) {{
        this.data = data;
        this.success = true;
    }}
}}
"#
    )
}

/// Imports needed by the mirrored field types, sorted. Sibling DTOs live in
/// the same package and need none.
fn collect_java_imports(shape: &MirroredShape) -> BTreeSet<&'static str> {
    const KNOWN: &[(&str, &str)] = &[
        ("List", "java.util.List"),
        ("Map", "java.util.Map"),
        ("Set", "java.util.Set"),
        ("Date", "java.util.Date"),
        ("UUID", "java.util.UUID"),
        ("BigDecimal", "java.math.BigDecimal"),
        ("BigInteger", "java.math.BigInteger"),
        ("LocalDate", "java.time.LocalDate"),
        ("LocalDateTime", "java.time.LocalDateTime"),
        ("LocalTime", "java.time.LocalTime"),
        ("Instant", "java.time.Instant"),
        ("OffsetDateTime", "java.time.OffsetDateTime"),
        ("ZonedDateTime", "java.time.ZonedDateTime"),
        ("Duration", "java.time.Duration"),
    ];

    let mut imports = BTreeSet::new();
    for field in &shape.fields {
        let tokens: BTreeSet<&str> = field
            .java_type
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| !t.is_empty())
            .collect();
        for (token, import) in KNOWN {
            if tokens.contains(token) {
                imports.insert(*import);
            }
        }
    }
    imports
}
