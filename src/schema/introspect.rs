//! Schema introspection: classify declared field types into structural kinds.
//!
//! Classification is a pure, total function of the declared type text. It
//! never fails: shapes it cannot understand fall back to
//! [`FieldKind::ScalarCollection`] with a warning, which downstream stages
//! pass through unchanged. The fallback is intentionally preserved as-is;
//! emitted artifacts may depend on the exact shape it produces.

use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::schema::resolver::EntityResolver;
use crate::schema::types::{EntityDescriptor, FieldDescriptor, FieldKind, RawFieldDef};

/// Built-in value types that never count as entity references. Mirrors the
/// "declared in a java.* package" rule of reflective introspection.
const BUILTIN_TYPES: &[&str] = &[
    "String",
    "Boolean",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "Character",
    "boolean",
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "char",
    "BigDecimal",
    "BigInteger",
    "Date",
    "LocalDate",
    "LocalTime",
    "LocalDateTime",
    "Instant",
    "OffsetDateTime",
    "ZonedDateTime",
    "Duration",
    "UUID",
    "Object",
];

/// Whether a simple type name denotes a built-in value type.
pub fn is_builtin(type_name: &str) -> bool {
    let name = type_name.trim();
    name.starts_with("java.") || name.ends_with("[]") || BUILTIN_TYPES.contains(&name)
}

/// Resolve and classify an entity type.
///
/// Fatal when the resolver does not know the type; there is no
/// partial-schema mode.
pub fn introspect(
    type_name: &str,
    resolver: &dyn EntityResolver,
    diagnostics: &mut Diagnostics,
) -> Result<EntityDescriptor, GenerateError> {
    let raw = resolver
        .resolve(type_name)
        .ok_or_else(|| GenerateError::TypeNotFound {
            type_name: type_name.to_string(),
            referenced_by: None,
        })?;

    let fields = raw
        .fields
        .iter()
        .map(|field| classify_field(&raw.name, field, diagnostics))
        .collect();

    Ok(EntityDescriptor {
        name: raw.name.clone(),
        namespace: raw.namespace.clone(),
        fields,
    })
}

/// Classify one declared field, in isolation.
pub fn classify_field(
    entity_name: &str,
    field: &RawFieldDef,
    diagnostics: &mut Diagnostics,
) -> FieldDescriptor {
    let declared = field.declared_type.trim();

    let kind = match split_generic(declared) {
        Some((raw, args)) => classify_parameterized(entity_name, field, raw, &args, diagnostics),
        // Unbalanced angle brackets are malformed, not an entity name.
        None if declared.contains('<') || declared.contains('>') => {
            fallback(entity_name, field, diagnostics)
        }
        None if !is_builtin(declared) => FieldKind::EntityRef {
            target: declared.to_string(),
        },
        None => FieldKind::Scalar,
    };

    FieldDescriptor {
        name: field.name.clone(),
        declared_type: declared.to_string(),
        kind,
    }
}

fn classify_parameterized(
    entity_name: &str,
    field: &RawFieldDef,
    raw: &str,
    args: &[&str],
    diagnostics: &mut Diagnostics,
) -> FieldKind {
    if raw == "List" && args.len() == 1 {
        let element = args[0].trim();
        if is_simple_name(element) && !is_builtin(element) {
            return FieldKind::ListOfEntity {
                target: element.to_string(),
            };
        }
    }

    if raw == "Map" && args.len() == 2 {
        let key = args[0].trim();
        let value = args[1].trim();
        // Entity-keyed maps are not supported; only built-in keys qualify.
        if is_builtin(key) && is_simple_name(value) && !is_builtin(value) {
            return FieldKind::MapValueEntity {
                key_type: key.to_string(),
                target: value.to_string(),
            };
        }
    }

    fallback(entity_name, field, diagnostics)
}

/// Everything unclassifiable is treated as an opaque scalar collection and
/// passed through unchanged.
fn fallback(entity_name: &str, field: &RawFieldDef, diagnostics: &mut Diagnostics) -> FieldKind {
    diagnostics.warn(format!(
        "Field '{}.{}' has unsupported shape '{}'; treating it as a scalar collection",
        entity_name, field.name, field.declared_type
    ));
    FieldKind::ScalarCollection
}

/// Split `Raw<A, B>` into `("Raw", ["A", "B"])`, honoring nested angle
/// brackets. Returns `None` for non-parameterized types.
fn split_generic(declared: &str) -> Option<(&str, Vec<&str>)> {
    let open = declared.find('<')?;
    let inner = declared.strip_suffix('>')?.get(open + 1..)?;

    let raw = declared[..open].trim();
    if raw.is_empty() || inner.trim().is_empty() {
        return None;
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(inner[start..].trim());

    Some((raw, args))
}

/// A bare type name with no generic arguments of its own.
fn is_simple_name(type_name: &str) -> bool {
    !type_name.is_empty() && !type_name.contains('<') && !type_name.contains(',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resolver::StaticResolver;
    use crate::schema::types::RawEntityDef;

    fn classify(declared: &str) -> (FieldKind, usize) {
        let mut diagnostics = Diagnostics::new();
        let field = RawFieldDef {
            name: "f".to_string(),
            declared_type: declared.to_string(),
            doc: None,
        };
        let descriptor = classify_field("Test", &field, &mut diagnostics);
        (descriptor.kind, diagnostics.warnings().len())
    }

    #[test]
    fn test_scalar_classification() {
        assert_eq!(classify("Long"), (FieldKind::Scalar, 0));
        assert_eq!(classify("String"), (FieldKind::Scalar, 0));
        assert_eq!(classify("BigDecimal"), (FieldKind::Scalar, 0));
        assert_eq!(classify("byte[]"), (FieldKind::Scalar, 0));
        assert_eq!(classify("java.sql.Timestamp"), (FieldKind::Scalar, 0));
    }

    #[test]
    fn test_entity_ref_classification() {
        assert_eq!(
            classify("Customer"),
            (
                FieldKind::EntityRef {
                    target: "Customer".to_string()
                },
                0
            )
        );
    }

    #[test]
    fn test_list_of_entity_classification() {
        assert_eq!(
            classify("List<OrderItem>"),
            (
                FieldKind::ListOfEntity {
                    target: "OrderItem".to_string()
                },
                0
            )
        );
    }

    #[test]
    fn test_map_value_entity_keeps_key_verbatim() {
        assert_eq!(
            classify("Map<String, Address>"),
            (
                FieldKind::MapValueEntity {
                    key_type: "String".to_string(),
                    target: "Address".to_string()
                },
                0
            )
        );
    }

    #[test]
    fn test_scalar_collections_fall_back_with_warning() {
        assert_eq!(classify("List<String>"), (FieldKind::ScalarCollection, 1));
        assert_eq!(classify("Set<OrderItem>"), (FieldKind::ScalarCollection, 1));
        assert_eq!(
            classify("Map<String, String>"),
            (FieldKind::ScalarCollection, 1)
        );
    }

    #[test]
    fn test_entity_keyed_map_falls_back_with_warning() {
        assert_eq!(
            classify("Map<Customer, Address>"),
            (FieldKind::ScalarCollection, 1)
        );
    }

    #[test]
    fn test_malformed_generic_falls_back_with_warning() {
        assert_eq!(classify("List<OrderItem"), (FieldKind::ScalarCollection, 1));
        assert_eq!(classify("OrderItem>"), (FieldKind::ScalarCollection, 1));
    }

    #[test]
    fn test_nested_generics_fall_back_with_warning() {
        assert_eq!(
            classify("List<Map<String, Payment>>"),
            (FieldKind::ScalarCollection, 1)
        );
        assert_eq!(
            classify("Map<List<String>, Payment>"),
            (FieldKind::ScalarCollection, 1)
        );
    }

    #[test]
    fn test_split_generic_handles_nesting() {
        let (raw, args) = split_generic("Map<String, List<Long>>").unwrap();
        assert_eq!(raw, "Map");
        assert_eq!(args, vec!["String", "List<Long>"]);

        assert!(split_generic("Long").is_none());
    }

    #[test]
    fn test_introspect_unknown_type_is_fatal() {
        let resolver = StaticResolver::new();
        let mut diagnostics = Diagnostics::new();

        let err = introspect("Order", &resolver, &mut diagnostics).unwrap_err();
        assert!(matches!(err, GenerateError::TypeNotFound { .. }));
    }

    #[test]
    fn test_introspect_preserves_field_order() {
        let resolver = StaticResolver::new().with_entity(RawEntityDef {
            name: "Order".to_string(),
            namespace: None,
            doc: None,
            fields: vec![
                RawFieldDef {
                    name: "id".to_string(),
                    declared_type: "Long".to_string(),
                    doc: None,
                },
                RawFieldDef {
                    name: "customer".to_string(),
                    declared_type: "Customer".to_string(),
                    doc: None,
                },
            ],
        });
        let mut diagnostics = Diagnostics::new();

        let descriptor = introspect("Order", &resolver, &mut diagnostics).unwrap();
        let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "customer"]);
    }
}
