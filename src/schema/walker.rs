//! Entity graph discovery.
//!
//! Expands a root entity into the full set of entities reachable through
//! `EntityRef` / `ListOfEntity` / `MapValueEntity` fields. The registry is an
//! insertion-ordered map keyed by entity identity, so discovery order doubles
//! as the visited set; ownership stays acyclic even when the entity graph is
//! not.

use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::schema::introspect::introspect;
use crate::schema::resolver::EntityResolver;
use crate::schema::types::EntityDescriptor;
use indexmap::IndexMap;

/// Discover all entities reachable from `root`, root first, then each newly
/// discovered entity in first-encountered (pre-order, depth-first) order.
///
/// Each distinct identity appears exactly once no matter how many incoming
/// references it has, which also guarantees termination on mutually or
/// self-referencing entities.
pub fn discover(
    root: &str,
    resolver: &dyn EntityResolver,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<EntityDescriptor>, GenerateError> {
    let mut registry: IndexMap<String, EntityDescriptor> = IndexMap::new();

    let root_descriptor = introspect(root, resolver, diagnostics)?;
    let root_name = root_descriptor.name.clone();
    registry.insert(root_name.clone(), root_descriptor);

    expand(&root_name, resolver, &mut registry, diagnostics)?;

    Ok(registry.into_values().collect())
}

fn expand(
    entity: &str,
    resolver: &dyn EntityResolver,
    registry: &mut IndexMap<String, EntityDescriptor>,
    diagnostics: &mut Diagnostics,
) -> Result<(), GenerateError> {
    let targets: Vec<String> = registry[entity]
        .entity_targets()
        .into_iter()
        .map(String::from)
        .collect();

    for target in targets {
        if registry.contains_key(&target) {
            // Already visited: the edge still exists for dependency purposes
            // (it lives in the referencing descriptor) but is not re-walked.
            continue;
        }

        let descriptor = introspect(&target, resolver, diagnostics)
            .map_err(|e| e.referenced_by(entity))?;
        registry.insert(target.clone(), descriptor);

        // Depth-first: finish the new entity's own references before the
        // remaining siblings.
        expand(&target, resolver, registry, diagnostics)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resolver::StaticResolver;
    use crate::schema::types::{RawEntityDef, RawFieldDef};

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

    fn names(entities: &[EntityDescriptor]) -> Vec<&str> {
        entities.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_discovery_is_preorder_depth_first() {
        let resolver = StaticResolver::new()
            .with_entity(entity(
                "Order",
                &[
                    ("id", "Long"),
                    ("customer", "Customer"),
                    ("items", "List<OrderItem>"),
                ],
            ))
            .with_entity(entity("Customer", &[("address", "Address")]))
            .with_entity(entity("Address", &[("street", "String")]))
            .with_entity(entity("OrderItem", &[("sku", "String")]));
        let mut diagnostics = Diagnostics::new();

        let entities = discover("Order", &resolver, &mut diagnostics).unwrap();

        // Customer's own references come before the Order's later siblings.
        assert_eq!(names(&entities), vec!["Order", "Customer", "Address", "OrderItem"]);
    }

    #[test]
    fn test_each_entity_discovered_exactly_once() {
        // Customer is referenced from both Order and OrderItem.
        let resolver = StaticResolver::new()
            .with_entity(entity(
                "Order",
                &[("customer", "Customer"), ("items", "List<OrderItem>")],
            ))
            .with_entity(entity("Customer", &[("name", "String")]))
            .with_entity(entity("OrderItem", &[("buyer", "Customer")]));
        let mut diagnostics = Diagnostics::new();

        let entities = discover("Order", &resolver, &mut diagnostics).unwrap();
        assert_eq!(names(&entities), vec!["Order", "Customer", "OrderItem"]);
    }

    #[test]
    fn test_mutual_references_terminate() {
        let resolver = StaticResolver::new()
            .with_entity(entity("A", &[("b", "B")]))
            .with_entity(entity("B", &[("a", "A")]));
        let mut diagnostics = Diagnostics::new();

        let entities = discover("A", &resolver, &mut diagnostics).unwrap();
        assert_eq!(names(&entities), vec!["A", "B"]);
    }

    #[test]
    fn test_self_reference_terminates() {
        let resolver =
            StaticResolver::new().with_entity(entity("Category", &[("children", "List<Category>")]));
        let mut diagnostics = Diagnostics::new();

        let entities = discover("Category", &resolver, &mut diagnostics).unwrap();
        assert_eq!(names(&entities), vec!["Category"]);
    }

    #[test]
    fn test_map_value_entity_is_discovered_once() {
        // Address is reachable only through map values, from two entities.
        let resolver = StaticResolver::new()
            .with_entity(entity(
                "Customer",
                &[
                    ("name", "String"),
                    ("addresses", "Map<String, Address>"),
                    ("contacts", "List<Contact>"),
                ],
            ))
            .with_entity(entity("Contact", &[("home", "Map<String, Address>")]))
            .with_entity(entity("Address", &[("street", "String")]));
        let mut diagnostics = Diagnostics::new();

        let entities = discover("Customer", &resolver, &mut diagnostics).unwrap();
        assert_eq!(names(&entities), vec!["Customer", "Address", "Contact"]);
        assert!(diagnostics.warnings().is_empty());
    }

    #[test]
    fn test_unresolvable_reference_is_fatal() {
        let resolver = StaticResolver::new().with_entity(entity("Order", &[("customer", "Customer")]));
        let mut diagnostics = Diagnostics::new();

        let err = discover("Order", &resolver, &mut diagnostics).unwrap_err();
        match err {
            GenerateError::TypeNotFound {
                type_name,
                referenced_by,
            } => {
                assert_eq!(type_name, "Customer");
                assert_eq!(referenced_by.as_deref(), Some("Order"));
            }
            other => panic!("expected TypeNotFound, got {:?}", other),
        }
    }
}
