//! Memoized discovery of every type reachable from the entry points.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, info, trace};

use super::node::TypeNode;
use crate::error::{Error, Result};
use crate::metadata::{TypeIdentity, TypeMetadataProvider, TypeRef};

/// Visited identities plus the resolved nodes, in first-discovery order.
///
/// Owned by a single discovery run and threaded through every visit; the
/// visited check is what makes traversal terminate on cyclic graphs.
#[derive(Debug, Default)]
pub struct DiscoverySet {
    visited: HashSet<TypeIdentity>,
    discovered: IndexMap<TypeIdentity, TypeNode>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as visited. Returns `false` if it already was.
    pub fn visit(&mut self, id: &TypeIdentity) -> bool {
        self.visited.insert(id.clone())
    }

    fn record(&mut self, node: TypeNode) {
        self.discovered.insert(node.identity.clone(), node);
    }

    pub fn into_graph(self) -> TypeGraph {
        TypeGraph {
            nodes: self.discovered,
        }
    }
}

/// The closed, deduplicated set of types to emit.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: IndexMap<TypeIdentity, TypeNode>,
}

impl TypeGraph {
    /// Identities in first-discovery order.
    pub fn identities(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.nodes.keys()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.values()
    }

    pub fn node(&self, id: &TypeIdentity) -> Option<&TypeNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &TypeIdentity) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Where a reference was found, for error reporting.
#[derive(Debug, Clone)]
struct Origin {
    declaring_type: String,
    member: String,
}

impl Origin {
    fn entry_point(id: &TypeIdentity) -> Self {
        Self {
            declaring_type: id.to_string(),
            member: "<entry point>".to_string(),
        }
    }

    fn unresolved(&self, missing: &TypeIdentity) -> Error {
        Error::MetadataResolution {
            declaring_type: self.declaring_type.clone(),
            member: self.member.clone(),
            missing: missing.to_string(),
        }
    }
}

/// Discover every non-built-in type reachable from `entry_points`.
///
/// Pre-order depth-first walk: a type is recorded before anything it
/// references. Built-in types are never recorded or expanded, but the generic
/// arguments of a built-in handle are (`List<Widget>` surfaces `Widget`).
/// Closed generics are recorded under their open definition.
pub fn discover<P: TypeMetadataProvider + ?Sized>(
    entry_points: &[TypeIdentity],
    provider: &P,
) -> Result<TypeGraph> {
    let mut set = DiscoverySet::new();
    for entry in entry_points {
        visit_definition(provider, &mut set, entry, &Origin::entry_point(entry))?;
    }
    let graph = set.into_graph();
    info!(
        entry_points = entry_points.len(),
        types = graph.len(),
        "Type discovery complete."
    );
    Ok(graph)
}

fn visit_reference<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    set: &mut DiscoverySet,
    reference: &TypeRef,
    origin: &Origin,
) -> Result<()> {
    match reference {
        TypeRef::Param(_) => Ok(()),
        TypeRef::Array(inner) | TypeRef::Nullable(inner) => {
            visit_reference(provider, set, inner, origin)
        }
        TypeRef::Named { id, args } => {
            visit_definition(provider, set, id, origin)?;
            for arg in args {
                visit_reference(provider, set, arg, origin)?;
            }
            Ok(())
        }
    }
}

fn visit_definition<P: TypeMetadataProvider + ?Sized>(
    provider: &P,
    set: &mut DiscoverySet,
    id: &TypeIdentity,
    origin: &Origin,
) -> Result<()> {
    if !set.visit(id) {
        return Ok(());
    }
    if provider.is_builtin(id) {
        trace!(type_name = %id, "Skipping built-in type.");
        return Ok(());
    }

    let node = TypeNode::resolve(provider, id).ok_or_else(|| origin.unresolved(id))?;
    debug!(
        type_name = %id,
        kind = ?node.declared,
        referenced_by = %origin.declaring_type,
        "Discovered type."
    );

    let references: Vec<(TypeRef, Origin)> = node
        .references()
        .into_iter()
        .map(|(reference, member)| {
            (
                reference.clone(),
                Origin {
                    declaring_type: id.to_string(),
                    member,
                },
            )
        })
        .collect();
    set.record(node);

    for (reference, origin) in &references {
        visit_reference(provider, set, reference, origin)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::metadata::{ActionDef, HttpMethod, MetadataCatalog, TypeDefinition, TypeKind};

    fn names(graph: &TypeGraph) -> Vec<String> {
        graph.identities().map(|id| id.to_string()).collect()
    }

    fn shop_catalog() -> MetadataCatalog {
        MetadataCatalog::from_definitions([
            TypeDefinition::new("Shop.Api", "WidgetsController", TypeKind::Class)
                .with_base(TypeRef::simple("System.Web.Http.ApiController"))
                .with_action(ActionDef::new(
                    "GetWidgets",
                    HttpMethod::Get,
                    TypeRef::generic(
                        "System.Collections.Generic.List",
                        vec![TypeRef::simple("Shop.Models.Widget")],
                    ),
                )),
            TypeDefinition::new("Shop.Models", "Widget", TypeKind::Class)
                .with_property("Id", TypeRef::simple("System.Int32"))
                .with_property("Name", TypeRef::simple("System.String"))
                .with_property("Category", TypeRef::simple("Shop.Models.CategoryEnum")),
            TypeDefinition::new("Shop.Models", "CategoryEnum", TypeKind::Enum)
                .with_members(&["Tools", "Toys"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_controller_scenario() {
        let catalog = shop_catalog();
        let graph = discover(&catalog.entry_points(), &catalog).unwrap();
        assert_eq!(
            names(&graph),
            [
                "Shop.Api.WidgetsController",
                "Shop.Models.Widget",
                "Shop.Models.CategoryEnum"
            ]
        );
    }

    #[test]
    fn test_discovery_is_order_stable() {
        let catalog = shop_catalog();
        let first = discover(&catalog.entry_points(), &catalog).unwrap();
        let second = discover(&catalog.entry_points(), &catalog).unwrap();
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_cycle_terminates_and_deduplicates() {
        let catalog = MetadataCatalog::from_definitions([
            TypeDefinition::new("Graph", "A", TypeKind::Class)
                .with_property("B", TypeRef::simple("Graph.B")),
            TypeDefinition::new("Graph", "B", TypeKind::Class)
                .with_property("A", TypeRef::simple("Graph.A"))
                .with_property("Self", TypeRef::simple("Graph.B")),
        ])
        .unwrap();

        let graph = discover(&[TypeIdentity::new("Graph", "A", 0)], &catalog).unwrap();
        assert_eq!(names(&graph), ["Graph.A", "Graph.B"]);
    }

    #[test]
    fn test_generic_instantiations_collapse() {
        let catalog = MetadataCatalog::from_definitions([
            TypeDefinition::new("Shop", "Catalog", TypeKind::Class)
                .with_property(
                    "Widgets",
                    TypeRef::generic("Shop.Paged", vec![TypeRef::simple("Shop.Widget")]),
                )
                .with_property(
                    "Orders",
                    TypeRef::generic("Shop.Paged", vec![TypeRef::simple("Shop.Order")]),
                ),
            TypeDefinition::new("Shop", "Paged", TypeKind::Class)
                .with_generic_parameters(&["T"])
                .with_property("Items", TypeRef::array(TypeRef::Param(0))),
            TypeDefinition::new("Shop", "Widget", TypeKind::Class),
            TypeDefinition::new("Shop", "Order", TypeKind::Class),
        ])
        .unwrap();

        let graph = discover(&[TypeIdentity::new("Shop", "Catalog", 0)], &catalog).unwrap();
        assert_eq!(
            names(&graph),
            ["Shop.Catalog", "Shop.Paged`1", "Shop.Widget", "Shop.Order"]
        );
    }

    #[test]
    fn test_builtin_generic_arguments_are_expanded() {
        let catalog = MetadataCatalog::from_definitions([
            TypeDefinition::new("Shop", "Index", TypeKind::Class).with_property(
                "ByName",
                "System.Collections.Generic.Dictionary<System.String, System.Collections.Generic.List<Shop.Widget>>"
                    .parse()
                    .unwrap(),
            ),
            TypeDefinition::new("Shop", "Widget", TypeKind::Class),
        ])
        .unwrap();

        let graph = discover(&[TypeIdentity::new("Shop", "Index", 0)], &catalog).unwrap();
        assert_eq!(names(&graph), ["Shop.Index", "Shop.Widget"]);
    }

    #[test]
    fn test_base_type_chain_is_followed() {
        let catalog = MetadataCatalog::from_definitions([
            TypeDefinition::new("Shop", "Widget", TypeKind::Class)
                .with_base(TypeRef::simple("Shop.Product")),
            TypeDefinition::new("Shop", "Product", TypeKind::Class)
                .with_base(TypeRef::simple("Shop.Entity")),
            TypeDefinition::new("Shop", "Entity", TypeKind::Class)
                .with_base(TypeRef::simple("System.Object")),
        ])
        .unwrap();

        let graph = discover(&[TypeIdentity::new("Shop", "Widget", 0)], &catalog).unwrap();
        assert_eq!(names(&graph), ["Shop.Widget", "Shop.Product", "Shop.Entity"]);
    }

    #[test]
    fn test_missing_metadata_names_the_property() {
        let catalog = MetadataCatalog::from_definitions([TypeDefinition::new(
            "Shop",
            "Widget",
            TypeKind::Class,
        )
        .with_property("Supplier", TypeRef::simple("Vendor.Supplier"))])
        .unwrap();

        let err = discover(&[TypeIdentity::new("Shop", "Widget", 0)], &catalog).unwrap_err();
        match err {
            Error::MetadataResolution {
                declaring_type,
                member,
                missing,
            } => {
                assert_eq!(declaring_type, "Shop.Widget");
                assert_eq!(member, "Supplier");
                assert_eq!(missing, "Vendor.Supplier");
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_entry_point() {
        let catalog = MetadataCatalog::new();
        let err = discover(&[TypeIdentity::new("Shop", "Ghost", 0)], &catalog).unwrap_err();
        assert!(err.to_string().contains("entry point"));
    }

    #[test]
    fn test_discovery_set_visit() {
        let mut set = DiscoverySet::new();
        let id = TypeIdentity::new("Shop", "Widget", 0);
        assert!(set.visit(&id));
        assert!(!set.visit(&id));
        assert!(set.visit(&TypeIdentity::new("Shop", "Widget", 1)));
    }
}
