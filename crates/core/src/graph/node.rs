//! Resolved shape of one discovered type.

use crate::metadata::{ActionDef, PropertyDef, TypeIdentity, TypeKind, TypeMetadataProvider, TypeRef};

/// Everything the writers need to know about one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub identity: TypeIdentity,
    pub declared: TypeKind,
    pub is_entry_point_container: bool,
    /// Placeholder name for each generic parameter position.
    pub generic_parameters: Vec<String>,
    pub base_type: Option<TypeRef>,
    pub properties: Vec<PropertyDef>,
    pub enum_members: Vec<String>,
    pub actions: Vec<ActionDef>,
}

impl TypeNode {
    /// Resolve a node from the provider; `None` when the type has no metadata.
    pub fn resolve<P: TypeMetadataProvider + ?Sized>(
        provider: &P,
        id: &TypeIdentity,
    ) -> Option<Self> {
        let declared = provider.kind(id)?;
        let declared_names = provider.generic_parameters(id);
        let generic_parameters = (0..id.arity())
            .map(|position| match declared_names.get(position) {
                Some(name) if !name.trim().is_empty() => name.clone(),
                _ => format!("T{position}"),
            })
            .collect();

        Some(Self {
            identity: id.clone(),
            declared,
            is_entry_point_container: provider.is_entry_point_container(id),
            generic_parameters,
            base_type: provider.base_type(id),
            properties: provider.properties(id),
            enum_members: provider.enum_members(id),
            actions: provider.actions(id),
        })
    }

    /// Outgoing references, each labelled with the member it comes from.
    ///
    /// Controllers contribute their action signatures only; every other type
    /// contributes its base type followed by its properties.
    pub fn references(&self) -> Vec<(&TypeRef, String)> {
        if self.is_entry_point_container {
            let mut refs = Vec::new();
            for action in &self.actions {
                refs.push((&action.returns, format!("{}() return", action.name)));
                for param in &action.parameters {
                    refs.push((&param.ty, format!("{}({})", action.name, param.name)));
                }
            }
            return refs;
        }

        self.base_type
            .iter()
            .map(|base| (base, "base type".to_string()))
            .chain(self.properties.iter().map(|p| (&p.ty, p.name.clone())))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::metadata::{HttpMethod, MetadataCatalog, TypeDefinition};

    #[test]
    fn test_generic_placeholders_default_by_position() {
        let mut definition = TypeDefinition::new("Shop", "Pair", TypeKind::Class)
            .with_generic_parameters(&["TKey", ""]);
        definition.generic_parameters.push(String::new());
        let catalog = MetadataCatalog::from_definitions([definition]).unwrap();

        let node = TypeNode::resolve(&catalog, &TypeIdentity::new("Shop", "Pair", 3)).unwrap();
        assert_eq!(node.generic_parameters, ["TKey", "T1", "T2"]);
    }

    #[test]
    fn test_model_references_base_then_properties() {
        let catalog = MetadataCatalog::from_definitions([TypeDefinition::new(
            "Shop",
            "Widget",
            TypeKind::Class,
        )
        .with_base(TypeRef::simple("Shop.Entity"))
        .with_property("Name", TypeRef::simple("System.String"))])
        .unwrap();

        let node = TypeNode::resolve(&catalog, &TypeIdentity::new("Shop", "Widget", 0)).unwrap();
        let members: Vec<_> = node.references().into_iter().map(|(_, m)| m).collect();
        assert_eq!(members, ["base type", "Name"]);
    }

    #[test]
    fn test_controller_references_actions_only() {
        let catalog = MetadataCatalog::from_definitions([TypeDefinition::new(
            "Shop",
            "OrdersController",
            TypeKind::Class,
        )
        .with_base(TypeRef::simple("System.Web.Http.ApiController"))
        .with_action(
            ActionDef::new("Get", HttpMethod::Get, TypeRef::simple("Shop.Order"))
                .with_parameter("id", TypeRef::simple("System.Int32")),
        )])
        .unwrap();

        let node =
            TypeNode::resolve(&catalog, &TypeIdentity::new("Shop", "OrdersController", 0)).unwrap();
        let members: Vec<_> = node.references().into_iter().map(|(_, m)| m).collect();
        assert_eq!(members, ["Get() return", "Get(id)"]);
    }

    #[test]
    fn test_unresolvable_type() {
        let catalog = MetadataCatalog::new();
        assert!(TypeNode::resolve(&catalog, &TypeIdentity::new("Shop", "Ghost", 0)).is_none());
    }
}
