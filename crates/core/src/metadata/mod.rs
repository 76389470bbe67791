//! Type metadata consumed by the generator.
//!
//! This module defines the metadata model and the provider seam:
//! - `TypeIdentity`: open type definition key (namespace, name, arity)
//! - `TypeRef`: a type as it appears at a use site (closed generics, arrays, nullables)
//! - `TypeMetadataProvider`: the only dependency the core has on the host platform
//!
//! ## Module Structure
//!
//! - `type_ref`: textual syntax for `TypeRef` (parse + display)
//! - `builtin`: shapes of the platform's built-in library types
//! - `catalog`: JSON catalog of pre-extracted metadata implementing the provider

mod builtin;
mod catalog;
mod type_ref;

use std::fmt;

use serde::Deserialize;

pub use builtin::{BuiltinShape, builtin_shape};
pub use catalog::{MetadataCatalog, TypeDefinition};
pub use type_ref::TypeRef;

/// Identity of an open type definition.
///
/// Closed generic instantiations (`Paged<Widget>`, `Paged<Order>`) share the
/// identity of their definition (``Shop.Paged`1``).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity {
    namespace: String,
    name: String,
    arity: usize,
}

impl TypeIdentity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            arity,
        }
    }

    /// Build an identity from a dotted name such as `Shop.Models.Widget`.
    pub fn from_qualified(qualified: &str, arity: usize) -> Self {
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name, arity),
            None => Self::new("", qualified, arity),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// `Namespace.Name`, without the generic arity marker.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Whether the type belongs to the host platform's built-in library.
    pub fn is_system(&self) -> bool {
        self.namespace == "System" || self.namespace.starts_with("System.")
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())?;
        if self.arity > 0 {
            write!(f, "`{}", self.arity)?;
        }
        Ok(())
    }
}

/// Declared kind of a type, as reported by the metadata source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive,
    Enum,
    Struct,
    Class,
    Interface,
    Delegate,
}

impl TypeKind {
    /// Value types: primitives, enums and structs.
    pub fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Primitive | TypeKind::Enum | TypeKind::Struct)
    }
}

/// HTTP verb of a controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// All verbs, in the order the REST contract declares them.
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the request body rather than the query string.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// Public instance property of a type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Parameterized accessors are never part of a shape.
    #[serde(default)]
    pub indexer: bool,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            indexer: false,
        }
    }
}

/// Named parameter of a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// HTTP action exposed by a controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    pub name: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Explicit route; defaults to `/{Controller}/{Action}`.
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default = "TypeRef::void")]
    pub returns: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
}

impl ActionDef {
    pub fn new(name: impl Into<String>, method: HttpMethod, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            method,
            route: None,
            returns,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDef::new(name, ty));
        self
    }
}

/// Source of type metadata.
///
/// `kind` is the resolution gate: a type whose kind is `None` cannot be
/// resolved, and callers turn that into a `MetadataResolution` error carrying
/// the referencing member. The remaining accessors are only consulted for
/// resolvable types and return empty values otherwise.
pub trait TypeMetadataProvider {
    /// Exported API controllers, in declaration order.
    fn entry_points(&self) -> Vec<TypeIdentity>;

    fn kind(&self, id: &TypeIdentity) -> Option<TypeKind>;

    /// Declared generic parameter names, one per arity position.
    fn generic_parameters(&self, id: &TypeIdentity) -> Vec<String>;

    fn base_type(&self, id: &TypeIdentity) -> Option<TypeRef>;

    /// Public instance properties, indexers excluded.
    fn properties(&self, id: &TypeIdentity) -> Vec<PropertyDef>;

    fn enum_members(&self, id: &TypeIdentity) -> Vec<String>;

    fn is_entry_point_container(&self, id: &TypeIdentity) -> bool;

    fn actions(&self, id: &TypeIdentity) -> Vec<ActionDef>;

    fn is_builtin(&self, id: &TypeIdentity) -> bool {
        id.is_system()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        assert_eq!(
            TypeIdentity::new("Shop.Models", "Widget", 0).to_string(),
            "Shop.Models.Widget"
        );
        assert_eq!(
            TypeIdentity::new("Shop.Models", "Paged", 1).to_string(),
            "Shop.Models.Paged`1"
        );
        assert_eq!(TypeIdentity::new("", "Loose", 0).to_string(), "Loose");
    }

    #[test]
    fn test_from_qualified() {
        let id = TypeIdentity::from_qualified("System.Collections.Generic.List", 1);
        assert_eq!(id.namespace(), "System.Collections.Generic");
        assert_eq!(id.name(), "List");
        assert_eq!(id.arity(), 1);
        assert!(id.is_system());
    }

    #[test]
    fn test_is_system() {
        assert!(TypeIdentity::new("System", "String", 0).is_system());
        assert!(TypeIdentity::new("System.Web.Http", "ApiController", 0).is_system());
        assert!(!TypeIdentity::new("Systems.Inventory", "Part", 0).is_system());
        assert!(!TypeIdentity::new("Shop", "System", 0).is_system());
    }

    #[test]
    fn test_value_types() {
        assert!(TypeKind::Enum.is_value_type());
        assert!(TypeKind::Struct.is_value_type());
        assert!(!TypeKind::Class.is_value_type());
        assert!(!TypeKind::Interface.is_value_type());
    }
}
