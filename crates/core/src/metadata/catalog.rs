//! JSON catalogs of pre-extracted type metadata.
//!
//! One catalog document describes the exported types of one compiled input:
//!
//! ```json
//! { "types": [
//!     { "namespace": "Shop.Models", "name": "Widget", "kind": "class",
//!       "properties": [ { "name": "Id", "type": "System.Int32" } ] }
//! ] }
//! ```
//!
//! Several documents merge into a single provider, the same way a run loads
//! every binary found next to its inputs.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    ActionDef, PropertyDef, TypeIdentity, TypeKind, TypeMetadataProvider, TypeRef,
};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    types: Vec<TypeDefinition>,
}

/// Metadata of one exported type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub enum_members: Vec<String>,
    /// Annotated as an API controller.
    #[serde(default)]
    pub controller: bool,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}

impl TypeDefinition {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            generic_parameters: Vec::new(),
            base_type: None,
            properties: Vec::new(),
            enum_members: Vec::new(),
            controller: false,
            actions: Vec::new(),
        }
    }

    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(
            self.namespace.clone(),
            self.name.clone(),
            self.generic_parameters.len(),
        )
    }

    pub fn with_generic_parameters(mut self, names: &[&str]) -> Self {
        self.generic_parameters = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn with_property(mut self, name: &str, ty: TypeRef) -> Self {
        self.properties.push(PropertyDef::new(name, ty));
        self
    }

    pub fn with_members(mut self, members: &[&str]) -> Self {
        self.enum_members = members.iter().map(|m| (*m).to_string()).collect();
        self
    }

    pub fn with_action(mut self, action: ActionDef) -> Self {
        self.controller = true;
        self.actions.push(action);
        self
    }
}

/// In-memory provider over merged catalog documents.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    types: IndexMap<TypeIdentity, TypeDefinition>,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions; duplicate identities are rejected.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TypeDefinition>,
    ) -> Result<Self> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition, Path::new("<memory>"))?;
        }
        Ok(catalog)
    }

    /// Parse one catalog document. `origin` is only used in error messages.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|err| Error::Catalog {
                path: origin.to_path_buf(),
                reason: err.to_string(),
            })?;
        let mut catalog = Self::new();
        for definition in document.types {
            catalog.insert(definition, origin)?;
        }
        Ok(catalog)
    }

    /// Read and parse one catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|err| Error::Catalog {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let catalog = Self::from_json_str(&json, path)?;
        debug!(
            path = %path.display(),
            types = catalog.len(),
            "Loaded metadata catalog."
        );
        Ok(catalog)
    }

    /// Load and merge every input. Inputs that do not exist are skipped with a
    /// warning; unreadable or malformed inputs fail the load.
    pub fn load_all(paths: &[PathBuf]) -> Result<Self> {
        let mut catalog = Self::new();
        for path in paths {
            if !path.exists() {
                warn!(
                    path = %path.display(),
                    "Input does not exist and will be skipped."
                );
                continue;
            }
            catalog.merge(Self::load(path)?, path)?;
        }
        Ok(catalog)
    }

    /// Merge another catalog into this one.
    pub fn merge(&mut self, other: MetadataCatalog, origin: &Path) -> Result<()> {
        for definition in other.types.into_values() {
            self.insert(definition, origin)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: &TypeIdentity) -> Option<&TypeDefinition> {
        self.types.get(id)
    }

    fn insert(&mut self, definition: TypeDefinition, origin: &Path) -> Result<()> {
        let id = definition.identity();
        if self.types.contains_key(&id) {
            return Err(Error::Catalog {
                path: origin.to_path_buf(),
                reason: format!("type `{id}` is defined more than once"),
            });
        }
        self.types.insert(id, definition);
        Ok(())
    }
}

impl TypeMetadataProvider for MetadataCatalog {
    fn entry_points(&self) -> Vec<TypeIdentity> {
        self.types
            .iter()
            .filter(|(_, def)| def.controller)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn kind(&self, id: &TypeIdentity) -> Option<TypeKind> {
        self.get(id).map(|def| def.kind)
    }

    fn generic_parameters(&self, id: &TypeIdentity) -> Vec<String> {
        self.get(id)
            .map(|def| def.generic_parameters.clone())
            .unwrap_or_default()
    }

    fn base_type(&self, id: &TypeIdentity) -> Option<TypeRef> {
        self.get(id).and_then(|def| def.base_type.clone())
    }

    fn properties(&self, id: &TypeIdentity) -> Vec<PropertyDef> {
        self.get(id)
            .map(|def| {
                def.properties
                    .iter()
                    .filter(|p| !p.indexer)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn enum_members(&self, id: &TypeIdentity) -> Vec<String> {
        self.get(id)
            .map(|def| def.enum_members.clone())
            .unwrap_or_default()
    }

    fn is_entry_point_container(&self, id: &TypeIdentity) -> bool {
        self.get(id).is_some_and(|def| def.controller)
    }

    fn actions(&self, id: &TypeIdentity) -> Vec<ActionDef> {
        self.get(id)
            .map(|def| def.actions.clone())
            .unwrap_or_default()
    }
}
