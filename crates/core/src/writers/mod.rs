//! Per-kind TypeScript writers.
//!
//! Every writer turns one `TypeNode` into a `TsModule` and hands back its
//! unindented lines together with the identities it imports.
//!
//! ## Module Structure
//!
//! - `mapping`: TypeRef → TsType
//! - `enums`, `structs`, `models`, `controllers`: one writer per `GeneratorKind`
//! - `contract`: the shared REST client contract written once per run

mod contract;
mod controllers;
mod enums;
mod mapping;
mod models;
mod structs;

use indexmap::IndexSet;

use crate::config::ModuleType;
use crate::graph::{TypeGraph, TypeNode};
use crate::metadata::{TypeIdentity, TypeRef};
use crate::typescript::utils::sanitize_ts_identifier;
use crate::typescript::{EmitLines, TsImport, TsModule};

pub use contract::{CONTRACT_NAME, contract_lines};
pub use controllers::write_controller;
pub use enums::write_enum;
pub use mapping::TypeMapper;
pub use models::write_model;
pub use structs::write_struct;

/// Name declared for `id` in TypeScript, and the stem of its file.
///
/// Nested-type separators (`Order+Line`) and other characters that are not
/// valid in identifiers become `_`.
pub fn type_name(id: &TypeIdentity) -> String {
    sanitize_ts_identifier(id.name())
}

/// Read-only state shared by every writer of a run.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub module_type: ModuleType,
    pub strict_null_check: bool,
    pub graph: &'a TypeGraph,
}

impl<'a> RenderContext<'a> {
    pub fn new(module_type: ModuleType, strict_null_check: bool, graph: &'a TypeGraph) -> Self {
        Self {
            module_type,
            strict_null_check,
            graph,
        }
    }

    /// Whether declarations carry the `export` keyword.
    pub fn export(&self) -> bool {
        self.module_type == ModuleType::Module
    }

    /// Import of `items` declared in the file named after `stem`.
    pub fn import(&self, stem: &str, items: Vec<String>) -> TsImport {
        match self.module_type {
            ModuleType::Module => TsImport::Named {
                items,
                from: format!("./{stem}"),
            },
            ModuleType::Global => TsImport::Reference {
                path: format!("./{stem}.ts"),
            },
        }
    }
}

/// Rendered text of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub identity: TypeIdentity,
    /// Unindented source lines, imports first.
    pub lines: Vec<String>,
    /// Other discovered types this text depends on, in first-seen order.
    pub imports: Vec<TypeIdentity>,
}

/// Identities referenced by a shape, excluding the shape itself and anything
/// that is not a discovered type.
#[derive(Debug)]
struct ImportSet<'a> {
    own: &'a TypeIdentity,
    graph: &'a TypeGraph,
    seen: IndexSet<TypeIdentity>,
}

impl<'a> ImportSet<'a> {
    fn new(own: &'a TypeIdentity, graph: &'a TypeGraph) -> Self {
        Self {
            own,
            graph,
            seen: IndexSet::new(),
        }
    }

    fn add(&mut self, reference: &TypeRef) {
        for id in reference.identities() {
            if id != self.own && self.graph.contains(id) {
                self.seen.insert(id.clone());
            }
        }
    }

    fn into_vec(self) -> Vec<TypeIdentity> {
        self.seen.into_iter().collect()
    }
}

/// Prepends the type imports to `module` and packs the result.
fn finish(
    ctx: &RenderContext<'_>,
    node: &TypeNode,
    mut module: TsModule,
    imports: Vec<TypeIdentity>,
) -> GeneratedText {
    module.imports.extend(
        imports
            .iter()
            .map(|id| {
                let name = type_name(id);
                ctx.import(&name, vec![name.clone()])
            }),
    );
    GeneratedText {
        identity: node.identity.clone(),
        lines: module.emit_lines(),
        imports,
    }
}
