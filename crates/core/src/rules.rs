//! Classification of discovered types and the writer binding of a run.

use crate::config::ModuleType;
use crate::error::Result;
use crate::graph::{TypeGraph, TypeNode};
use crate::metadata::TypeKind;
use crate::writers::{
    GeneratedText, RenderContext, write_controller, write_enum, write_model, write_struct,
};

/// Generation strategy of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Controller,
    Enum,
    Struct,
    Model,
}

impl GeneratorKind {
    /// Rules in evaluation order; the first match wins.
    pub const RULE_ORDER: [GeneratorKind; 4] = [
        GeneratorKind::Controller,
        GeneratorKind::Enum,
        GeneratorKind::Struct,
        GeneratorKind::Model,
    ];

    /// Predicate of this rule.
    pub fn matches(self, node: &TypeNode) -> bool {
        match self {
            GeneratorKind::Controller => node.is_entry_point_container,
            GeneratorKind::Enum => node.declared == TypeKind::Enum,
            GeneratorKind::Struct => node.declared.is_value_type(),
            GeneratorKind::Model => true,
        }
    }
}

/// Pick the generator for `node`. Total: `Model` matches everything.
pub fn classify(node: &TypeNode) -> GeneratorKind {
    GeneratorKind::RULE_ORDER
        .into_iter()
        .find(|kind| kind.matches(node))
        .unwrap_or(GeneratorKind::Model)
}

/// Writer binding for one run: import style plus null handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildRules {
    pub module_type: ModuleType,
    pub strict_null_check: bool,
}

impl BuildRules {
    pub fn new(module_type: ModuleType, strict_null_check: bool) -> Self {
        Self {
            module_type,
            strict_null_check,
        }
    }

    /// Render one discovered node with the writer its classification selects.
    pub fn render(&self, node: &TypeNode, graph: &TypeGraph) -> Result<GeneratedText> {
        let ctx = RenderContext::new(self.module_type, self.strict_null_check, graph);
        match classify(node) {
            GeneratorKind::Controller => write_controller(&ctx, node),
            GeneratorKind::Enum => write_enum(&ctx, node),
            GeneratorKind::Struct => write_struct(&ctx, node),
            GeneratorKind::Model => write_model(&ctx, node),
        }
    }
}
