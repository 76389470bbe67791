//! Value types surface as opaque string wrappers with no members.

use super::{GeneratedText, RenderContext, finish, type_name};
use crate::error::Result;
use crate::graph::TypeNode;
use crate::typescript::{TsModule, TsTypeDef, TypeDefKind};

pub fn write_struct(ctx: &RenderContext<'_>, node: &TypeNode) -> Result<GeneratedText> {
    let module = TsModule {
        imports: Vec::new(),
        types: vec![TsTypeDef {
            name: type_name(&node.identity),
            type_params: node.generic_parameters.clone(),
            export: ctx.export(),
            kind: TypeDefKind::StringWrapper,
        }],
    };
    Ok(finish(ctx, node, module, Vec::new()))
}
