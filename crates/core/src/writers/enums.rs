//! Enum writer: member names in declaration order, no numeric values.

use super::{GeneratedText, RenderContext, finish, type_name};
use crate::error::Result;
use crate::graph::TypeNode;
use crate::typescript::{TsModule, TsTypeDef, TypeDefKind};

pub fn write_enum(ctx: &RenderContext<'_>, node: &TypeNode) -> Result<GeneratedText> {
    let module = TsModule {
        imports: Vec::new(),
        types: vec![TsTypeDef {
            name: type_name(&node.identity),
            type_params: Vec::new(),
            export: ctx.export(),
            kind: TypeDefKind::Enum {
                members: node.enum_members.clone(),
            },
        }],
    };
    Ok(finish(ctx, node, module, Vec::new()))
}
