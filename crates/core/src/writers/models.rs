//! Model writer: an interface with generic parameters, an optional base and
//! one field per property.

use super::{GeneratedText, ImportSet, RenderContext, TypeMapper, finish, type_name};
use crate::error::Result;
use crate::graph::TypeNode;
use crate::typescript::{TsModule, TsProp, TsTypeDef, TypeDefKind};

pub fn write_model(ctx: &RenderContext<'_>, node: &TypeNode) -> Result<GeneratedText> {
    let mapper = TypeMapper::new(ctx, node);
    let mut imports = ImportSet::new(&node.identity, ctx.graph);

    // Built-in bases (`System.Object`, ...) are dropped entirely.
    let base = node
        .base_type
        .as_ref()
        .filter(|base| base.identity().is_some_and(|id| ctx.graph.contains(id)));
    let extends = match base {
        Some(base) => {
            imports.add(base);
            Some(mapper.map(base, "base type")?)
        }
        None => None,
    };

    let mut properties = Vec::with_capacity(node.properties.len());
    for property in &node.properties {
        imports.add(&property.ty);
        properties.push(TsProp::new(
            property.name.clone(),
            mapper.map(&property.ty, &property.name)?,
        ));
    }

    let module = TsModule {
        imports: Vec::new(),
        types: vec![TsTypeDef {
            name: type_name(&node.identity),
            type_params: node.generic_parameters.clone(),
            export: ctx.export(),
            kind: TypeDefKind::Interface {
                extends,
                properties,
                methods: Vec::new(),
            },
        }],
    };
    Ok(finish(ctx, node, module, imports.into_vec()))
}
