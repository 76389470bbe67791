//! TypeRef → TypeScript type mapping.

use super::{RenderContext, type_name};
use crate::error::{Error, Result};
use crate::graph::TypeNode;
use crate::metadata::{BuiltinShape, TypeKind, TypeRef, builtin_shape};
use crate::typescript::{TsPrimitive, TsType};

/// Maps the type references of one node.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    ctx: &'a RenderContext<'a>,
    node: &'a TypeNode,
}

impl<'a> TypeMapper<'a> {
    pub fn new(ctx: &'a RenderContext<'a>, node: &'a TypeNode) -> Self {
        Self { ctx, node }
    }

    /// Map `reference`, found on `member` of the node being rendered.
    pub fn map(&self, reference: &TypeRef, member: &str) -> Result<TsType> {
        match reference {
            TypeRef::Param(position) => self
                .node
                .generic_parameters
                .get(*position)
                .map(TsType::reference)
                .ok_or_else(|| {
                    self.fail(
                        member,
                        format!(
                            "generic parameter !{position} is out of range for `{}`",
                            self.node.identity
                        ),
                    )
                }),
            TypeRef::Array(inner) => Ok(TsType::array(self.map(inner, member)?)),
            TypeRef::Nullable(inner) => Ok(self.nullable(self.map(inner, member)?)),
            TypeRef::Named { id, args } => {
                if let Some(node) = self.ctx.graph.node(id) {
                    if node.declared == TypeKind::Delegate {
                        return Err(self.fail(
                            member,
                            format!("delegate `{id}` has no TypeScript representation"),
                        ));
                    }
                    let args = args
                        .iter()
                        .map(|arg| self.map(arg, member))
                        .collect::<Result<Vec<_>>>()?;
                    return Ok(TsType::generic(type_name(id), args));
                }

                let Some(shape) = builtin_shape(id) else {
                    return Err(self.fail(
                        member,
                        format!("`{reference}` has no TypeScript mapping"),
                    ));
                };
                let arg = |position: usize| -> Result<TsType> {
                    let arg = args.get(position).ok_or_else(|| {
                        self.fail(
                            member,
                            format!("`{reference}` is missing generic argument {position}"),
                        )
                    })?;
                    self.map(arg, member)
                };

                Ok(match shape {
                    BuiltinShape::Number => TsType::Primitive(TsPrimitive::Number),
                    BuiltinShape::String => TsType::Primitive(TsPrimitive::String),
                    BuiltinShape::Boolean => TsType::Primitive(TsPrimitive::Boolean),
                    BuiltinShape::Date => TsType::reference("Date"),
                    BuiltinShape::Unknown => TsType::Primitive(TsPrimitive::Unknown),
                    BuiltinShape::Void => TsType::Primitive(TsPrimitive::Void),
                    BuiltinShape::Collection => TsType::array(arg(0)?),
                    BuiltinShape::Dictionary => TsType::string_record(arg(1)?),
                    BuiltinShape::Nullable => self.nullable(arg(0)?),
                    BuiltinShape::Task if args.is_empty() => TsType::Primitive(TsPrimitive::Void),
                    BuiltinShape::Task => arg(0)?,
                })
            }
        }
    }

    fn nullable(&self, inner: TsType) -> TsType {
        let already_nullable = matches!(
            &inner,
            TsType::Union(types) if types.contains(&TsType::Primitive(TsPrimitive::Null))
        );
        if self.ctx.strict_null_check && !already_nullable {
            TsType::nullable(inner)
        } else {
            inner
        }
    }

    pub(super) fn fail(&self, member: &str, reason: String) -> Error {
        Error::TypeMapping {
            declaring_type: self.node.identity.to_string(),
            member: member.to_string(),
            reason,
        }
    }
}
