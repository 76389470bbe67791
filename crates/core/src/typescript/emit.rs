//! TypeScript code emission via the Emit trait.
//!
//! Expressions and type expressions emit to a single string through `Emit`.
//! Declarations emit to unindented lines through `EmitLines`; indentation and
//! newline style are applied later by the assembler.

use super::types::{
    TsExpr, TsImport, TsLiteral, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsTemplatePart,
    TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_js_string, escape_template_text, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

/// Trait for multi-line constructs.
pub trait EmitLines {
    fn emit_lines(&self) -> Vec<String>;
}

fn join<T: Emit>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(Emit::emit)
        .collect::<Vec<_>>()
        .join(separator)
}

fn type_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Void => "void",
            TsPrimitive::Unknown => "unknown",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                // Wrap unions in parentheses
                if matches!(**inner, TsType::Union(_)) {
                    format!("({})[]", inner.emit())
                } else {
                    format!("{}[]", inner.emit())
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => format!("{name}<{}>", join(args, ", ")),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {};", self.ty.emit())
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let generics = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", join(type_args, ", "))
                };
                format!("{}{generics}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props
                        .iter()
                        .map(|(k, v)| format!("{}: {}", quote_if_needed(k), v.emit()))
                        .collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Member { object, prop } => format!("{}.{prop}", object.emit()),
            TsExpr::Template(parts) => {
                let body: String = parts
                    .iter()
                    .map(|part| match part {
                        TsTemplatePart::Text(text) => escape_template_text(text),
                        TsTemplatePart::Expr(expr) => format!("${{{}}}", expr.emit()),
                    })
                    .collect();
                format!("`{body}`")
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", self.name, self.ty.emit())
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        match self {
            TsStmt::Return(expr) => format!("return {};", expr.emit()),
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl EmitLines for TsMethod {
    fn emit_lines(&self) -> Vec<String> {
        let modifier = if self.public { "public " } else { "" };
        let return_type = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let signature = format!(
            "{modifier}{}{}({}){return_type}",
            self.name,
            type_params(&self.type_params),
            join(&self.params, ", ")
        );

        match &self.body {
            None => vec![format!("{signature};")],
            Some(body) if body.is_empty() => vec![format!("{signature} {{}}")],
            Some(body) => {
                let mut lines = vec![format!("{signature} {{")];
                lines.extend(body.iter().map(Emit::emit));
                lines.push("}".to_string());
                lines
            }
        }
    }
}

impl EmitLines for TsTypeDef {
    fn emit_lines(&self) -> Vec<String> {
        let export = if self.export { "export " } else { "" };
        let generics = type_params(&self.type_params);

        match &self.kind {
            TypeDefKind::Interface {
                extends,
                properties,
                methods,
            } => {
                let extends = extends
                    .as_ref()
                    .map(|base| format!(" extends {}", base.emit()))
                    .unwrap_or_default();
                let mut lines = vec![format!(
                    "{export}interface {}{generics}{extends} {{",
                    self.name
                )];
                lines.extend(properties.iter().map(Emit::emit));
                lines.extend(methods.iter().flat_map(EmitLines::emit_lines));
                lines.push("}".to_string());
                lines
            }
            TypeDefKind::Enum { members } => {
                let mut lines = vec![format!("{export}enum {} {{", self.name)];
                lines.extend(members.iter().map(|m| format!("{m},")));
                lines.push("}".to_string());
                lines
            }
            TypeDefKind::StringWrapper => {
                vec![format!("{export}class {}{generics} extends String {{}}", self.name)]
            }
            TypeDefKind::Class { methods } => {
                let mut lines = vec![format!("{export}class {}{generics} {{", self.name)];
                lines.extend(methods.iter().flat_map(EmitLines::emit_lines));
                lines.push("}".to_string());
                lines
            }
        }
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        match self {
            TsImport::Named { items, from } => {
                format!("import {{ {} }} from \"{from}\";", items.join(", "))
            }
            TsImport::Reference { path } => format!("/// <reference path=\"{path}\" />"),
        }
    }
}

// =============================================================================
// Module
// =============================================================================

impl EmitLines for TsModule {
    fn emit_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.imports.iter().map(Emit::emit).collect();
        for type_def in &self.types {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(type_def.emit_lines());
        }
        lines
    }
}

// =============================================================================
// Tests
// =============================================================================
