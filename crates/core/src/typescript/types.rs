//! TypeScript IR for declaration files.
//!
//! This module defines the small slice of TypeScript the writers produce:
//! - TsType: type expressions (primitives, arrays, unions, generics, records)
//! - TsExpr: expressions used inside controller delegation bodies
//! - TsTypeDef: top-level declarations (interfaces, enums, classes)
//! - TsImport: module imports or global reference directives

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, unknown
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Record type: Record<K, V>
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Named type reference: "Widget", "Date", "T"
    Ref(String),
    /// Generic instantiation: Paged<Widget>
    Generic { name: String, args: Vec<TsType> },
}

impl TsType {
    pub fn reference(name: impl Into<String>) -> Self {
        TsType::Ref(name.into())
    }

    pub fn array(element: TsType) -> Self {
        TsType::Array(Box::new(element))
    }

    /// `T | null`
    pub fn nullable(inner: TsType) -> Self {
        TsType::Union(vec![inner, TsType::Primitive(TsPrimitive::Null)])
    }

    /// `Record<string, V>`
    pub fn string_record(value: TsType) -> Self {
        TsType::Record {
            key: Box::new(TsType::Primitive(TsPrimitive::String)),
            value: Box::new(value),
        }
    }

    /// `Name<A, B>`, or the bare name when there are no arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TsType>) -> Self {
        let name = name.into();
        if args.is_empty() {
            TsType::Ref(name)
        } else {
            TsType::Generic { name, args }
        }
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Void,
    Unknown,
}

/// Interface property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

impl TsProp {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    String(String),
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: "bar"
    Literal(TsLiteral),
    /// Method call with explicit type arguments: api.Get<T>(a, b)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Object literal: { a: a, b: b }
    Object(Vec<(String, TsExpr)>),
    /// Member access: foo.bar
    Member { object: Box<TsExpr>, prop: String },
    /// Template literal: `/orders/${id}`
    Template(Vec<TsTemplatePart>),
}

/// Piece of a template literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsTemplatePart {
    Text(String),
    Expr(TsExpr),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    /// Plain call without type arguments: f(a, b)
    pub fn call(callee: impl Into<String>, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(TsExpr::Ident(callee.into())),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

impl TsParam {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }
}

/// Statement in a method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    Return(TsExpr),
}

/// Method of a class or member signature of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsMethod {
    pub name: String,
    /// `public` modifier (class members only)
    pub public: bool,
    pub type_params: Vec<String>,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    /// `None` for a bodiless signature.
    pub body: Option<Vec<TsStmt>>,
}

// =============================================================================
// Module-Level IR
// =============================================================================

/// How one file pulls in the declarations of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsImport {
    /// import { A, B } from "./A";
    Named { items: Vec<String>, from: String },
    /// /// <reference path="./A.ts" />
    Reference { path: String },
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// interface Foo<T> extends Base { ... }
    Interface {
        extends: Option<TsType>,
        properties: Vec<TsProp>,
        methods: Vec<TsMethod>,
    },
    /// enum Foo { A, B, }
    Enum { members: Vec<String> },
    /// class Foo extends String {}
    StringWrapper,
    /// class Foo { ...methods }
    Class { methods: Vec<TsMethod> },
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeDef {
    pub name: String,
    pub type_params: Vec<String>,
    /// Prefix with `export` (module style)
    pub export: bool,
    pub kind: TypeDefKind,
}

/// Complete TypeScript file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsModule {
    pub imports: Vec<TsImport>,
    pub types: Vec<TsTypeDef>,
}
