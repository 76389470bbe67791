//! TypeScript IR and emission.
//!
//! Writers build a structured `TsModule` per type; emission is purely
//! mechanical line building.
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsTypeDef, TsModule)
//! - `emit`: AST to code via the `Emit` and `EmitLines` traits
//! - `utils`: identifier quoting and sanitizing

mod emit;
mod types;
pub mod utils;

pub use emit::{Emit, EmitLines};
pub use types::{
    TsExpr, TsImport, TsLiteral, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsTemplatePart,
    TsType, TsTypeDef, TypeDefKind,
};
