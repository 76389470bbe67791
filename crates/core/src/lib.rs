#![forbid(unsafe_code)]
#![deny(unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! TypeScript declarations from web-API type metadata.
//!
//! Starting from the API controllers a metadata provider exposes, the crate
//! discovers every type reachable through action signatures, generic
//! arguments, base types and properties, and renders one TypeScript file per
//! type plus a shared REST client contract.
//!
//! ## Module Structure
//!
//! - `metadata`: identities, type references, the provider trait, JSON catalogs
//! - `graph`: memoized discovery of the closed type set
//! - `rules`: classification into a generator kind
//! - `writers`: per-kind TypeScript writers
//! - `typescript`: TypeScript IR and emission
//! - `assembler`: filenames, collision checks, formatting
//! - `sink`: directory and in-memory artifact sinks
//! - `config`, `generator`: run configuration and the end-to-end pipeline

pub mod assembler;
pub mod config;
mod error;
pub mod generator;
pub mod graph;
pub mod metadata;
pub mod rules;
pub mod sink;
pub mod typescript;
pub mod writers;

pub use assembler::{CONTRACT_FILENAME, FileArtifact, assemble, filename_for};
pub use config::{CONFIG_FILENAME, GeneratorConfig, ModuleType, NewlineStyle};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use graph::{TypeGraph, discover};
pub use metadata::{MetadataCatalog, TypeIdentity, TypeMetadataProvider, TypeRef};
pub use rules::{BuildRules, GeneratorKind, classify};
pub use sink::{ArtifactSink, DirectorySink, MemorySink};
