//! Type graph discovery.
//!
//! - `node`: resolved shape of one type
//! - `discovery`: memoized traversal producing the ordered `TypeGraph`

mod discovery;
mod node;

pub use discovery::{DiscoverySet, TypeGraph, discover};
pub use node::TypeNode;
