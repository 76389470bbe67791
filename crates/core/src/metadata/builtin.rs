//! Shapes of the host platform's built-in library types.
//!
//! Built-in types are never emitted; the writers map them straight onto a
//! TypeScript form. Anything in a `System` namespace that is missing from this
//! table has no mapping and fails the run when a shape references it.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::TypeIdentity;

/// How a built-in type surfaces in TypeScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinShape {
    Number,
    String,
    Boolean,
    Date,
    /// `object` and friends: no static shape.
    Unknown,
    Void,
    /// Sequence of its single generic argument.
    Collection,
    /// Keyed collection; surfaces its value argument.
    Dictionary,
    /// `Nullable<T>`
    Nullable,
    /// `Task` / `Task<T>` (async action results)
    Task,
}

static BUILTINS: LazyLock<HashMap<&'static str, BuiltinShape>> = LazyLock::new(|| {
    use BuiltinShape::{
        Boolean, Collection, Date, Dictionary, Nullable, Number, String, Task, Unknown, Void,
    };
    [
        ("System.Byte", Number),
        ("System.SByte", Number),
        ("System.Int16", Number),
        ("System.UInt16", Number),
        ("System.Int32", Number),
        ("System.UInt32", Number),
        ("System.Int64", Number),
        ("System.UInt64", Number),
        ("System.Single", Number),
        ("System.Double", Number),
        ("System.Decimal", Number),
        ("System.String", String),
        ("System.Char", String),
        ("System.Guid", String),
        ("System.TimeSpan", String),
        ("System.Uri", String),
        ("System.Boolean", Boolean),
        ("System.DateTime", Date),
        ("System.DateTimeOffset", Date),
        ("System.Object", Unknown),
        ("System.Void", Void),
        ("System.Nullable`1", Nullable),
        ("System.Collections.Generic.List`1", Collection),
        ("System.Collections.Generic.IList`1", Collection),
        ("System.Collections.Generic.ICollection`1", Collection),
        ("System.Collections.Generic.IEnumerable`1", Collection),
        ("System.Collections.Generic.IReadOnlyList`1", Collection),
        ("System.Collections.Generic.IReadOnlyCollection`1", Collection),
        ("System.Collections.Generic.HashSet`1", Collection),
        ("System.Collections.Generic.ISet`1", Collection),
        ("System.Collections.Generic.Dictionary`2", Dictionary),
        ("System.Collections.Generic.IDictionary`2", Dictionary),
        ("System.Collections.Generic.IReadOnlyDictionary`2", Dictionary),
        ("System.Threading.Tasks.Task", Task),
        ("System.Threading.Tasks.Task`1", Task),
    ]
    .into_iter()
    .collect()
});

/// Look up the TypeScript shape of a built-in type, keyed by its display form
/// (``System.Collections.Generic.List`1``).
pub fn builtin_shape(id: &TypeIdentity) -> Option<BuiltinShape> {
    BUILTINS.get(id.to_string().as_str()).copied()
}
