//! Use-site type references and their textual syntax.
//!
//! ```text
//! ref   := atom ( "[]" | "?" )*
//! atom  := "!" digits                     generic parameter by position
//!        | qname ( "<" ref ( "," ref )* ">" )?
//! qname := ident ( "." ident )*
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::TypeIdentity;
use crate::error::{Error, Result};

/// A type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeRef {
    /// Named type; `args` holds the arguments of a closed generic.
    Named { id: TypeIdentity, args: Vec<TypeRef> },
    /// Generic parameter of the enclosing definition, by position.
    Param(usize),
    /// `T[]`
    Array(Box<TypeRef>),
    /// Nullable-annotated `T?`
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    /// Non-generic named type.
    pub fn simple(qualified: &str) -> Self {
        Self::Named {
            id: TypeIdentity::from_qualified(qualified, 0),
            args: Vec::new(),
        }
    }

    /// Closed generic instantiation.
    pub fn generic(qualified: &str, args: Vec<TypeRef>) -> Self {
        Self::Named {
            id: TypeIdentity::from_qualified(qualified, args.len()),
            args,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// `System.Void`, the return type of actions that return nothing.
    pub fn void() -> Self {
        Self::simple("System.Void")
    }

    /// Identity of the outermost named type, if any.
    pub fn identity(&self) -> Option<&TypeIdentity> {
        match self {
            TypeRef::Named { id, .. } => Some(id),
            TypeRef::Array(inner) | TypeRef::Nullable(inner) => inner.identity(),
            TypeRef::Param(_) => None,
        }
    }

    /// Every named identity in this reference, outermost first.
    pub fn identities(&self) -> Vec<&TypeIdentity> {
        let mut out = Vec::new();
        self.collect_identities(&mut out);
        out
    }

    fn collect_identities<'a>(&'a self, out: &mut Vec<&'a TypeIdentity>) {
        match self {
            TypeRef::Named { id, args } => {
                out.push(id);
                for arg in args {
                    arg.collect_identities(out);
                }
            }
            TypeRef::Array(inner) | TypeRef::Nullable(inner) => inner.collect_identities(out),
            TypeRef::Param(_) => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { id, args } => {
                f.write_str(&id.qualified_name())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Param(position) => write!(f, "!{position}"),
            TypeRef::Array(inner) => write!(f, "{inner}[]"),
            TypeRef::Nullable(inner) => write!(f, "{inner}?"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut parser = Parser { text, pos: 0 };
        let parsed = parser.parse_ref()?;
        parser.skip_ws();
        if parser.pos != text.len() {
            return Err(parser.fail("unexpected trailing input"));
        }
        Ok(parsed)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_ref(&mut self) -> Result<TypeRef> {
        let mut parsed = self.parse_atom()?;
        loop {
            self.skip_ws();
            if self.eat("[]") {
                parsed = TypeRef::array(parsed);
            } else if self.eat("?") {
                parsed = TypeRef::nullable(parsed);
            } else {
                return Ok(parsed);
            }
        }
    }

    fn parse_atom(&mut self) -> Result<TypeRef> {
        self.skip_ws();
        if self.eat("!") {
            let digits = self.take_while(|c| c.is_ascii_digit());
            return digits
                .parse()
                .map(TypeRef::Param)
                .map_err(|_| self.fail("expected a generic parameter position after `!`"));
        }

        let qualified = self.parse_qualified_name()?;
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat("<") {
            loop {
                args.push(self.parse_ref()?);
                self.skip_ws();
                if self.eat(",") {
                    continue;
                }
                if self.eat(">") {
                    break;
                }
                return Err(self.fail("expected `,` or `>` in generic argument list"));
            }
        }

        Ok(TypeRef::Named {
            id: TypeIdentity::from_qualified(&qualified, args.len()),
            args,
        })
    }

    fn parse_qualified_name(&mut self) -> Result<String> {
        let mut segments = Vec::new();
        loop {
            let segment = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+');
            if segment.is_empty()
                || segment
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit())
            {
                return Err(self.fail("expected a type name"));
            }
            segments.push(segment);
            if !self.eat(".") {
                break;
            }
        }
        Ok(segments.join("."))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let text = self.text;
        let start = self.pos;
        let len: usize = text[start..]
            .chars()
            .take_while(|c| pred(*c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
        &text[start..self.pos]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn fail(&self, reason: &str) -> Error {
        Error::TypeRefSyntax {
            text: self.text.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }
}
