//! Turns a discovered graph into named, formatted file artifacts.

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::NewlineStyle;
use crate::error::{Error, Result};
use crate::graph::{TypeGraph, discover};
use crate::metadata::{TypeIdentity, TypeMetadataProvider};
use crate::rules::BuildRules;
use crate::writers::{CONTRACT_NAME, GeneratedText, contract_lines, type_name};

/// Indentation unit per brace level
const INDENT: &str = "    ";

/// Filename of the shared REST client contract.
pub const CONTRACT_FILENAME: &str = "IRestApi.ts";

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    pub filename: String,
    pub content: String,
}

/// Filename of the artifact emitted for `id`.
pub fn filename_for(id: &TypeIdentity) -> String {
    format!("{}.ts", type_name(id))
}

/// Fail if two identities, or an identity and the contract, share a filename.
pub fn check_filenames<'a>(identities: impl IntoIterator<Item = &'a TypeIdentity>) -> Result<()> {
    let mut owners: IndexMap<String, String> = IndexMap::new();
    owners.insert(
        CONTRACT_FILENAME.to_string(),
        format!("{CONTRACT_NAME} contract"),
    );

    for id in identities {
        let filename = filename_for(id);
        if let Some(first) = owners.get(&filename) {
            return Err(Error::NamingCollision {
                filename,
                first: first.clone(),
                second: id.to_string(),
            });
        }
        owners.insert(filename, id.to_string());
    }
    Ok(())
}

/// Indent lines by brace depth.
///
/// A line starting with closing braces is printed at the depth those braces
/// close to; braces balanced within one line do not change the depth.
pub fn indent_lines(lines: &[String]) -> Vec<String> {
    let mut depth: usize = 0;
    lines
        .iter()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return String::new();
            }
            let leading_closes = trimmed.chars().take_while(|c| *c == '}').count();
            let level = depth.saturating_sub(leading_closes);
            let opens = trimmed.matches('{').count();
            let closes = trimmed.matches('}').count();
            depth = (depth + opens).saturating_sub(closes);
            format!("{}{trimmed}", INDENT.repeat(level))
        })
        .collect()
}

/// Indent, join and terminate with a trailing blank line.
pub fn format_lines(lines: &[String], newline: NewlineStyle) -> String {
    let newline = newline.as_str();
    let mut content = indent_lines(lines).join(newline);
    content.push_str(newline);
    content
}

/// Discover, classify and render everything reachable from `entry_points`.
///
/// The contract artifact comes first, followed by one artifact per discovered
/// type in discovery order.
pub fn assemble<P: TypeMetadataProvider + ?Sized>(
    entry_points: &[TypeIdentity],
    provider: &P,
    rules: &BuildRules,
    newline: NewlineStyle,
) -> Result<Vec<FileArtifact>> {
    let graph = discover(entry_points, provider)?;
    assemble_graph(&graph, rules, newline)
}

/// Render an already discovered graph.
pub fn assemble_graph(
    graph: &TypeGraph,
    rules: &BuildRules,
    newline: NewlineStyle,
) -> Result<Vec<FileArtifact>> {
    check_filenames(graph.identities())?;

    let nodes: Vec<_> = graph.nodes().collect();
    let rendered: Vec<GeneratedText> = nodes
        .par_iter()
        .map(|node| rules.render(node, graph))
        .collect::<Result<_>>()?;

    let mut artifacts = Vec::with_capacity(rendered.len() + 1);
    artifacts.push(FileArtifact {
        filename: CONTRACT_FILENAME.to_string(),
        content: format_lines(&contract_lines(rules.module_type), newline),
    });
    for text in rendered {
        let filename = filename_for(&text.identity);
        debug!(
            type_name = %text.identity,
            filename = %filename,
            imports = text.imports.len(),
            "Rendered artifact."
        );
        artifacts.push(FileArtifact {
            filename,
            content: format_lines(&text.lines, newline),
        });
    }

    info!(
        artifacts = artifacts.len(),
        module_type = rules.module_type.as_str(),
        "Assembled artifacts."
    );
    Ok(artifacts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_indent_by_brace_depth() {
        let input = lines(&[
            "export class A {",
            "public B(): Promise<void> {",
            "return api.Get<void>(\"/A/B\", {}, config);",
            "}",
            "}",
        ]);
        assert_eq!(
            indent_lines(&input),
            [
                "export class A {",
                "    public B(): Promise<void> {",
                "        return api.Get<void>(\"/A/B\", {}, config);",
                "    }",
                "}"
            ]
        );
    }

    #[test]
    fn test_single_line_braces_keep_depth() {
        let input = lines(&["export class Money extends String {}", "", "enum E {", "A,", "}"]);
        assert_eq!(
            indent_lines(&input),
            ["export class Money extends String {}", "", "enum E {", "    A,", "}"]
        );
    }

    #[test]
    fn test_trailing_blank_line_and_newline_style() {
        let input = lines(&["enum E {", "A,", "}"]);
        assert_eq!(format_lines(&input, NewlineStyle::Lf), "enum E {\n    A,\n}\n");
        assert_eq!(
            format_lines(&input, NewlineStyle::Crlf),
            "enum E {\r\n    A,\r\n}\r\n"
        );
    }

    #[test]
    fn test_collision_between_namespaces() {
        let ids = [
            TypeIdentity::new("Sales", "Order", 0),
            TypeIdentity::new("Purchasing", "Order", 0),
        ];
        let err = check_filenames(&ids).unwrap_err();
        match err {
            Error::NamingCollision {
                filename,
                first,
                second,
            } => {
                assert_eq!(filename, "Order.ts");
                assert_eq!(first, "Sales.Order");
                assert_eq!(second, "Purchasing.Order");
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collision_with_contract() {
        let ids = [TypeIdentity::new("Shop", "IRestApi", 0)];
        let err = check_filenames(&ids).unwrap_err();
        assert!(err.to_string().contains("IRestApi.ts"));
    }

    #[test]
    fn test_generic_arity_does_not_change_filename() {
        assert_eq!(filename_for(&TypeIdentity::new("Shop", "Paged", 1)), "Paged.ts");
    }
}
