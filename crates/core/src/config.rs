//! Run configuration.
//!
//! The configuration file is optional and stored as `shapegen.toml`:
//! ```toml
//! module-type = "module"
//! strict-null-check = true
//! newline = "lf"
//! output-dir = "generated"
//! inputs = ["bin/Shop.Api.json"]
//! ```
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rules::BuildRules;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = "shapegen.toml";

/// Import style of the generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// `export` declarations and relative `import` statements
    #[default]
    Module,
    /// Global declarations tied together with `/// <reference>` directives
    #[serde(alias = "typescript")]
    Global,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Module => "module",
            ModuleType::Global => "global",
        }
    }
}

impl std::str::FromStr for ModuleType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "module" => Ok(ModuleType::Module),
            "global" | "typescript" => Ok(ModuleType::Global),
            other => Err(Error::Config(format!(
                "unknown module type `{other}` (expected `module` or `typescript`)"
            ))),
        }
    }
}

/// Line terminator of the generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    #[default]
    Lf,
    Crlf,
}

impl NewlineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
        }
    }
}

impl std::str::FromStr for NewlineStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "lf" => Ok(NewlineStyle::Lf),
            "crlf" => Ok(NewlineStyle::Crlf),
            other => Err(Error::Config(format!(
                "unknown newline style `{other}` (expected `lf` or `crlf`)"
            ))),
        }
    }
}

/// Everything a generation run needs besides the metadata itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub module_type: ModuleType,
    pub strict_null_check: bool,
    pub newline: NewlineStyle,
    pub output_dir: PathBuf,
    /// Metadata catalogs to load.
    pub inputs: Vec<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_type: ModuleType::default(),
            strict_null_check: false,
            newline: NewlineStyle::default(),
            output_dir: PathBuf::from("generated"),
            inputs: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| Error::Config(err.to_string()))
    }

    /// Load a configuration file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        let mut config = Self::from_toml_str(&contents)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;

        if let Some(base) = path.parent() {
            config.output_dir = base.join(&config.output_dir);
            for input in &mut config.inputs {
                *input = base.join(&*input);
            }
        }
        Ok(config)
    }

    /// Rule binding for this run.
    pub fn build_rules(&self) -> BuildRules {
        BuildRules::new(self.module_type, self.strict_null_check)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.module_type, ModuleType::Module);
        assert_eq!(config.newline.as_str(), "\n");
    }

    #[test]
    fn test_parse_full_file() {
        let config = GeneratorConfig::from_toml_str(
            r#"
module-type = "typescript"
strict-null-check = true
newline = "crlf"
output-dir = "out"
inputs = ["a.json", "b.json"]
"#,
        )
        .unwrap();
        assert_eq!(config.module_type, ModuleType::Global);
        assert!(config.strict_null_check);
        assert_eq!(config.newline, NewlineStyle::Crlf);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.inputs.len(), 2);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GeneratorConfig::from_toml_str("modul-type = \"module\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "output-dir = \"ts\"\ninputs = [\"shop.json\"]\n").unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, dir.path().join("ts"));
        assert_eq!(config.inputs, [dir.path().join("shop.json")]);
    }

    #[test]
    fn test_module_type_from_str() {
        assert_eq!("Module".parse::<ModuleType>().unwrap(), ModuleType::Module);
        assert_eq!("typescript".parse::<ModuleType>().unwrap(), ModuleType::Global);
        assert!("amd".parse::<ModuleType>().is_err());
        assert_eq!("CRLF".parse::<NewlineStyle>().unwrap(), NewlineStyle::Crlf);
    }
}
