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

use std::path::{Path, PathBuf};

use clap::Parser;
use shapegen_core::{
    CONFIG_FILENAME, DirectorySink, Error, GenerationReport, Generator, GeneratorConfig,
    MemorySink, ModuleType, NewlineStyle,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Crates whose events a plain `SHAPEGEN_LOG` level applies to
const LOG_TARGETS: [&str; 2] = ["shapegen_core", "shapegen_cli"];

#[derive(Parser, Debug)]
#[command(
    name = "shapegen",
    version,
    about = "Generate TypeScript declarations for the types exposed by web-API controllers"
)]
pub struct Cli {
    /// Metadata catalogs to load
    #[arg(short = 'f', long = "files", value_name = "PATH", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Output directory, recreated on every run
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Import style: `module` or `typescript` (global declarations)
    #[arg(short, long, value_name = "TYPE")]
    pub module: Option<ModuleType>,

    /// Map nullable types to `T | null`
    #[arg(long)]
    pub strict_null_check: bool,

    /// Line terminator: `lf` or `crlf`
    #[arg(long, value_name = "STYLE")]
    pub newline: Option<NewlineStyle>,

    /// Configuration file (defaults to ./shapegen.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List the files that would be written without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    /// Debug-level logging unless SHAPEGEN_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration file merged with the command-line overrides.
    pub fn resolve_config(&self) -> Result<GeneratorConfig, Error> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None if Path::new(CONFIG_FILENAME).is_file() => {
                GeneratorConfig::load(Path::new(CONFIG_FILENAME))?
            }
            None => GeneratorConfig::default(),
        };

        if !self.files.is_empty() {
            config.inputs.clone_from(&self.files);
        }
        if let Some(output) = &self.output {
            config.output_dir.clone_from(output);
        }
        if let Some(module) = self.module {
            config.module_type = module;
        }
        if self.strict_null_check {
            config.strict_null_check = true;
        }
        if let Some(newline) = self.newline {
            config.newline = newline;
        }

        if config.inputs.is_empty() {
            return Err(Error::Config(
                "no input catalogs; pass --files or set `inputs` in the configuration file"
                    .to_string(),
            ));
        }
        Ok(config)
    }
}

/// Parse `args` (program name first) and run. Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => run(&cli),
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

pub fn run(cli: &Cli) -> i32 {
    init_tracing(cli.verbose);
    match execute(cli) {
        Ok(report) => {
            if cli.dry_run {
                for file in &report.files {
                    println!("{file}");
                }
            } else {
                println!(
                    "Generated {} files ({} types from {} controllers)",
                    report.files.len(),
                    report.types,
                    report.entry_points
                );
            }
            0
        }
        Err(err) => {
            error!(error = %err, "Generation failed.");
            eprintln!("{err}");
            1
        }
    }
}

fn execute(cli: &Cli) -> Result<GenerationReport, Error> {
    let config = cli.resolve_config()?;
    debug!(?config, "Resolved configuration.");
    let generator = Generator::new(config);

    if cli.dry_run {
        generator.run(&mut MemorySink::new())
    } else {
        let mut sink = DirectorySink::new(generator.config().output_dir.clone());
        generator.run(&mut sink)
    }
}

fn init_tracing(verbose: bool) {
    let filter = filter_spec(std::env::var("SHAPEGEN_LOG").ok(), verbose);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

/// SHAPEGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
/// or a full tracing filter spec like "shapegen_core=trace".
fn filter_spec(env: Option<String>, verbose: bool) -> String {
    let for_targets = |level: &str| {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    match env {
        Some(level) if is_plain_level(&level) => for_targets(&level.to_ascii_lowercase()),
        Some(spec) => spec,
        None if verbose => for_targets("debug"),
        None => for_targets("info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shapegen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_filter_spec() {
        assert_eq!(
            filter_spec(None, false),
            "shapegen_core=info,shapegen_cli=info"
        );
        assert_eq!(
            filter_spec(None, true),
            "shapegen_core=debug,shapegen_cli=debug"
        );
        assert_eq!(
            filter_spec(Some("WARN".into()), true),
            "shapegen_core=warn,shapegen_cli=warn"
        );
        assert_eq!(
            filter_spec(Some("shapegen_core=trace".into()), false),
            "shapegen_core=trace"
        );
    }

    #[test]
    fn test_flags_parse() {
        let cli = parse(&[
            "-f",
            "a.json",
            "b.json",
            "-o",
            "out",
            "-m",
            "typescript",
            "--strict-null-check",
            "--newline",
            "crlf",
        ]);
        assert_eq!(cli.files, [PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(cli.module, Some(ModuleType::Global));
        assert_eq!(cli.newline, Some(NewlineStyle::Crlf));
        assert!(cli.strict_null_check);
    }

    #[test]
    fn test_invalid_module_rejected() {
        assert!(Cli::try_parse_from(["shapegen", "-m", "amd"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shapegen.toml");
        std::fs::write(
            &path,
            "module-type = \"typescript\"\noutput-dir = \"ts\"\ninputs = [\"shop.json\"]\n",
        )
        .unwrap();
        let config_arg = path.to_str().unwrap();

        let config = parse(&["-c", config_arg]).resolve_config().unwrap();
        assert_eq!(config.module_type, ModuleType::Global);
        assert_eq!(config.output_dir, dir.path().join("ts"));
        assert_eq!(config.inputs, [dir.path().join("shop.json")]);

        let config = parse(&["-c", config_arg, "-m", "module", "-o", "elsewhere"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.module_type, ModuleType::Module);
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_missing_inputs_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();
        let err = parse(&["-c", path.to_str().unwrap()])
            .resolve_config()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
