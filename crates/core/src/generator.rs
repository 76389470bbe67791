//! End-to-end generation pipeline.

use tracing::{info, warn};

use crate::assembler::assemble_graph;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::graph::discover;
use crate::metadata::{MetadataCatalog, TypeMetadataProvider};
use crate::sink::ArtifactSink;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub entry_points: usize,
    /// Discovered types, excluding the contract.
    pub types: usize,
    /// Written filenames, in write order.
    pub files: Vec<String>,
}

/// Runs discovery, rendering and output for one configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load and merge the configured input catalogs.
    pub fn load_catalog(&self) -> Result<MetadataCatalog> {
        let catalog = MetadataCatalog::load_all(&self.config.inputs)?;
        info!(
            inputs = self.config.inputs.len(),
            types = catalog.len(),
            "Loaded metadata."
        );
        Ok(catalog)
    }

    /// Generate from `provider` into `sink`.
    ///
    /// Nothing reaches the sink unless every artifact rendered successfully.
    pub fn generate<P: TypeMetadataProvider + ?Sized>(
        &self,
        provider: &P,
        sink: &mut dyn ArtifactSink,
    ) -> Result<GenerationReport> {
        let entry_points = provider.entry_points();
        if entry_points.is_empty() {
            warn!("No API controllers found; only the REST contract will be written.");
        }
        info!(entry_points = entry_points.len(), "Discovering types.");
        let graph = discover(&entry_points, provider)?;

        let artifacts = assemble_graph(&graph, &self.config.build_rules(), self.config.newline)?;
        sink.write_all(&artifacts)?;

        Ok(GenerationReport {
            entry_points: entry_points.len(),
            types: graph.len(),
            files: artifacts.into_iter().map(|a| a.filename).collect(),
        })
    }

    /// Load the configured inputs and generate into `sink`.
    pub fn run(&self, sink: &mut dyn ArtifactSink) -> Result<GenerationReport> {
        let catalog = self.load_catalog()?;
        self.generate(&catalog, sink)
    }
}
