use crate::core::render::lattice_to_text;
use crate::domain::ports::{BuildOutcome, Pipeline};
use crate::utils::error::Result;

/// Counts and outputs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub placed: usize,
    pub isolated: usize,
    pub unplaced: Vec<String>,
    pub rejected: Vec<String>,
    pub outputs: Vec<String>,
}

pub struct XwordEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> XwordEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<GenerationReport> {
        tracing::info!("Starting crossword generation...");

        // Extract
        let entries = self.pipeline.extract()?;
        tracing::info!("Read {} word entries", entries.len());

        // Build
        let BuildOutcome {
            mut crossword,
            rejected,
            isolated,
        } = self.pipeline.build(entries)?;
        let renderer = crossword.renderer();
        let (rows, cols) = renderer.dimensions();
        tracing::debug!("Lattice:\n{}", lattice_to_text(&renderer.lattice()));
        tracing::info!(
            "Placed {} words on a {}x{} grid ({} isolated)",
            crossword.placed_words().len(),
            rows,
            cols,
            isolated
        );

        // Load
        let outputs = self.pipeline.load(&mut crossword)?;
        for output in &outputs {
            tracing::info!("Output saved to: {}", output);
        }

        Ok(GenerationReport {
            seed: crossword.seed(),
            rows,
            cols,
            placed: crossword.placed_words().len(),
            isolated,
            unplaced: crossword
                .unplaced_words()
                .iter()
                .map(|w| w.text().to_string())
                .collect(),
            rejected,
            outputs,
        })
    }
}
