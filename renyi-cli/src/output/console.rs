//! Three-line summary written to a stream.

use std::io::Write;

use renyi_core::GraphAnalysisResult;

use super::{OutputError, OutputHandler};

/// Writes a three-line summary of the result to a stream.
pub struct ConsoleSummary<W> {
    writer: W,
}

impl<W: Write> ConsoleSummary<W> {
    /// Creates a summary handler writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputHandler for ConsoleSummary<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn handle(&mut self, result: &GraphAnalysisResult) -> Result<(), OutputError> {
        let params = result.params();
        let write = |writer: &mut W| -> std::io::Result<()> {
            writeln!(
                writer,
                "graph: n={}, p={}",
                params.nodes(),
                params.probability()
            )?;
            writeln!(
                writer,
                "nodes: {}, edges: {}",
                result.total_nodes(),
                result.total_edges()
            )?;
            writeln!(writer, "components: {}", result.total_components())?;
            writer.flush()
        };
        write(&mut self.writer).map_err(|source| OutputError::Stream { source })
    }
}
