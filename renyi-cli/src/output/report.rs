//! Plain-text report written to a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use renyi_core::{Graph, GraphAnalysisResult};
use tracing::info;

use super::{OutputError, OutputHandler};

/// Largest node count whose adjacency matrix is written in full.
pub const MATRIX_FULL_LIMIT: usize = 30;

/// Side of the matrix fragment written for larger graphs.
pub const MATRIX_FRAGMENT: usize = 10;

const RULE: &str = "--------------------------------------------------";
const HEAVY_RULE: &str = "==================================================";

/// Writes a plain-text analysis report to a file.
#[derive(Clone, Debug)]
pub struct FileReport {
    path: PathBuf,
}

impl FileReport {
    /// Creates a report handler targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, result: &GraphAnalysisResult) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        render_report(result, &mut writer)?;
        writer.flush()
    }
}

impl OutputHandler for FileReport {
    fn name(&self) -> &'static str {
        "report"
    }

    fn handle(&mut self, result: &GraphAnalysisResult) -> Result<(), OutputError> {
        self.write_file(result)
            .map_err(|source| OutputError::File {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), "report written");
        Ok(())
    }
}

/// Renders the text report for `result` into `writer`.
///
/// The adjacency matrix is written in full up to [`MATRIX_FULL_LIMIT`] nodes;
/// larger graphs get their dimensions, the number of non-zero entries and the
/// top-left [`MATRIX_FRAGMENT`]-square corner.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
pub fn render_report(result: &GraphAnalysisResult, mut writer: impl Write) -> io::Result<()> {
    let params = result.params();
    writeln!(writer, "ERDŐS–RÉNYI GRAPH ANALYSIS")?;
    writeln!(writer, "{HEAVY_RULE}")?;
    writeln!(
        writer,
        "parameters: n={}, p={}",
        params.nodes(),
        params.probability()
    )?;
    writeln!(
        writer,
        "nodes: {}, edges: {}",
        result.total_nodes(),
        result.total_edges()
    )?;
    writeln!(writer, "connected components: {}", result.total_components())?;

    writeln!(writer)?;
    writeln!(writer, "ADJACENCY MATRIX")?;
    writeln!(writer, "{RULE}")?;
    write_matrix(result.graph(), &mut writer)?;

    writeln!(writer)?;
    writeln!(writer, "COMPONENTS")?;
    writeln!(writer, "{RULE}")?;
    let total = result.total_nodes().max(1) as f64;
    for component in result.components() {
        writeln!(writer, "component {}:", component.number())?;
        writeln!(writer, "  size: {} nodes", component.size())?;
        writeln!(writer, "  edges: {}", component.edge_count())?;
        writeln!(writer, "  connected: {}", component.is_connected())?;
        writeln!(writer, "  radius: {}", component.radius())?;
        writeln!(writer, "  diameter: {}", component.diameter())?;
        writeln!(
            writer,
            "  node share: {:.3}",
            component.size() as f64 / total
        )?;
    }
    Ok(())
}

fn write_matrix(graph: &Graph, writer: &mut impl Write) -> io::Result<()> {
    let nodes = graph.node_count();
    let side = if nodes <= MATRIX_FULL_LIMIT {
        nodes
    } else {
        writeln!(writer, "size: {nodes}x{nodes}")?;
        writeln!(writer, "non-zero entries: {}", 2 * graph.edge_count())?;
        writeln!(writer, "top-left {MATRIX_FRAGMENT}x{MATRIX_FRAGMENT} fragment:")?;
        MATRIX_FRAGMENT
    };
    for row in 0..side {
        let cells: Vec<&str> = (0..side)
            .map(|column| if graph.has_edge(row, column) { "1" } else { "0" })
            .collect();
        writeln!(writer, "{}", cells.join(" "))?;
    }
    Ok(())
}
