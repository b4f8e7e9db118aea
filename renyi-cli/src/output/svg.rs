//! SVG rendering of the analysed graph.

use std::f64::consts::TAU;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use renyi_core::GraphAnalysisResult;
use tracing::info;

use super::{OutputError, OutputHandler};

/// Largest node count rendered by default.
pub const DEFAULT_SVG_MAX_NODES: usize = 100;

const CANVAS: f64 = 800.0;
const TITLE_HEIGHT: f64 = 40.0;

/// Renders the graph to an SVG file.
///
/// Components occupy the cells of a square grid in component order; within a
/// cell the nodes sit evenly on a circle.
#[derive(Clone, Debug)]
pub struct SvgVisualization {
    path: PathBuf,
    max_nodes: usize,
}

impl SvgVisualization {
    /// Creates a renderer targeting `path` with the default node limit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_nodes: DEFAULT_SVG_MAX_NODES,
        }
    }

    /// Overrides the largest node count that will be rendered.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Largest node count that will be rendered.
    #[must_use]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    fn write_file(&self, result: &GraphAnalysisResult) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        render_svg(result, &mut writer)?;
        writer.flush()
    }
}

impl OutputHandler for SvgVisualization {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn handle(&mut self, result: &GraphAnalysisResult) -> Result<(), OutputError> {
        let nodes = result.total_nodes();
        if nodes > self.max_nodes {
            info!(
                nodes,
                limit = self.max_nodes,
                "graph too large to visualise; skipping svg"
            );
            return Ok(());
        }
        self.write_file(result)
            .map_err(|source| OutputError::File {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), "svg written");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// Places every node, returning coordinates indexed by node id.
fn layout(result: &GraphAnalysisResult) -> Vec<Point> {
    let components = result.components();
    let columns = grid_columns(components.len());
    let cell = CANVAS / columns as f64;

    let mut positions = vec![Point { x: 0.0, y: 0.0 }; result.total_nodes()];
    for (index, component) in components.iter().enumerate() {
        let centre = Point {
            x: cell * ((index % columns) as f64 + 0.5),
            y: TITLE_HEIGHT + cell * ((index / columns) as f64 + 0.5),
        };
        let size = component.size();
        let radius = if size > 1 { cell * 0.38 } else { 0.0 };
        for (slot, &node) in component.nodes().iter().enumerate() {
            let angle = TAU * slot as f64 / size as f64;
            if let Some(position) = positions.get_mut(node) {
                *position = Point {
                    x: centre.x + radius * angle.cos(),
                    y: centre.y + radius * angle.sin(),
                };
            }
        }
    }
    positions
}

/// Smallest square grid side holding `cells` cells.
fn grid_columns(cells: usize) -> usize {
    let mut columns = 1;
    while columns * columns < cells {
        columns += 1;
    }
    columns
}

fn node_radius(result: &GraphAnalysisResult) -> f64 {
    let columns = grid_columns(result.total_components());
    (CANVAS / columns as f64 * 0.05).clamp(2.0, 8.0)
}

/// Renders `result` as a standalone SVG document into `writer`.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
pub fn render_svg(result: &GraphAnalysisResult, mut writer: impl Write) -> io::Result<()> {
    let positions = layout(result);
    let height = CANVAS + TITLE_HEIGHT;
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS}" height="{height}" viewBox="0 0 {CANVAS} {height}">"#
    )?;
    writeln!(
        writer,
        r#"  <rect width="100%" height="100%" fill="white"/>"#
    )?;
    writeln!(
        writer,
        r#"  <text x="{}" y="26" font-family="sans-serif" font-size="18" text-anchor="middle">Erdős–Rényi graph (p={}): {} components, {} nodes</text>"#,
        CANVAS / 2.0,
        result.params().probability(),
        result.total_components(),
        result.total_nodes()
    )?;

    writeln!(writer, r#"  <g stroke="gray" stroke-width="1" stroke-opacity="0.6">"#)?;
    for (left, right) in result.graph().edges() {
        let (a, b) = (positions[left], positions[right]);
        writeln!(
            writer,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            a.x, a.y, b.x, b.y
        )?;
    }
    writeln!(writer, "  </g>")?;

    let radius = node_radius(result);
    writeln!(writer, r#"  <g fill="lightblue" stroke="black" stroke-width="1">"#)?;
    for (node, point) in positions.iter().enumerate() {
        writeln!(
            writer,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{radius:.1}"><title>{node}</title></circle>"#,
            point.x, point.y
        )?;
    }
    writeln!(writer, "  </g>")?;
    writeln!(writer, "</svg>")
}

#[cfg(test)]
mod tests {
    use super::*;

    use renyi_core::{EngineBuilder, ExecutionStrategy, Graph, GraphParams};
    use renyi_test_support::tracing::RecordingLayer;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn analyse(nodes: usize, probability: f64) -> GraphAnalysisResult {
        EngineBuilder::new()
            .with_seed(8)
            .build()
            .expect("engine must build")
            .analyze(&GraphParams::new(nodes, probability).expect("params must be valid"))
            .expect("analysis must succeed")
    }

    #[test]
    fn svg_contains_every_node_and_edge() {
        let result = analyse(6, 1.0);
        let mut buffer = Vec::new();
        render_svg(&result, &mut buffer).expect("rendering to memory succeeds");
        let svg = String::from_utf8(buffer).expect("svg is UTF-8");
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle ").count(), 6);
        assert_eq!(svg.matches("<line ").count(), 15);
        assert!(svg.contains("(p=1): 1 components, 6 nodes"));
    }

    #[test]
    fn layout_follows_recorded_components() {
        let mut graph = Graph::with_nodes(5);
        graph.try_add_edge(0, 2).expect("edge is valid");
        graph.try_add_edge(2, 4).expect("edge is valid");
        let result = EngineBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .build()
            .expect("engine must build")
            .analyze_graph(GraphParams::new(5, 0.5).expect("params are valid"), graph)
            .expect("analysis must succeed");

        let positions = layout(&result);
        let cell = CANVAS / 2.0;
        let first_centre = Point {
            x: cell / 2.0,
            y: TITLE_HEIGHT + cell / 2.0,
        };
        for node in [0, 2, 4] {
            let point = positions[node];
            let distance = (point.x - first_centre.x).hypot(point.y - first_centre.y);
            assert!((distance - cell * 0.38).abs() < 1e-9);
        }
        assert_eq!(
            positions[1],
            Point {
                x: cell * 1.5,
                y: TITLE_HEIGHT + cell / 2.0,
            }
        );
        assert_eq!(
            positions[3],
            Point {
                x: cell / 2.0,
                y: TITLE_HEIGHT + cell * 1.5,
            }
        );
    }

    #[test]
    fn grid_is_the_smallest_square() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(50), 8);
    }

    #[test]
    fn isolated_nodes_get_distinct_cells() {
        let positions = layout(&analyse(4, 0.0));
        assert_eq!(positions.len(), 4);
        for (index, left) in positions.iter().enumerate() {
            for right in &positions[index + 1..] {
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn component_nodes_share_a_circle() {
        let positions = layout(&analyse(5, 1.0));
        let centre = Point {
            x: CANVAS / 2.0,
            y: TITLE_HEIGHT + CANVAS / 2.0,
        };
        let distances: Vec<f64> = positions
            .iter()
            .map(|p| ((p.x - centre.x).powi(2) + (p.y - centre.y).powi(2)).sqrt())
            .collect();
        for distance in distances {
            assert!((distance - CANVAS * 0.38).abs() < 1e-9);
        }
    }

    #[test]
    fn oversized_graph_is_skipped() {
        let dir = TempDir::new().expect("temp dir must be created");
        let path = dir.path().join("graph.svg");
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());

        tracing::subscriber::with_default(subscriber, || {
            SvgVisualization::new(&path)
                .with_max_nodes(3)
                .handle(&analyse(4, 0.5))
        })
        .expect("skipping is not a failure");

        assert!(!path.exists());
        assert!(layer.has_event(Level::INFO, "graph too large to visualise; skipping svg"));
    }

    #[test]
    fn handler_writes_file() {
        let dir = TempDir::new().expect("temp dir must be created");
        let path = dir.path().join("graph.svg");
        let handler = SvgVisualization::new(&path);
        assert_eq!(handler.max_nodes(), DEFAULT_SVG_MAX_NODES);
        let mut handler = handler;
        handler
            .handle(&analyse(10, 0.3))
            .expect("svg must be written");
        let written = std::fs::read_to_string(handler.path()).expect("svg must exist");
        assert!(written.contains("10 nodes"));
    }
}
