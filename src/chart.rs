use std::collections::BTreeMap;
use std::fmt::Write as _;

use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::aggregate::mean;
use crate::data::error::AggregateError;
use crate::data::model::{Category, StationTable, COL_LATITUDE, COL_LONGITUDE};

// ---------------------------------------------------------------------------
// Chart – what the pipeline hands to a renderer
// ---------------------------------------------------------------------------

/// A renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Series(Series),
    Bars(Vec<BarDatum>),
    Scatter(Scatter),
    Columns(ColumnLayer),
    Graph(DirectedGraph),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    Line,
    /// Line filled down to zero.
    Area,
    /// Line with a marker of the given colour at every point.
    LineWithMarkers(Color32),
}

/// A single x/y series, x ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub groups: Vec<ScatterGroup>,
    /// Tick labels when x is categorical (x = index into this list).
    pub x_categories: Vec<String>,
    /// Keep one unit of x as long as one unit of y (geographic axes).
    pub equal_aspect: bool,
}

// ---------------------------------------------------------------------------
// Column layer
// ---------------------------------------------------------------------------

/// Camera over the column layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    /// Tilt in degrees.
    pub pitch: f64,
}

impl ViewState {
    /// Centre on the mean station position.
    pub fn centered_on(table: &StationTable) -> Result<Self, AggregateError> {
        Ok(Self {
            latitude: mean(table.iter().map(|r| r.latitude), COL_LATITUDE)?,
            longitude: mean(table.iter().map(|r| r.longitude), COL_LONGITUDE)?,
            zoom: 5.0,
            pitch: 50.0,
        })
    }

    /// Half-width in degrees of the area visible at this zoom level.
    pub fn half_span_degrees(&self) -> f64 {
        180.0 / 2f64.powf(self.zoom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationColumn {
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub tooltip: String,
}

/// One extruded column per station.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayer {
    pub columns: Vec<StationColumn>,
    /// Column height before scaling, metres.
    pub elevation: f64,
    pub elevation_scale: f64,
    /// Column radius, metres.
    pub radius: f64,
    pub fill: Color32,
    pub view: ViewState,
}

impl ColumnLayer {
    /// Fails only when `table` is empty (no centre to look at).
    pub fn from_table(table: &StationTable, fill: Color32) -> Result<Self, AggregateError> {
        let columns = table
            .iter()
            .map(|r| StationColumn {
                position: [r.longitude, r.latitude],
                tooltip: format!(
                    "Station: {}\nPrefecture: {}\nLine: {}",
                    r.station_name, r.prefecture, r.line
                ),
            })
            .collect();
        Ok(Self {
            columns,
            elevation: 1000.0,
            elevation_scale: 50.0,
            radius: 10_000.0,
            fill,
            view: ViewState::centered_on(table)?,
        })
    }

    /// Scaled column height in metres.
    pub fn height_m(&self) -> f64 {
        self.elevation * self.elevation_scale
    }

    /// Column closest to a `[longitude, latitude]` point.
    pub fn nearest(&self, lon: f64, lat: f64) -> Option<&StationColumn> {
        self.columns.iter().min_by(|a, b| {
            let da = (a.position[0] - lon).powi(2) + (a.position[1] - lat).powi(2);
            let db = (b.position[0] - lon).powi(2) + (b.position[1] - lat).powi(2);
            da.total_cmp(&db)
        })
    }
}

// ---------------------------------------------------------------------------
// Directed graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Box,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    pub fill: Option<Color32>,
}

/// A left-to-right directed graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectedGraph {
    pub nodes: Vec<GraphNode>,
    /// Edges as indices into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

impl DirectedGraph {
    /// Lines pointing at their terminal stations (nearest to and farthest
    /// from Tokyo).  Stations shared by several lines become one node.
    pub fn line_termini(table: &StationTable, colors: &ColorMap) -> Self {
        let mut graph = DirectedGraph::default();
        let mut station_ids: BTreeMap<&str, usize> = BTreeMap::new();

        for line in table.first_appearance(Category::Line) {
            let stops: Vec<_> = table.iter().filter(|r| r.line == line).collect();
            let nearest = stops.iter().copied().min_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
            let farthest = stops.iter().copied().max_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

            let line_idx = graph.push(GraphNode {
                id: node_id(line),
                label: line.to_string(),
                shape: NodeShape::Box,
                fill: Some(colors.color_for(line)),
            });

            for stop in nearest.into_iter().chain(farthest) {
                let name = stop.station_name.as_str();
                let idx = match station_ids.get(name) {
                    Some(&idx) => idx,
                    None => {
                        let idx = graph.push(GraphNode {
                            id: node_id(name),
                            label: format!("{name} Station"),
                            shape: NodeShape::Ellipse,
                            fill: None,
                        });
                        station_ids.insert(name, idx);
                        idx
                    }
                };
                if !graph.edges.contains(&(line_idx, idx)) {
                    graph.edges.push((line_idx, idx));
                }
            }
        }
        graph
    }

    /// Append a node; an id already taken gets the node's index appended.
    fn push(&mut self, mut node: GraphNode) -> usize {
        if self.nodes.iter().any(|n| n.id == node.id) {
            node.id = format!("{}_{}", node.id, self.nodes.len());
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Longest-path rank of every node (sources are rank 0).
    pub fn ranks(&self) -> Vec<usize> {
        let mut ranks = vec![0; self.nodes.len()];
        // Relaxation terminates after |V| rounds on an acyclic graph.
        for _ in 0..self.nodes.len() {
            let mut changed = false;
            for &(from, to) in &self.edges {
                if ranks[to] < ranks[from] + 1 {
                    ranks[to] = ranks[from] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        ranks
    }

    /// Render as Graphviz DOT text.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph G {\n    rankdir=LR;\n\n");
        for node in &self.nodes {
            let shape = match node.shape {
                NodeShape::Box => "box",
                NodeShape::Ellipse => "ellipse",
            };
            let _ = write!(
                out,
                "    {} [label=\"{}\", shape={shape}",
                node.id,
                escape_label(&node.label)
            );
            if let Some(c) = node.fill {
                let _ = write!(out, ", style=filled, color=\"#{:02x}{:02x}{:02x}\"", c.r(), c.g(), c.b());
            }
            out.push_str("];\n");
        }
        out.push('\n');
        for &(from, to) in &self.edges {
            let _ = writeln!(out, "    {} -> {};", self.nodes[from].id, self.nodes[to].id);
        }
        out.push_str("}\n");
        out
    }
}

/// DOT-safe identifier: ASCII alphanumerics, everything else as `_`.
/// Names without any ASCII alphanumeric collide here; `push` dedupes them.
fn node_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape a label for a double-quoted DOT string.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
