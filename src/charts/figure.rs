// Figure model: a strongly-typed chart description.
//
// A `Figure` is a list of traces plus a layout. It carries everything needed
// to draw the chart but does no drawing itself: `output::render` turns it
// into SVG/PNG, and `serde` turns it into Plotly figure JSON so any Plotly
// frontend can display it unchanged.
//
// Field names follow Plotly's schema so the serialized form is a valid
// figure. Optional settings are skipped when unset.

use std::collections::BTreeMap;

use serde::Serialize;

/// A complete chart: traces drawn in order, then layout.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One data series.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Scatterpolar(PolarTrace),
}

/// How points in a trace are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "markers+lines")]
    MarkersLines,
}

/// Cartesian marker trace.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Shown on hover only
    pub hovertext: Vec<String>,
    pub mode: Mode,
    pub marker: Marker,
    pub showlegend: bool,
}

/// Polar trace over categorical angles.
#[derive(Debug, Clone, Serialize)]
pub struct PolarTrace {
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub mode: Mode,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub showlegend: bool,
}

/// Marker fill: either one CSS color, or one value per point mapped
/// through `Marker::colorscale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Solid(String),
    Values(Vec<f64>),
}

/// A colorscale as `(position, css color)` stops, positions in [0, 1].
pub type ColorScale = Vec<(f64, String)>;

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    /// Marker edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

impl Marker {
    /// A plain single-color marker with default size and no edge.
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            color: MarkerColor::Solid(color.into()),
            size: None,
            opacity: None,
            colorscale: None,
            line: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }
}

/// Margins in layout pixels.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Margin {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
    pub pad: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
    pub bgcolor: String,
    pub font: Font,
    pub itemwidth: f64,
    pub tracegroupgap: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standoff: Option<f64>,
}

/// A cartesian axis.
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
    pub showgrid: bool,
    pub showticklabels: bool,
    pub zeroline: bool,
    pub showline: bool,
    pub automargin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadialAxis {
    pub range: [f64; 2],
    pub showticklabels: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AngularAxis {
    /// Replaces displayed category text: topic name -> tick label
    pub labelalias: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Polar {
    pub radialaxis: RadialAxis,
    pub angularaxis: AngularAxis,
}

/// A free text annotation positioned in paper coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub xanchor: String,
    pub yanchor: String,
    pub text: String,
    pub showarrow: bool,
    pub borderpad: f64,
    pub borderwidth: f64,
    pub font: Font,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub paper_bgcolor: String,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub font: Font,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    /// Label the figure as a panel of a multi-panel composite ("A", "B", ...).
    ///
    /// The label is bold, upper-cased, and sits just outside the top-left
    /// corner of the plot area. `scale` pushes it further left for figures
    /// with wide left margins.
    pub fn add_panel_annotation(&mut self, text: &str, scale: f64) {
        self.layout.annotations.push(Annotation {
            x: -0.05 * scale,
            y: 1.05,
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            xanchor: "right".to_string(),
            yanchor: "top".to_string(),
            text: format!("<b>{}</b>", text.to_uppercase()),
            showarrow: false,
            borderpad: 0.0,
            borderwidth: 0.0,
            font: Font {
                size: Some(10.0),
                family: None,
                color: Some("black".to_string()),
            },
        });
    }

    /// Scatter traces, in order.
    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scatter(s) => Some(s),
            Trace::Scatterpolar(_) => None,
        })
    }

    /// Polar traces, in order.
    pub fn polar_traces(&self) -> impl Iterator<Item = &PolarTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scatterpolar(p) => Some(p),
            Trace::Scatter(_) => None,
        })
    }

    /// Serialize as Plotly figure JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
