// Scatter plot of document embeddings, grouped by dominant topic.
//
// One trace per topic. Within a trace, marker saturation follows the
// document's similarity to *that* topic, so confidently-assigned documents
// are opaque and borderline ones fade toward the translucent end of the
// topic's colorscale.

use anyhow::Result;
use tracing::{debug, info};

use super::figure::{Axis, Figure, Font, Marker, MarkerColor, MarkerLine, Mode, ScatterTrace, Title, Trace};
use super::palette::PlotConfig;
use super::base_layout;
use crate::topics::similarity::{partition_by_topic, SimilarityMatrix};

/// Marker styling for scatter traces.
#[derive(Debug, Clone)]
pub struct ScatterStyle {
    /// Marker diameter in layout pixels
    pub marker_size: f64,
    pub marker_opacity: f64,
    /// Edge thickness in layout pixels
    pub edge_width: f64,
    /// Figure is square, this many centimetres a side
    pub size_cm: f64,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            marker_size: 7.0,
            marker_opacity: 0.8,
            edge_width: 1.0,
            size_cm: 6.6,
        }
    }
}

/// Build the embedding scatter plot.
///
/// `embeddings[n]` is the 2D position of document `n`; `topics` names the
/// similarity columns. Fails if the row counts or topic counts disagree.
pub fn scatter_plot(
    embeddings: &[[f64; 2]],
    topics: &[String],
    similarities: &SimilarityMatrix,
    config: &PlotConfig,
    style: &ScatterStyle,
) -> Result<Figure> {
    if embeddings.len() != similarities.n_docs() {
        anyhow::bail!(
            "Got {} embeddings but {} similarity rows; they must describe the same documents",
            embeddings.len(),
            similarities.n_docs()
        );
    }
    if topics.len() != similarities.n_topics() {
        anyhow::bail!(
            "Got {} topic names but the similarity matrix has {} topic columns",
            topics.len(),
            similarities.n_topics()
        );
    }

    let labels = similarities.topic_labels();
    let groups = partition_by_topic(&labels, topics.len());

    let mut layout = base_layout(config, style.size_cm, style.size_cm, [1.2, 0.4, 0.4, 1.2]);
    layout.xaxis = Some(axis("z1", config));
    layout.yaxis = Some(axis("z2", config));

    let mut fig = Figure::new(layout);

    for (i, members) in groups.iter().enumerate() {
        let colorscale = vec![
            (0.0, config.translucent(i)),
            (1.0, config.color(i).to_string()),
        ];

        let trace = ScatterTrace {
            x: members.iter().map(|&n| embeddings[n][0]).collect(),
            y: members.iter().map(|&n| embeddings[n][1]).collect(),
            hovertext: members.iter().map(|n| n.to_string()).collect(),
            mode: Mode::Markers,
            marker: Marker {
                color: MarkerColor::Values(
                    members.iter().map(|&n| similarities.get(n, i)).collect(),
                ),
                size: Some(style.marker_size),
                opacity: Some(style.marker_opacity),
                colorscale: Some(colorscale),
                line: Some(MarkerLine {
                    color: config.color(i).to_string(),
                    width: style.edge_width,
                }),
            },
            showlegend: false,
        };

        debug!(topic = %topics[i], points = members.len(), "Added scatter trace");
        fig.add_trace(Trace::Scatter(trace));
    }

    info!(
        documents = embeddings.len(),
        topics = topics.len(),
        "Built scatter plot"
    );

    Ok(fig)
}

/// Gridded axis with tick labels and no zero line.
fn axis(title: &str, config: &PlotConfig) -> Axis {
    Axis {
        title: Title {
            text: Some(title.to_string()),
            font: Font::sized(config.font_size),
            standoff: Some(config.cm(0.1)),
        },
        showgrid: true,
        showticklabels: true,
        zeroline: false,
        showline: false,
        automargin: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(k: usize) -> Vec<String> {
        (0..k).map(|i| format!("topic {i}")).collect()
    }

    #[test]
    fn test_points_split_by_dominant_topic() {
        let sims = SimilarityMatrix::from_rows(
            &[vec![0.9, 0.1], vec![0.2, 0.8], vec![0.6, 0.4]],
            2,
        )
        .unwrap();
        let emb = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];

        let fig = scatter_plot(&emb, &topics(2), &sims, &PlotConfig::default(), &ScatterStyle::default())
            .unwrap();
        let traces: Vec<_> = fig.scatter_traces().collect();

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].x, vec![0.0, 2.0]);
        assert_eq!(traces[0].hovertext, vec!["0", "2"]);
        assert_eq!(traces[0].marker.color, MarkerColor::Values(vec![0.9, 0.6]));
        assert_eq!(traces[1].y, vec![1.0]);
        assert_eq!(traces[1].marker.color, MarkerColor::Values(vec![0.8]));
    }

    #[test]
    fn test_colorscale_runs_translucent_to_opaque() {
        let sims = SimilarityMatrix::from_rows(&[vec![1.0]], 1).unwrap();
        let config = PlotConfig::default();
        let fig = scatter_plot(&[[0.0, 0.0]], &topics(1), &sims, &config, &ScatterStyle::default())
            .unwrap();
        let trace = fig.scatter_traces().next().unwrap();

        let scale = trace.marker.colorscale.as_ref().unwrap();
        assert_eq!(scale[0], (0.0, "rgba(99, 110, 250, 0.1)".to_string()));
        assert_eq!(scale[1], (1.0, "#636EFA".to_string()));
        assert_eq!(trace.marker.line.as_ref().unwrap().color, "#636EFA");
        assert!(!trace.showlegend);
    }

    #[test]
    fn test_axes_titles() {
        let sims = SimilarityMatrix::from_rows(&[], 2).unwrap();
        let fig = scatter_plot(&[], &topics(2), &sims, &PlotConfig::default(), &ScatterStyle::default())
            .unwrap();
        let x = fig.layout.xaxis.as_ref().unwrap();
        assert_eq!(x.title.text.as_deref(), Some("z1"));
        assert!(x.showgrid && !x.zeroline);
        assert_eq!(fig.layout.yaxis.as_ref().unwrap().title.text.as_deref(), Some("z2"));
    }

    #[test]
    fn test_mismatched_rows_fail() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.5, 0.5]], 2).unwrap();
        let err = scatter_plot(&[], &topics(2), &sims, &PlotConfig::default(), &ScatterStyle::default())
            .unwrap_err();
        assert!(err.to_string().contains("0 embeddings"), "got: {err}");
    }

    #[test]
    fn test_mismatched_topics_fail() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.5, 0.5]], 2).unwrap();
        let result = scatter_plot(&[[0.0, 0.0]], &topics(3), &sims, &PlotConfig::default(), &ScatterStyle::default());
        assert!(result.is_err());
    }
}
