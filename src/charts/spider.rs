// Spider (radar) plot of mean topic-similarity profiles.
//
// For each topic i, the trace answers: "documents whose dominant topic is i:
// how similar are they, on average, to every topic?" A final black trace
// shows the same profile over all documents regardless of label.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use anyhow::Result;
use tracing::{info, warn};

use super::figure::{AngularAxis, Figure, Marker, Mode, Polar, PolarTrace, RadialAxis, Trace};
use super::palette::PlotConfig;
use super::{base_layout, closed_loop};
use crate::topics::similarity::{partition_by_topic, SimilarityMatrix};

/// Name of the all-documents trace.
pub const MEAN_TRACE_NAME: &str = "Mean";

/// Color of the all-documents trace.
pub const MEAN_TRACE_COLOR: &str = "black";

/// What to draw for a profile with no documents behind it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyTopicPolicy {
    /// Every radial value is NaN: the trace exists but draws nothing.
    #[default]
    NotANumber,
    /// Every radial value is zero: the trace collapses onto the centre.
    Zero,
}

impl EmptyTopicPolicy {
    fn fill(self, n_topics: usize) -> Vec<f64> {
        match self {
            Self::NotANumber => vec![f64::NAN; n_topics],
            Self::Zero => vec![0.0; n_topics],
        }
    }
}

impl FromStr for EmptyTopicPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nan" => Ok(Self::NotANumber),
            "zero" => Ok(Self::Zero),
            other => anyhow::bail!("Unknown empty-topic policy '{other}' (expected 'nan' or 'zero')"),
        }
    }
}

/// Build the spider plot.
///
/// `topic_breaks[k]` replaces the displayed tick text of `topics[k]`.
/// Produces exactly `topics.len() + 1` closed-loop traces.
pub fn spider_plot(
    topics: &[String],
    similarities: &SimilarityMatrix,
    topic_breaks: &[String],
    config: &PlotConfig,
    policy: EmptyTopicPolicy,
) -> Result<Figure> {
    let k = similarities.n_topics();
    if topics.len() != k {
        anyhow::bail!(
            "Got {} topic names but the similarity matrix has {} topic columns",
            topics.len(),
            k
        );
    }
    if topic_breaks.len() != k {
        anyhow::bail!(
            "Got {} topic break labels for {} topics",
            topic_breaks.len(),
            k
        );
    }
    // Topic names key the angular axis; a repeat would merge two spokes.
    let mut seen = BTreeSet::new();
    if let Some(dup) = topics.iter().find(|t| !seen.insert(t.as_str())) {
        anyhow::bail!("Duplicate topic name '{dup}'; spider plot topics must be distinct");
    }

    let labels = similarities.topic_labels();
    let groups = partition_by_topic(&labels, k);
    let theta = closed_loop(topics);

    let mut layout = base_layout(config, 10.0, 6.6, [2.5, 2.5, 0.4, 1.2]);
    layout.polar = Some(Polar {
        radialaxis: RadialAxis {
            range: [0.0, 1.0],
            showticklabels: false,
        },
        angularaxis: AngularAxis {
            labelalias: topics
                .iter()
                .cloned()
                .zip(topic_breaks.iter().cloned())
                .collect::<BTreeMap<_, _>>(),
        },
    });

    let mut fig = Figure::new(layout);

    for (i, members) in groups.iter().enumerate() {
        let profile = similarities.mean_profile(members).unwrap_or_else(|| {
            warn!(topic = %topics[i], ?policy, "No documents assigned to topic");
            policy.fill(k)
        });

        fig.add_trace(Trace::Scatterpolar(PolarTrace {
            r: closed_loop(&profile),
            theta: theta.clone(),
            mode: Mode::MarkersLines,
            marker: Marker::solid(config.color(i)),
            name: None,
            showlegend: false,
        }));
    }

    let overall = similarities.column_means().unwrap_or_else(|| {
        warn!(?policy, "No documents at all; overall mean is empty");
        policy.fill(k)
    });

    fig.add_trace(Trace::Scatterpolar(PolarTrace {
        r: closed_loop(&overall),
        theta,
        mode: Mode::MarkersLines,
        marker: Marker::solid(MEAN_TRACE_COLOR),
        name: Some(MEAN_TRACE_NAME.to_string()),
        showlegend: false,
    }));

    info!(
        documents = similarities.n_docs(),
        topics = k,
        "Built spider plot"
    );

    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(k: usize) -> Vec<String> {
        (0..k).map(|i| format!("t{i}")).collect()
    }

    #[test]
    fn test_per_topic_means() {
        let sims = SimilarityMatrix::from_rows(
            &[vec![0.8, 0.2], vec![0.6, 0.4], vec![0.1, 0.9]],
            2,
        )
        .unwrap();
        let fig = spider_plot(&names(2), &sims, &names(2), &PlotConfig::default(), EmptyTopicPolicy::Zero)
            .unwrap();
        let traces: Vec<_> = fig.polar_traces().collect();

        assert_eq!(traces.len(), 3);
        assert!((traces[0].r[0] - 0.7).abs() < 1e-12);
        assert!((traces[0].r[1] - 0.3).abs() < 1e-12);
        assert_eq!(traces[0].r[0], traces[0].r[2]);
        assert_eq!(traces[1].r, vec![0.1, 0.9, 0.1]);
        assert_eq!(traces[2].name.as_deref(), Some("Mean"));
        assert_eq!(traces[2].theta, vec!["t0", "t1", "t0"]);
    }

    #[test]
    fn test_empty_topic_policies() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.9, 0.1]], 2).unwrap();

        let zero = spider_plot(&names(2), &sims, &names(2), &PlotConfig::default(), EmptyTopicPolicy::Zero)
            .unwrap();
        assert_eq!(zero.polar_traces().nth(1).unwrap().r, vec![0.0, 0.0, 0.0]);

        let nan = spider_plot(&names(2), &sims, &names(2), &PlotConfig::default(), EmptyTopicPolicy::NotANumber)
            .unwrap();
        assert!(nan.polar_traces().nth(1).unwrap().r.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_break_label_alias() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.5, 0.5]], 2).unwrap();
        let breaks = vec!["first<br>topic".to_string(), "second".to_string()];
        let fig = spider_plot(&names(2), &sims, &breaks, &PlotConfig::default(), EmptyTopicPolicy::default())
            .unwrap();
        let polar = fig.layout.polar.as_ref().unwrap();
        assert_eq!(polar.angularaxis.labelalias["t0"], "first<br>topic");
        assert_eq!(polar.radialaxis.range, [0.0, 1.0]);
        assert!(!polar.radialaxis.showticklabels);
    }

    #[test]
    fn test_break_count_mismatch_fails() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.5, 0.5]], 2).unwrap();
        let result = spider_plot(&names(2), &sims, &names(1), &PlotConfig::default(), EmptyTopicPolicy::Zero);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_topic_names_fail() {
        let sims = SimilarityMatrix::from_rows(&[vec![0.2, 0.3, 0.5]], 3).unwrap();
        let topics = vec!["vision".to_string(), "robots".to_string(), "vision".to_string()];
        let err = spider_plot(&topics, &sims, &topics, &PlotConfig::default(), EmptyTopicPolicy::Zero)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate topic name 'vision'"), "got: {err}");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("nan".parse::<EmptyTopicPolicy>().unwrap(), EmptyTopicPolicy::NotANumber);
        assert_eq!("ZERO".parse::<EmptyTopicPolicy>().unwrap(), EmptyTopicPolicy::Zero);
        assert!("omit".parse::<EmptyTopicPolicy>().is_err());
    }
}
