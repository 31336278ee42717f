// Unit tests for the chart builders.
//
// Tests structural guarantees of scatter_plot and spider_plot over generated
// similarity matrices: every point in exactly one scatter trace, K+1 closed
// spider traces, the global mean trace ignoring labels, and the empty-input
// cases.

use std::collections::HashSet;

use textdemo::charts::figure::{MarkerColor, Trace};
use textdemo::charts::palette::PlotConfig;
use textdemo::charts::scatter::{scatter_plot, ScatterStyle};
use textdemo::charts::spider::{spider_plot, EmptyTopicPolicy, MEAN_TRACE_COLOR, MEAN_TRACE_NAME};
use textdemo::topics::similarity::SimilarityMatrix;

fn generated_rows(seed: u64, n: usize, k: usize) -> Vec<Vec<f64>> {
    let mut state = seed.wrapping_add(17);
    (0..n)
        .map(|_| {
            (0..k)
                .map(|_| {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    ((state >> 33) % 1000) as f64 / 1000.0
                })
                .collect()
        })
        .collect()
}

fn names(k: usize) -> Vec<String> {
    (0..k).map(|i| format!("Topic {i}")).collect()
}

fn embeddings(n: usize) -> Vec<[f64; 2]> {
    (0..n).map(|i| [i as f64, (i * i) as f64]).collect()
}

// ============================================================
// Scatter: partition guarantee
// ============================================================

#[test]
fn scatter_every_point_in_exactly_one_trace() {
    for seed in 0..20 {
        let (n, k) = (30, 1 + seed as usize % 5);
        let sims = SimilarityMatrix::from_rows(&generated_rows(seed, n, k), k).unwrap();
        let fig = scatter_plot(
            &embeddings(n),
            &names(k),
            &sims,
            &PlotConfig::default(),
            &ScatterStyle::default(),
        )
        .unwrap();

        assert_eq!(fig.data.len(), k);

        let mut seen = HashSet::new();
        let mut total = 0;
        for trace in fig.scatter_traces() {
            assert_eq!(trace.x.len(), trace.y.len());
            assert_eq!(trace.x.len(), trace.hovertext.len());
            for id in &trace.hovertext {
                assert!(seen.insert(id.clone()), "point {id} appears twice");
            }
            total += trace.x.len();
        }
        assert_eq!(total, n);
    }
}

#[test]
fn scatter_marker_values_are_own_topic_column() {
    let rows = generated_rows(3, 12, 3);
    let sims = SimilarityMatrix::from_rows(&rows, 3).unwrap();
    let fig = scatter_plot(
        &embeddings(12),
        &names(3),
        &sims,
        &PlotConfig::default(),
        &ScatterStyle::default(),
    )
    .unwrap();

    for (i, trace) in fig.scatter_traces().enumerate() {
        let MarkerColor::Values(values) = &trace.marker.color else {
            panic!("expected per-point marker values");
        };
        for (id, value) in trace.hovertext.iter().zip(values) {
            let n: usize = id.parse().unwrap();
            assert_eq!(*value, rows[n][i]);
            assert!(trace.x.contains(&(n as f64)));
        }
    }
}

#[test]
fn scatter_with_no_points_has_k_empty_traces() {
    let sims = SimilarityMatrix::from_rows(&[], 4).unwrap();
    let fig = scatter_plot(&[], &names(4), &sims, &PlotConfig::default(), &ScatterStyle::default())
        .unwrap();
    assert_eq!(fig.data.len(), 4);
    assert!(fig.scatter_traces().all(|t| t.x.is_empty()));
}

#[test]
fn scatter_more_topics_than_palette_colors() {
    let k = 12;
    let sims = SimilarityMatrix::from_rows(&generated_rows(1, 5, k), k).unwrap();
    let fig = scatter_plot(&embeddings(5), &names(k), &sims, &PlotConfig::default(), &ScatterStyle::default())
        .unwrap();
    assert_eq!(fig.data.len(), k);
}

// ============================================================
// Spider: K+1 closed traces
// ============================================================

#[test]
fn spider_has_k_plus_one_closed_traces() {
    for seed in 0..20 {
        let k = 2 + seed as usize % 5;
        let sims = SimilarityMatrix::from_rows(&generated_rows(seed, 40, k), k).unwrap();
        let fig = spider_plot(&names(k), &sims, &names(k), &PlotConfig::default(), EmptyTopicPolicy::Zero)
            .unwrap();

        assert_eq!(fig.data.len(), k + 1);
        for trace in fig.polar_traces() {
            assert_eq!(trace.r.len(), k + 1);
            assert_eq!(trace.theta.len(), k + 1);
            assert_eq!(trace.r[0], trace.r[k]);
            assert_eq!(trace.theta[0], trace.theta[k]);
        }
    }
}

#[test]
fn spider_global_mean_ignores_labels() {
    let rows = generated_rows(9, 25, 3);
    let sims = SimilarityMatrix::from_rows(&rows, 3).unwrap();
    let fig = spider_plot(&names(3), &sims, &names(3), &PlotConfig::default(), EmptyTopicPolicy::Zero)
        .unwrap();

    let Some(Trace::Scatterpolar(mean)) = fig.data.last() else {
        panic!("last trace should be the polar mean");
    };
    assert_eq!(mean.name.as_deref(), Some(MEAN_TRACE_NAME));
    assert_eq!(mean.marker.color, MarkerColor::Solid(MEAN_TRACE_COLOR.to_string()));

    for k in 0..3 {
        let expected: f64 = rows.iter().map(|r| r[k]).sum::<f64>() / rows.len() as f64;
        assert!((mean.r[k] - expected).abs() < 1e-12);
    }
}

#[test]
fn spider_per_topic_trace_colors_follow_palette() {
    let sims = SimilarityMatrix::from_rows(&generated_rows(2, 10, 3), 3).unwrap();
    let config = PlotConfig::default();
    let fig = spider_plot(&names(3), &sims, &names(3), &config, EmptyTopicPolicy::Zero).unwrap();
    for (i, trace) in fig.polar_traces().take(3).enumerate() {
        assert_eq!(trace.marker.color, MarkerColor::Solid(config.color(i).to_string()));
        assert!(trace.name.is_none());
    }
}

#[test]
fn spider_with_no_documents() {
    let sims = SimilarityMatrix::from_rows(&[], 3).unwrap();

    let fig = spider_plot(&names(3), &sims, &names(3), &PlotConfig::default(), EmptyTopicPolicy::Zero)
        .unwrap();
    assert_eq!(fig.data.len(), 4);
    assert!(fig.polar_traces().all(|t| t.r.iter().all(|&v| v == 0.0)));

    let fig = spider_plot(&names(3), &sims, &names(3), &PlotConfig::default(), EmptyTopicPolicy::NotANumber)
        .unwrap();
    assert!(fig.polar_traces().all(|t| t.r.iter().all(|v| v.is_nan())));
}

#[test]
fn spider_topic_count_mismatch_fails() {
    let sims = SimilarityMatrix::from_rows(&generated_rows(0, 3, 2), 2).unwrap();
    let err = spider_plot(&names(3), &sims, &names(3), &PlotConfig::default(), EmptyTopicPolicy::Zero)
        .unwrap_err();
    assert!(err.to_string().contains("3 topic names"), "got: {err}");
}
