// Chart construction: scatter and spider figures over topic similarities.
//
// Builders validate their inputs, derive topic labels, and return a `Figure`.
// Nothing in here draws pixels; see `output::render` for that.

pub mod figure;
pub mod palette;
pub mod scatter;
pub mod spider;

use figure::{Font, Layout, Legend, Margin, Title};
use palette::PlotConfig;

/// Fully transparent white, used for the paper background.
pub const TRANSPARENT: &str = "rgba(255, 255, 255, 0)";

/// Page settings shared by every figure: size in centimetres, transparent
/// background, a top-right legend slot and the base font.
pub(crate) fn base_layout(
    config: &PlotConfig,
    width_cm: f64,
    height_cm: f64,
    margin_cm: [f64; 4],
) -> Layout {
    let [l, r, t, b] = margin_cm;

    Layout {
        width: config.cm(width_cm),
        height: config.cm(height_cm),
        paper_bgcolor: TRANSPARENT.to_string(),
        margin: Margin {
            l: config.cm(l),
            r: config.cm(r),
            t: config.cm(t),
            b: config.cm(b),
            pad: 0.0,
        },
        legend: Some(Legend {
            x: 1.0,
            y: 1.0,
            xanchor: "right".to_string(),
            yanchor: "top".to_string(),
            bgcolor: TRANSPARENT.to_string(),
            font: Font::sized(config.font_size),
            itemwidth: 30.0,
            tracegroupgap: 10.0,
        }),
        font: Font {
            size: Some(config.font_size),
            family: Some("arial".to_string()),
            color: None,
        },
        title: Title {
            text: None,
            font: Font::sized(config.font_size),
            standoff: None,
        },
        ..Layout::default()
    }
}

/// Repeat the first element at the end so a polar line closes on itself.
pub fn closed_loop<T: Clone>(values: &[T]) -> Vec<T> {
    let mut closed = values.to_vec();
    if let Some(first) = values.first() {
        closed.push(first.clone());
    }
    closed
}
