// Figure rendering with plotters.
//
// Draws a `Figure` to SVG or PNG. This is a small renderer for exactly the
// two chart shapes the crate builds, not a general Plotly implementation:
//
//   - cartesian scatter traces, markers colored through the trace colorscale
//   - polar traces over categorical angles, first category at 12 o'clock,
//     proceeding counter-clockwise, radial axis mapped onto the unit circle
//
// Layout sizes are in Plotly layout pixels; `scale` multiplies everything
// (1.0 for SVG, `png_scaling` for print-resolution PNG).

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{bail, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use tracing::debug;

use crate::charts::figure::{Figure, MarkerColor, PolarTrace, ScatterTrace};
use crate::charts::palette::Rgba;
use crate::topics::labels::LINE_BREAK;

/// Half-width of the polar drawing square in data units; the unit circle is
/// the outer ring and the rest leaves room for tick labels.
const POLAR_EXTENT: f64 = 1.4;

/// Where angular tick labels sit, in data units.
const POLAR_LABEL_RADIUS: f64 = 1.12;

/// Grid rings drawn inside the unit circle.
const POLAR_RINGS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Draw `figure` as an SVG file.
pub fn render_svg(figure: &Figure, path: &Path) -> Result<()> {
    let (w, h) = pixel_size(figure, 1.0);
    let root = SVGBackend::new(path, (w, h)).into_drawing_area();
    draw_figure(&root, figure, 1.0)?;
    root.present()?;
    debug!(path = %path.display(), width = w, height = h, "Rendered SVG");
    Ok(())
}

/// Draw `figure` as a PNG file, scaled by `scale`.
///
/// Bitmaps have no transparency here, so the page is filled white before the
/// (usually transparent) paper color is applied.
///
/// Rasterizing text needs a font backend, which only the `ttf` feature
/// provides. Without it this fails before anything is drawn.
pub fn render_png(figure: &Figure, path: &Path, scale: f64) -> Result<()> {
    if !png_supported() {
        bail!(
            "PNG output needs font support; rebuild with `--features ttf` \
             or write the figure as SVG or JSON instead"
        );
    }
    let (w, h) = pixel_size(figure, scale);
    let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_figure(&root, figure, scale)?;
    root.present()?;
    debug!(path = %path.display(), width = w, height = h, "Rendered PNG");
    Ok(())
}

/// Whether this build can rasterize text into PNG files.
pub fn png_supported() -> bool {
    cfg!(feature = "ttf")
}

fn pixel_size(figure: &Figure, scale: f64) -> (u32, u32) {
    let w = (figure.layout.width * scale).round().max(1.0) as u32;
    let h = (figure.layout.height * scale).round().max(1.0) as u32;
    (w, h)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    scale: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let paper = Rgba::parse_css(&figure.layout.paper_bgcolor)?;
    if paper.a > 0.0 {
        root.fill(&to_plotters(paper))?;
    }

    if figure.layout.polar.is_some() {
        draw_polar(root, figure, scale)?;
    } else {
        draw_cartesian(root, figure, scale)?;
    }

    draw_annotations(root, figure, scale)?;
    Ok(())
}

fn draw_cartesian<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    scale: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let layout = &figure.layout;
    let px = |v: f64| (v * scale).round() as i32;
    let font_px = layout.font.size.unwrap_or(8.0) * scale;

    let (x_range, y_range) = data_ranges(figure.scatter_traces());

    let mut chart = ChartBuilder::on(root)
        .margin_top(px(layout.margin.t))
        .margin_right(px(layout.margin.r))
        .x_label_area_size(px(layout.margin.b))
        .y_label_area_size(px(layout.margin.l))
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let x_title = axis_title(layout.xaxis.as_ref());
    let y_title = axis_title(layout.yaxis.as_ref());
    let show_grid = layout.xaxis.as_ref().map_or(true, |a| a.showgrid);

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_title)
        .y_desc(y_title)
        .label_style(("sans-serif", font_px))
        .axis_desc_style(("sans-serif", font_px));
    if !show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for trace in figure.scatter_traces() {
        let markers = marker_points(trace)?;
        let radius = ((trace.marker.size.unwrap_or(6.0) / 2.0) * scale).round().max(1.0) as i32;

        chart.draw_series(
            markers
                .iter()
                .map(|&(x, y, fill)| Circle::new((x, y), radius, to_plotters(fill).filled())),
        )?;

        if let Some(line) = &trace.marker.line {
            let edge = Rgba::parse_css(&line.color)?;
            let opacity = trace.marker.opacity.unwrap_or(1.0);
            let edge = Rgba { a: edge.a * opacity, ..edge };
            let width = (line.width * scale).round().max(1.0) as u32;
            chart.draw_series(markers.iter().map(|&(x, y, _)| {
                Circle::new((x, y), radius, to_plotters(edge).stroke_width(width))
            }))?;
        }
    }

    Ok(())
}

fn draw_polar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    scale: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let layout = &figure.layout;
    let Some(polar) = &layout.polar else {
        return Ok(());
    };
    let px = |v: f64| (v * scale).round() as i32;
    let font_px = layout.font.size.unwrap_or(8.0) * scale;

    // Polar plots must stay circular: centre a square in the plot area.
    let area = root.margin(
        px(layout.margin.t),
        px(layout.margin.b),
        px(layout.margin.l),
        px(layout.margin.r),
    );
    let (w, h) = area.dim_in_pixel();
    let side = w.min(h) as i32;
    let dx = (w as i32 - side) / 2;
    let dy = (h as i32 - side) / 2;
    let square = area.margin(dy, dy, dx, dx);

    let mut chart = ChartBuilder::on(&square).build_cartesian_2d(
        -POLAR_EXTENT..POLAR_EXTENT,
        -POLAR_EXTENT..POLAR_EXTENT,
    )?;

    let categories = polar_categories(figure.polar_traces());
    let n = categories.len();
    let grid = to_plotters(Rgba::parse_css("rgba(0, 0, 0, 0.15)")?);

    for ring in POLAR_RINGS {
        chart.draw_series(std::iter::once(PathElement::new(
            (0..=72)
                .map(|i| polar_point(ring, i as f64 / 72.0 * 2.0 * PI - PI / 2.0))
                .collect::<Vec<_>>(),
            grid.stroke_width(1),
        )))?;
    }

    let units_per_px = 2.0 * POLAR_EXTENT / side.max(1) as f64;
    for (j, category) in categories.iter().enumerate() {
        let angle = category_angle(j, n);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), polar_point(1.0, angle)],
            grid.stroke_width(1),
        )))?;

        let label = polar
            .angularaxis
            .labelalias
            .get(category)
            .unwrap_or(category);
        let lines: Vec<&str> = label.split(LINE_BREAK).collect();
        let (lx, ly) = polar_point(POLAR_LABEL_RADIUS, angle);
        let hpos = if angle.cos() > 0.1 {
            HPos::Left
        } else if angle.cos() < -0.1 {
            HPos::Right
        } else {
            HPos::Center
        };
        let line_height = font_px * 1.2 * units_per_px;
        let top = ly + line_height * (lines.len() as f64 - 1.0) / 2.0;

        let style = TextStyle::from(("sans-serif", font_px).into_font())
            .pos(Pos::new(hpos, VPos::Center))
            .color(&BLACK);
        chart.draw_series(lines.iter().enumerate().map(|(i, line)| {
            Text::new(
                line.to_string(),
                (lx, top - i as f64 * line_height),
                style.clone(),
            )
        }))?;
    }

    let [r_min, r_max] = polar.radialaxis.range;
    let span = if r_max > r_min { r_max - r_min } else { 1.0 };
    let marker_radius = (3.0 * scale).round().max(1.0) as i32;
    let line_width = (2.0 * scale).round().max(1.0) as u32;

    for trace in figure.polar_traces() {
        let color = match &trace.marker.color {
            MarkerColor::Solid(css) => Rgba::parse_css(css)?,
            MarkerColor::Values(_) => Rgba::BLACK,
        };
        let style = to_plotters(color);

        for run in finite_runs(trace, &categories, r_min, span) {
            if run.len() > 1 {
                chart.draw_series(LineSeries::new(run.clone(), style.stroke_width(line_width)))?;
            }
            chart.draw_series(
                run.iter()
                    .map(|&p| Circle::new(p, marker_radius, style.filled())),
            )?;
        }
    }

    Ok(())
}

fn draw_annotations<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    scale: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let layout = &figure.layout;
    let plot_w = layout.width - layout.margin.l - layout.margin.r;
    let plot_h = layout.height - layout.margin.t - layout.margin.b;

    for ann in &layout.annotations {
        let x = (layout.margin.l + ann.x * plot_w) * scale;
        let y = (layout.margin.t + (1.0 - ann.y) * plot_h) * scale;
        let size = ann.font.size.unwrap_or(10.0) * scale;
        let bold = ann.text.contains("<b>");
        let text = ann.text.replace("<b>", "").replace("</b>", "");

        let mut font = ("sans-serif", size).into_font();
        if bold {
            font = font.style(FontStyle::Bold);
        }
        let hpos = match ann.xanchor.as_str() {
            "right" => HPos::Right,
            "center" => HPos::Center,
            _ => HPos::Left,
        };
        let vpos = match ann.yanchor.as_str() {
            "top" => VPos::Top,
            "middle" => VPos::Center,
            _ => VPos::Bottom,
        };
        let style = TextStyle::from(font).pos(Pos::new(hpos, vpos)).color(&BLACK);

        root.draw(&Text::new(text, (x.round() as i32, y.round() as i32), style))?;
    }

    Ok(())
}

/// Each marker of a scatter trace with its fill color.
///
/// Values are normalized over the trace's own range (Plotly's automatic
/// `cmin`/`cmax`) before being looked up in the colorscale.
fn marker_points(trace: &ScatterTrace) -> Result<Vec<(f64, f64, Rgba)>> {
    let opacity = trace.marker.opacity.unwrap_or(1.0);
    let with_opacity = |c: Rgba| Rgba { a: c.a * opacity, ..c };

    let fills: Vec<Rgba> = match &trace.marker.color {
        MarkerColor::Solid(css) => vec![Rgba::parse_css(css)?; trace.x.len()],
        MarkerColor::Values(values) => {
            let stops: Vec<(f64, Rgba)> = match &trace.marker.colorscale {
                Some(scale) => scale
                    .iter()
                    .map(|(pos, css)| -> Result<(f64, Rgba)> {
                        Ok((*pos, Rgba::parse_css(css)?))
                    })
                    .collect::<Result<_>>()?,
                None => vec![(0.0, Rgba::GRAY), (1.0, Rgba::BLACK)],
            };
            let (lo, hi) = values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            values
                .iter()
                .map(|&v| {
                    let t = if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
                    colorscale_at(&stops, t)
                })
                .collect()
        }
    };

    Ok(trace
        .x
        .iter()
        .zip(&trace.y)
        .zip(fills)
        .map(|((&x, &y), fill)| (x, y, with_opacity(fill)))
        .collect())
}

/// Interpolate a colorscale at `t` in [0, 1].
pub fn colorscale_at(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let Some(&(first_pos, first)) = stops.first() else {
        return Rgba::BLACK;
    };
    if t <= first_pos {
        return first;
    }
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let local = if p1 > p0 { (t - p0) / (p1 - p0) } else { 1.0 };
            return c0.lerp(c1, local);
        }
    }
    stops[stops.len() - 1].1
}

/// Padded data ranges over all scatter traces; a unit box when empty.
fn data_ranges<'a>(traces: impl Iterator<Item = &'a ScatterTrace>) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for trace in traces {
        for &v in &trace.x {
            x = (x.0.min(v), x.1.max(v));
        }
        for &v in &trace.y {
            y = (y.0.min(v), y.1.max(v));
        }
    }
    (pad_range(x), pad_range(y))
}

fn pad_range((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if hi <= lo {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn axis_title(axis: Option<&crate::charts::figure::Axis>) -> String {
    axis.and_then(|a| a.title.text.clone()).unwrap_or_default()
}

/// Distinct angular categories in first-seen order.
fn polar_categories<'a>(traces: impl Iterator<Item = &'a PolarTrace>) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for trace in traces {
        for theta in &trace.theta {
            if !categories.contains(theta) {
                categories.push(theta.clone());
            }
        }
    }
    categories
}

/// Angle of category `j` of `n`: 12 o'clock first, counter-clockwise.
pub fn category_angle(j: usize, n: usize) -> f64 {
    PI / 2.0 + 2.0 * PI * j as f64 / n.max(1) as f64
}

pub fn polar_point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Split a polar trace into runs of consecutive finite points, mapped to
/// cartesian data coordinates. NaN radii break the line.
fn finite_runs(
    trace: &PolarTrace,
    categories: &[String],
    r_min: f64,
    span: f64,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (r, theta) in trace.r.iter().zip(&trace.theta) {
        let Some(j) = categories.iter().position(|c| c == theta) else {
            continue;
        };
        if r.is_finite() {
            let radius = ((r - r_min) / span).max(0.0);
            current.push(polar_point(radius, category_angle(j, categories.len())));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn to_plotters(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}
