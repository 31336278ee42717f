// Plot configuration and color handling.
//
// Figures are sized for print: dimensions are given in centimetres and
// converted with Plotly's 72 px/inch convention. Each topic gets a color from
// the Plotly qualitative palette plus a translucent variant used as the low
// end of its marker colorscale.

use std::fmt;

use anyhow::{Context, Result};

/// Plotly's default qualitative palette ("Plotly" / "D3"-like, 10 colors).
pub const PLOTLY_QUALITATIVE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Alpha of the translucent palette variant.
pub const TRANSLUCENT_ALPHA: f64 = 0.1;

/// Topic color used when a config carries no palette.
const FALLBACK_COLOR: &str = "#000000";

/// Target print resolution for PNG export.
const DPI: f64 = 600.0;
/// Plotly lays out in 72 px/inch, not 96.
const PX_PER_INCH: f64 = 72.0;
const CM_PER_INCH: f64 = 2.54;

/// An sRGB color with straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const GRAY: Rgba = Rgba::opaque(128, 128, 128);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS color as produced by this crate: `#rrggbb`,
    /// `rgba(r, g, b, a)`, `rgb(r, g, b)`, or one of a few named colors.
    pub fn parse_css(css: &str) -> Result<Self> {
        let css = css.trim();
        if css.starts_with('#') {
            return hex_to_rgba(css, 1.0);
        }

        match css.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "gray" | "grey" => return Ok(Self::GRAY),
            "transparent" => return Ok(Self { a: 0.0, ..Self::WHITE }),
            _ => {}
        }

        let inner = css
            .strip_prefix("rgba(")
            .or_else(|| css.strip_prefix("rgb("))
            .and_then(|s| s.strip_suffix(')'))
            .with_context(|| format!("Unrecognized color: {css}"))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            anyhow::bail!("Color {css} needs 3 or 4 components, found {}", parts.len());
        }

        let channel = |s: &str| -> Result<u8> {
            s.parse::<u8>()
                .with_context(|| format!("Invalid color channel '{s}' in {css}"))
        };
        let a = match parts.get(3) {
            Some(s) => s
                .parse::<f64>()
                .with_context(|| format!("Invalid alpha '{s}' in {css}"))?,
            None => 1.0,
        };

        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: a.clamp(0.0, 1.0),
        })
    }

    /// Linear interpolation between two colors (all four channels), `t` in [0, 1].
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Convert a `#rrggbb` hex color into an [`Rgba`] with the given alpha.
///
/// The leading `#` is optional.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<Rgba> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        anyhow::bail!("Expected a 6-digit hex color, got '#{hex}'");
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).with_context(|| format!("Invalid hex color '#{hex}'"))
    };

    Ok(Rgba {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
        a: alpha,
    })
}

/// Shared figure settings: font size, export scaling, unit conversion and
/// the per-topic palette.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Base font size in points
    pub font_size: f64,
    /// Scale factor applied when exporting raster images
    pub png_scaling: f64,
    /// Layout pixels per centimetre
    pub px_per_cm: f64,
    /// Opaque topic colors (hex)
    pub colors: Vec<String>,
    /// Translucent topic colors, aligned with `colors`
    pub rgba_colors: Vec<Rgba>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let colors: Vec<String> = PLOTLY_QUALITATIVE.iter().map(|c| c.to_string()).collect();
        // The palette constants are well-formed, so conversion can't fail;
        // fall back to black rather than panicking if one ever is not.
        let rgba_colors = colors
            .iter()
            .map(|c| {
                hex_to_rgba(c, TRANSLUCENT_ALPHA).unwrap_or(Rgba {
                    a: TRANSLUCENT_ALPHA,
                    ..Rgba::BLACK
                })
            })
            .collect();

        Self {
            font_size: 8.0,
            png_scaling: DPI / PX_PER_INCH,
            px_per_cm: PX_PER_INCH / CM_PER_INCH,
            colors,
            rgba_colors,
        }
    }
}

impl PlotConfig {
    /// Opaque color for topic `i`. The palette repeats past its length;
    /// an empty palette draws everything black.
    pub fn color(&self, i: usize) -> &str {
        match self.colors.len() {
            0 => FALLBACK_COLOR,
            n => &self.colors[i % n],
        }
    }

    /// Translucent color for topic `i`, as a CSS string.
    pub fn translucent(&self, i: usize) -> String {
        match self.rgba_colors.len() {
            0 => Rgba {
                a: TRANSLUCENT_ALPHA,
                ..Rgba::BLACK
            }
            .to_string(),
            n => self.rgba_colors[i % n].to_string(),
        }
    }

    /// Convert centimetres to layout pixels.
    pub fn cm(&self, cm: f64) -> f64 {
        cm * self.px_per_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgba() {
        let c = hex_to_rgba("#636EFA", 0.1).unwrap();
        assert_eq!(c.to_string(), "rgba(99, 110, 250, 0.1)");
        assert_eq!(hex_to_rgba("EF553B", 1.0).unwrap().to_string(), "rgba(239, 85, 59, 1)");
    }

    #[test]
    fn test_hex_to_rgba_rejects_garbage() {
        assert!(hex_to_rgba("#12345", 1.0).is_err());
        assert!(hex_to_rgba("#GGGGGG", 1.0).is_err());
    }

    #[test]
    fn test_parse_css_round_trips_display() {
        let c = hex_to_rgba("#00CC96", 0.1).unwrap();
        assert_eq!(Rgba::parse_css(&c.to_string()).unwrap(), c);
        assert_eq!(Rgba::parse_css("black").unwrap(), Rgba::BLACK);
        assert_eq!(
            Rgba::parse_css("rgba(255, 255, 255, 0)").unwrap().a,
            0.0
        );
        assert!(Rgba::parse_css("chartreuse-ish").is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        let lo = Rgba { a: 0.1, ..Rgba::opaque(99, 110, 250) };
        let hi = Rgba::opaque(99, 110, 250);
        assert_eq!(lo.lerp(hi, 0.0), lo);
        assert_eq!(lo.lerp(hi, 1.0), hi);
        assert!((lo.lerp(hi, 0.5).a - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_default_config() {
        let config = PlotConfig::default();
        assert_eq!(config.font_size, 8.0);
        assert!((config.png_scaling - 600.0 / 72.0).abs() < 1e-12);
        assert!((config.cm(2.54) - 72.0).abs() < 1e-9);
        assert_eq!(config.colors.len(), config.rgba_colors.len());
        // Palette wraps around
        assert_eq!(config.color(0), config.color(10));
        assert_eq!(config.translucent(1), "rgba(239, 85, 59, 0.1)");
    }

    #[test]
    fn test_empty_palette_falls_back_to_black() {
        let config = PlotConfig {
            colors: Vec::new(),
            rgba_colors: Vec::new(),
            ..PlotConfig::default()
        };
        assert_eq!(config.color(3), "#000000");
        assert_eq!(config.translucent(3), "rgba(0, 0, 0, 0.1)");
        assert!(hex_to_rgba(config.color(0), 1.0).is_ok());
    }
}
