use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rgb – chart color value
// ---------------------------------------------------------------------------

/// An RGB color with components in `[0, 1]`, matching the MATLAB-style
/// triples the benchmark scripts use.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(
            (c.0.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.1.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.2.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

// ---------------------------------------------------------------------------
// MATLAB default line colors
// ---------------------------------------------------------------------------

pub const BLUE: Rgb = Rgb(0.0, 0.4470, 0.7410);
pub const ORANGE: Rgb = Rgb(0.8500, 0.3250, 0.0980);
pub const YELLOW: Rgb = Rgb(0.9290, 0.6940, 0.1250);
pub const MAGENTA: Rgb = Rgb(0.4940, 0.1840, 0.5560);
pub const GREEN: Rgb = Rgb(0.4660, 0.6740, 0.1880);
pub const CYAN: Rgb = Rgb(0.3010, 0.7450, 0.9330);
pub const RED: Rgb = Rgb(0.6350, 0.0780, 0.1840);
pub const BROWN: Rgb = Rgb(0.6500, 0.1600, 0.1600);
/// Soft black used for reference lines, not part of the line cycle.
pub const BLACK: Rgb = Rgb(0.25, 0.25, 0.25);

/// The line-color cycle, in MATLAB's default order.
const CYCLE: [Rgb; 8] = [BLUE, ORANGE, YELLOW, MAGENTA, GREEN, CYAN, RED, BROWN];

// ---------------------------------------------------------------------------
// Fallback palette
// ---------------------------------------------------------------------------

/// `n` distinct colors for techniques configured without an explicit one:
/// the fixed cycle first, evenly spaced hues once it is exhausted.
pub fn distinct_palette(n: usize) -> Vec<Rgb> {
    let extra = n.saturating_sub(CYCLE.len());
    CYCLE
        .iter()
        .copied()
        .take(n)
        .chain((0..extra).map(|i| {
            let hue = (i as f32 / extra as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Rgb(rgb.red, rgb.green, rgb.blue)
        }))
        .collect()
}
