use crate::color::{self, Rgb};
use crate::data::extract::Extraction;
use crate::data::model::{Marker, TechniqueSeries};

// ---------------------------------------------------------------------------
// Figure description
// ---------------------------------------------------------------------------

/// A declarative chart: what to draw, independent of any backend.
#[derive(Debug, Clone)]
pub struct Figure {
    pub x_label: String,
    pub y_label: String,
    /// Tick label per x position (positions are 1-based).
    pub tick_labels: Vec<String>,
    pub curves: Vec<Curve>,
    pub baseline: Option<Baseline>,
    /// Logarithmic y axis.
    pub log_y: bool,
}

#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub color: Rgb,
    pub marker: Marker,
    /// y value per x position, in series order.
    pub values: Vec<f64>,
}

/// Dashed horizontal reference line.
#[derive(Debug, Clone)]
pub struct Baseline {
    pub value: f64,
    pub label: String,
    pub color: Rgb,
}

impl Figure {
    /// Number of x positions (the longest curve).
    pub fn x_len(&self) -> usize {
        self.curves.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// y range covering every curve and the baseline, with a small margin.
    pub fn y_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.curves.iter().flat_map(|c| c.values.iter()) {
            min = min.min(v);
            max = max.max(v);
        }
        if let Some(b) = &self.baseline {
            min = min.min(b.value);
            max = max.max(b.value);
        }
        if !min.is_finite() || !max.is_finite() {
            // No data at all; pick an arbitrary non-degenerate range.
            return if self.log_y { (0.1, 10.0) } else { (0.0, 1.0) };
        }
        if self.log_y {
            let min = min.max(f64::MIN_POSITIVE);
            let max = max.max(min);
            (min / 2.0, max * 2.0)
        } else {
            let span = (max - min).max(f64::EPSILON);
            (min - 0.05 * span, max + 0.05 * span)
        }
    }
}

// ---------------------------------------------------------------------------
// The two benchmark figures
// ---------------------------------------------------------------------------

/// Per-point dot-product error on a log axis, with the uncompressed error
/// as a dashed reference line when the file provided one.
pub fn dot_error(extraction: &Extraction) -> Figure {
    Figure {
        x_label: "Pointwise absolute error bound".into(),
        y_label: "DOT error".into(),
        tick_labels: tick_labels(extraction),
        curves: curves(extraction, |s| s.errors.clone()),
        baseline: extraction.baseline_error.map(|value| Baseline {
            value,
            label: "No compression".into(),
            color: color::BLACK,
        }),
        log_y: true,
    }
}

/// Per-point compression ratio on a linear axis; ratio 1.0 (uncompressed)
/// is the reference line.
pub fn compression_ratio(extraction: &Extraction) -> Figure {
    Figure {
        x_label: "Pointwise absolute error bound".into(),
        y_label: "Compression ratio".into(),
        tick_labels: tick_labels(extraction),
        curves: curves(extraction, |s| s.ratios.clone()),
        baseline: Some(Baseline {
            value: 1.0,
            label: "No compression".into(),
            color: color::BLACK,
        }),
        log_y: false,
    }
}

fn curves(
    extraction: &Extraction,
    values: impl Fn(&TechniqueSeries) -> Vec<f64>,
) -> Vec<Curve> {
    extraction
        .series
        .iter()
        .map(|s| Curve {
            label: s.technique.label.clone(),
            color: s.technique.color,
            marker: s.technique.marker,
            values: values(s),
        })
        .collect()
}

/// x tick labels: the point identifiers of the last technique with any
/// points. Techniques normally share their error bounds, so the series
/// agree on the labels.
fn tick_labels(extraction: &Extraction) -> Vec<String> {
    extraction
        .series
        .iter()
        .rev()
        .find(|s| !s.is_empty())
        .map(|s| s.point_ids.clone())
        .unwrap_or_default()
}
