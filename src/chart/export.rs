use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordi32;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use svg2pdf::usvg;

use super::figure::Figure;
use crate::data::model::Marker;

/// Chart canvas in pixels (10:4 aspect).
const FIGURE_SIZE: (u32, u32) = (1000, 400);
const LINE_WIDTH: u32 = 1;
const MARKER_SIZE: i32 = 5;
const GRID_MAJOR: RGBColor = RGBColor(204, 204, 204);
const GRID_MINOR: RGBColor = RGBColor(229, 229, 229);

// ---------------------------------------------------------------------------
// Export entry point
// ---------------------------------------------------------------------------

/// Render `figure` and write `<stem>.svg`, `<stem>.png`, and `<stem>.pdf`
/// into `dir`. Backends are scoped so their file handles are released on
/// every exit path.
pub fn export_figure(figure: &Figure, dir: &Path, stem: &str) -> Result<()> {
    let svg_path = dir.join(format!("{stem}.svg"));
    let png_path = dir.join(format!("{stem}.png"));
    let pdf_path = dir.join(format!("{stem}.pdf"));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present().context("rendering SVG")?;
    }
    fs::write(&svg_path, &svg)
        .with_context(|| format!("writing {}", svg_path.display()))?;
    log::info!("wrote {}", svg_path.display());

    {
        let root = BitMapBackend::new(&png_path, FIGURE_SIZE).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present()
            .with_context(|| format!("writing {}", png_path.display()))?;
    }
    log::info!("wrote {}", png_path.display());

    write_pdf(&svg, &pdf_path)?;
    log::info!("wrote {}", pdf_path.display());
    Ok(())
}

/// Convert the already-rendered SVG to PDF; the chart is vector output
/// either way, so it is converted rather than redrawn.
fn write_pdf(svg: &str, path: &Path) -> Result<()> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).context("parsing rendered SVG")?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("converting SVG to PDF: {e}"))?;
    fs::write(path, pdf).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let x_range = 0..(figure.x_len() as i32 + 1);
    let (y_min, y_max) = figure.y_range();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64);

    if figure.log_y {
        let mut chart = builder.build_cartesian_2d(x_range, (y_min..y_max).log_scale())?;
        draw_into(&mut chart, figure)?;
    } else {
        let mut chart = builder.build_cartesian_2d(x_range, y_min..y_max)?;
        draw_into(&mut chart, figure)?;
    }
    Ok(())
}

fn draw_into<'a, DB, YR>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordi32, YR>>,
    figure: &Figure,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    YR: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    chart
        .configure_mesh()
        .bold_line_style(&GRID_MAJOR)
        .light_line_style(&GRID_MINOR)
        .x_desc(&figure.x_label)
        .y_desc(&figure.y_label)
        .x_labels(figure.x_len() + 2)
        .x_label_formatter(&|&x| {
            usize::try_from(x)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| figure.tick_labels.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    for curve in &figure.curves {
        let color = RGBColor::from(curve.color);
        let style = color.stroke_width(LINE_WIDTH);
        let points: Vec<(i32, f64)> = curve
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as i32 + 1, v))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), style))?
            .label(&curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], style));
        draw_markers(chart, curve.marker, &points, color)?;
    }

    if let Some(baseline) = &figure.baseline {
        let color = RGBColor::from(baseline.color);
        let style = color.stroke_width(LINE_WIDTH);
        let x_end = figure.x_len() as i32 + 1;
        chart
            .draw_series(DashedLineSeries::new(
                [(0, baseline.value), (x_end, baseline.value)],
                8,
                5,
                style,
            ))?
            .label(&baseline.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], style));
    }

    let legend_background = WHITE.mix(0.8);
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&legend_background)
        .border_style(&GRID_MAJOR)
        .draw()?;
    Ok(())
}

fn draw_markers<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    marker: Marker,
    points: &[(i32, f64)],
    color: RGBColor,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (i32, f64)>,
{
    let s = MARKER_SIZE;
    let style = color.filled();
    match marker {
        Marker::Cross => {
            chart.draw_series(points.iter().map(|&at| Cross::new(at, s, style)))?;
        }
        Marker::Circle => {
            chart.draw_series(points.iter().map(|&at| Circle::new(at, s, style)))?;
        }
        Marker::Plus => {
            chart.draw_series(points.iter().map(|&at| {
                EmptyElement::at(at)
                    + PathElement::new(vec![(-s, 0), (s, 0)], style)
                    + PathElement::new(vec![(0, -s), (0, s)], style)
            }))?;
        }
        Marker::Diamond => {
            chart.draw_series(points.iter().map(|&at| {
                EmptyElement::at(at) + Polygon::new(vec![(0, -s), (s, 0), (0, s), (-s, 0)], style)
            }))?;
        }
    }
    Ok(())
}
