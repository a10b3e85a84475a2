use crate::error::DataError;
use crate::series::{ComparisonDataset, ComparisonSide};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

// Font sizes
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;
const LEGEND_FONT_SIZE: u32 = 16;

const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: i32 = 4;

/// Legacy figure size: 12x6 inches at 100 dpi.
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (1200, 600);

/// Color palette, one per comparison side
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180), // Blue (first)
    RGBColor(255, 127, 14), // Orange (second)
    RGBColor(44, 160, 44),  // Green
    RGBColor(214, 39, 40),  // Red
];

/// Point marker drawn on every sample of a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
    Triangle,
}

impl Marker {
    fn for_side(index: usize) -> Self {
        match index {
            0 => Marker::Circle,
            1 => Marker::Cross,
            _ => Marker::Triangle,
        }
    }
}

fn side_color(index: usize) -> RGBColor {
    COLORS.get(index).copied().unwrap_or(RGBColor(128, 128, 128))
}

/// One side's samples for one operation, x being the sample index.
#[derive(Debug, Clone)]
pub struct Curve<'a> {
    pub name: &'a str,
    pub points: Vec<(f64, f64)>,
    pub marker: Marker,
    pub color: RGBColor,
}

/// One sub-chart, dedicated to a single operation.
#[derive(Debug, Clone)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub curves: Vec<Curve<'a>>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

/// Check the dataset against the labels and build one panel per operation.
///
/// Nothing is drawn here, so dimension problems surface before a drawing
/// backend is touched.
pub fn layout_panels<'a>(
    dataset: &'a ComparisonDataset,
    labels: &'a [String],
) -> Result<Vec<Panel<'a>>, DataError> {
    let operations = dataset.operation_count()?;
    if labels.len() != operations {
        return Err(DataError::LabelCount {
            labels: labels.len(),
            operations,
        });
    }

    let sides: &'a [ComparisonSide] = &dataset.sides;
    let panels = labels
        .iter()
        .enumerate()
        .map(move |(op, title)| {
            let curves: Vec<Curve<'a>> = sides
                .iter()
                .enumerate()
                .map(move |(side_idx, side)| Curve {
                    name: side.name.as_str(),
                    points: side
                        .series
                        .operation(op)
                        .unwrap_or_default()
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| (i as f64, v as f64))
                        .collect(),
                    marker: Marker::for_side(side_idx),
                    color: side_color(side_idx),
                })
                .collect();

            let (x_range, y_range) = panel_ranges(&curves);
            Panel {
                title: title.as_str(),
                curves,
                x_range,
                y_range,
            }
        })
        .collect();

    Ok(panels)
}

/// X spans the longest curve; y spans every value with some headroom.
fn panel_ranges(curves: &[Curve<'_>]) -> (Range<f64>, Range<f64>) {
    let longest = curves.iter().map(|c| c.points.len()).max().unwrap_or(0);
    let x_max = longest.saturating_sub(1).max(1) as f64;

    let (min, max) = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|&(_, y)| y))
        .fold((f64::MAX, f64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

    let y_range = if min > max {
        0.0..1.0
    } else if max - min <= 0.0 {
        // A fixed pad of 1 vanishes in f64 above 2^53.
        let pad = (min.abs() * 0.05).max(1.0);
        (min - pad)..(max + pad)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    };

    (0.0..x_max, y_range)
}

/// Sample index tick label; fractional ticks stay blank.
fn format_sample_tick(x: f64) -> String {
    if (x - x.round()).abs() < 1e-6 {
        format!("{:.0}", x)
    } else {
        String::new()
    }
}

/// Draw one panel per operation, left to right, onto `root`.
///
/// Returns the number of panels drawn.
pub fn render<DB>(
    root: &DrawingArea<DB, Shift>,
    dataset: &ComparisonDataset,
    labels: &[String],
) -> Result<usize>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let panels = layout_panels(dataset, labels)?;

    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, panels.len()));

    for (area, panel) in areas.iter().zip(panels.iter()) {
        draw_panel(area, panel)
            .with_context(|| format!("Failed to draw panel '{}'", panel.title))?;
    }

    Ok(panels.len())
}

fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel<'_>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    let x_ticks = (panel.x_range.end as usize + 1).min(10);

    chart
        .configure_mesh()
        .x_labels(x_ticks)
        .x_desc("Sample")
        .y_desc("Time")
        .x_label_formatter(&|x| format_sample_tick(*x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for curve in &panel.curves {
        let color = curve.color;

        chart
            .draw_series(LineSeries::new(
                curve.points.iter().copied(),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(curve.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });

        let points = curve.points.iter().copied();
        match curve.marker {
            Marker::Circle => {
                chart.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, color.filled())))?;
            }
            Marker::Cross => {
                chart.draw_series(
                    points.map(|p| Cross::new(p, MARKER_SIZE, color.stroke_width(LINE_WIDTH))),
                )?;
            }
            Marker::Triangle => {
                chart.draw_series(
                    points.map(|p| TriangleMarker::new(p, MARKER_SIZE, color.filled())),
                )?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Render the comparison figure to an SVG file.
pub fn render_svg(
    path: &Path,
    size: (u32, u32),
    dataset: &ComparisonDataset,
    labels: &[String],
) -> Result<usize> {
    // A rejected dataset must not leave a file behind.
    layout_panels(dataset, labels)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let root = SVGBackend::new(path, size).into_drawing_area();
    let panels = render(&root, dataset, labels)?;
    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Generated: {}", path.display());
    Ok(panels)
}
