//! Line chart of the reading history.
//!
//! The x axis is ordinal: readings are spaced evenly in insertion order and
//! labelled with their timestamps, regardless of the time between them.
//! `PlotLayout` is pure geometry shared by the GTK window (pixels) and the
//! text renderer (character cells).

use crate::engine::{NORMAL_MIN, OBESE_MIN, OVERWEIGHT_MIN};
use crate::{BmiCategory, Reading};

pub const TITLE: &str = "BMI History Over Time";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "BMI";

/// Ordered (label, bmi) pairs ready for plotting
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_readings(readings: &[Reading]) -> Self {
        Self {
            labels: readings.iter().map(Reading::date_label).collect(),
            values: readings.iter().map(|r| r.bmi).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Space reserved around the plot area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// Room for the title, y tick labels and 45° rotated date labels
    pub const WINDOW: Margins = Margins {
        left: 64.0,
        right: 24.0,
        top: 48.0,
        bottom: 140.0,
    };

    pub const NONE: Margins = Margins {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };
}

/// Plot rectangle in output coordinates (y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub bmi: f64,
}

/// A value on the y axis and its vertical position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pos: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct XLabel {
    pub text: String,
    pub x: f64,
}

/// Category boundary drawn as a horizontal reference line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceLine {
    pub category: BmiCategory,
    pub tick: Tick,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotLayout {
    pub area: PlotArea,
    pub y_min: f64,
    pub y_max: f64,
    pub points: Vec<PlotPoint>,
    pub y_ticks: Vec<Tick>,
    pub x_labels: Vec<XLabel>,
    pub reference_lines: Vec<ReferenceLine>,
}

const TARGET_TICKS: f64 = 5.0;
const MAX_TICKS: usize = 12;

/// Round a raw tick step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

impl PlotLayout {
    /// Layout for a window of the given pixel size
    pub fn compute(series: &ChartSeries, width: f64, height: f64) -> Option<Self> {
        Self::compute_with_margins(series, width, height, Margins::WINDOW)
    }

    /// Layout inside `width` x `height` minus `margins`; `None` if there is nothing to plot
    pub fn compute_with_margins(
        series: &ChartSeries,
        width: f64,
        height: f64,
        margins: Margins,
    ) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let area = PlotArea {
            x: margins.left,
            y: margins.top,
            width: (width - margins.left - margins.right).max(1.0),
            height: (height - margins.top - margins.bottom).max(1.0),
        };

        let lo = series.values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;
        let pad = if span < 1e-9 { 1.0 } else { span * 0.05 };
        // A fixed pad vanishes next to very large values
        let pad = pad.max(lo.abs().max(hi.abs()) * 1e-6);
        let y_min = lo - pad;
        let y_max = hi + pad;
        if !(y_max - y_min).is_finite() || y_max <= y_min {
            tracing::warn!("Cannot scale chart for values {}..{}", lo, hi);
            return None;
        }

        let y_pos = |value: f64| area.y + area.height * (1.0 - (value - y_min) / (y_max - y_min));

        let n = series.len();
        let x_pos = |i: usize| {
            if n == 1 {
                area.x + area.width / 2.0
            } else {
                area.x + area.width * i as f64 / (n - 1) as f64
            }
        };

        let points = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &bmi)| PlotPoint {
                x: x_pos(i),
                y: y_pos(bmi),
                bmi,
            })
            .collect();

        let x_labels = series
            .labels
            .iter()
            .enumerate()
            .map(|(i, text)| XLabel {
                text: text.clone(),
                x: x_pos(i),
            })
            .collect();

        let step = nice_step((y_max - y_min) / TARGET_TICKS);
        let first = (y_min / step).ceil() * step;
        let y_ticks = (0..=MAX_TICKS)
            .map(|k| first + step * k as f64)
            .take_while(|&value| value <= y_max + step * 1e-9)
            .map(|value| Tick {
                value,
                pos: y_pos(value),
            })
            .collect();

        let reference_lines = [
            (BmiCategory::Normal, NORMAL_MIN),
            (BmiCategory::Overweight, OVERWEIGHT_MIN),
            (BmiCategory::Obese, OBESE_MIN),
        ]
        .into_iter()
        .filter(|&(_, bound)| bound >= y_min && bound <= y_max)
        .map(|(category, bound)| ReferenceLine {
            category,
            tick: Tick {
                value: bound,
                pos: y_pos(bound),
            },
        })
        .collect();

        Some(Self {
            area,
            y_min,
            y_max,
            points,
            y_ticks,
            x_labels,
            reference_lines,
        })
    }
}

// Width of "{:>7.2} ┤"
const TEXT_LABEL_WIDTH: usize = 9;

/// Render the series as a character-grid line chart
///
/// Returns `None` for an empty series.
pub fn render_text(series: &ChartSeries, cols: usize, rows: usize) -> Option<String> {
    let plot_w = cols.saturating_sub(TEXT_LABEL_WIDTH).max(2);
    let plot_h = rows.max(2);

    let layout = PlotLayout::compute_with_margins(
        series,
        (plot_w - 1) as f64,
        (plot_h - 1) as f64,
        Margins::NONE,
    )?;

    let cell = |x: f64, y: f64| {
        let col = (x.round().max(0.0) as usize).min(plot_w - 1);
        let row = (y.round().max(0.0) as usize).min(plot_h - 1);
        (col, row)
    };

    let mut grid = vec![vec![' '; plot_w]; plot_h];

    for pair in layout.points.windows(2) {
        let (c0, _) = cell(pair[0].x, pair[0].y);
        let (c1, _) = cell(pair[1].x, pair[1].y);
        for col in (c0 + 1)..c1 {
            let t = (col - c0) as f64 / (c1 - c0) as f64;
            let y = pair[0].y + (pair[1].y - pair[0].y) * t;
            let (_, row) = cell(col as f64, y);
            grid[row][col] = '·';
        }
    }
    for point in &layout.points {
        let (col, row) = cell(point.x, point.y);
        grid[row][col] = '●';
    }

    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&format!("{:>7}\n", Y_AXIS_LABEL));

    for (row, line) in grid.iter().enumerate() {
        let tick = layout
            .y_ticks
            .iter()
            .find(|tick| cell(0.0, tick.pos).1 == row);
        match tick {
            Some(tick) => out.push_str(&format!("{:>7.2} ┤", tick.value)),
            None => out.push_str("        │"),
        }
        let line: String = line.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str("        └");
    out.push_str(&"─".repeat(plot_w));
    out.push_str(&format!(" {}\n", X_AXIS_LABEL));

    for (i, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
        out.push_str(&format!("{:>4}. {}  {:.2}\n", i + 1, label, value));
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> ChartSeries {
        let readings: Vec<Reading> = values
            .iter()
            .enumerate()
            .map(|(i, &bmi)| {
                let ts = NaiveDate::from_ymd_opt(2024, 2, 1 + i as u32)
                    .unwrap()
                    .and_hms_opt(7, 0, 0)
                    .unwrap();
                Reading::new(ts, bmi)
            })
            .collect();
        ChartSeries::from_readings(&readings)
    }

    #[test]
    fn test_series_keeps_insertion_order() {
        let s = series(&[22.0, 21.5, 23.1]);
        assert_eq!(s.values, vec![22.0, 21.5, 23.1]);
        assert_eq!(s.labels[0], "2024-02-01 07:00:00");
        assert_eq!(s.labels[2], "2024-02-03 07:00:00");
    }

    #[test]
    fn test_empty_series_has_no_layout() {
        assert!(PlotLayout::compute(&ChartSeries::default(), 800.0, 400.0).is_none());
        assert!(render_text(&ChartSeries::default(), 72, 16).is_none());
    }

    #[test]
    fn test_points_evenly_spaced_across_area() {
        let layout = PlotLayout::compute(&series(&[20.0, 21.0, 22.0]), 800.0, 500.0).unwrap();
        let area = layout.area;

        assert_eq!(layout.points[0].x, area.x);
        assert_eq!(layout.points[1].x, area.x + area.width / 2.0);
        assert_eq!(layout.points[2].x, area.x + area.width);
        assert_eq!(layout.x_labels[1].x, layout.points[1].x);
    }

    #[test]
    fn test_higher_bmi_is_drawn_higher() {
        let layout = PlotLayout::compute(&series(&[20.0, 26.0]), 800.0, 500.0).unwrap();
        assert!(layout.points[1].y < layout.points[0].y);
        for point in &layout.points {
            assert!(point.y >= layout.area.y);
            assert!(point.y <= layout.area.y + layout.area.height);
        }
    }

    #[test]
    fn test_single_point_is_centered_with_padding() {
        let layout = PlotLayout::compute(&series(&[22.86]), 800.0, 500.0).unwrap();
        let area = layout.area;

        assert_eq!(layout.points[0].x, area.x + area.width / 2.0);
        assert!((layout.y_min - 21.86).abs() < 1e-9);
        assert!((layout.y_max - 23.86).abs() < 1e-9);
    }

    #[test]
    fn test_y_ticks_use_nice_steps_inside_range() {
        let layout = PlotLayout::compute(&series(&[18.0, 31.0]), 800.0, 500.0).unwrap();

        assert!(layout.y_ticks.len() >= 3);
        let step = layout.y_ticks[1].value - layout.y_ticks[0].value;
        assert!((step - 5.0).abs() < 1e-9, "step {}", step);
        for tick in &layout.y_ticks {
            assert!(tick.value >= layout.y_min && tick.value <= layout.y_max + 1e-9);
        }
    }

    #[test]
    fn test_reference_lines_only_inside_range() {
        let layout = PlotLayout::compute(&series(&[18.0, 31.0]), 800.0, 500.0).unwrap();
        let categories: Vec<_> = layout.reference_lines.iter().map(|l| l.category).collect();
        assert_eq!(
            categories,
            vec![BmiCategory::Normal, BmiCategory::Overweight, BmiCategory::Obese]
        );

        let narrow = PlotLayout::compute(&series(&[21.0, 22.0]), 800.0, 500.0).unwrap();
        assert!(narrow.reference_lines.is_empty());
    }

    #[test]
    fn test_huge_single_value_gets_bounded_layout() {
        let layout = PlotLayout::compute(&series(&[1e17]), 800.0, 500.0).unwrap();

        assert!(layout.y_max > layout.y_min);
        assert!(!layout.y_ticks.is_empty());
        assert!(layout.y_ticks.len() <= MAX_TICKS + 1);
        assert!(layout.points[0].y.is_finite());

        let text = render_text(&series(&[1e17]), 72, 16).unwrap();
        assert_eq!(text.matches('●').count(), 1);
    }

    #[test]
    fn test_unscalable_values_have_no_layout() {
        assert!(PlotLayout::compute(&series(&[1.7e308, -1.7e308]), 800.0, 500.0).is_none());
    }

    #[test]
    fn test_nice_step() {
        assert!((nice_step(0.4) - 0.5).abs() < 1e-12);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
    }

    #[test]
    fn test_render_text_marks_each_reading() {
        let text = render_text(&series(&[19.0, 24.0, 29.0]), 60, 12).unwrap();

        assert!(text.starts_with(TITLE));
        assert_eq!(text.matches('●').count(), 3);
        assert!(text.contains("   1. 2024-02-01 07:00:00  19.00"));
        assert!(text.contains("   3. 2024-02-03 07:00:00  29.00"));
        assert!(text.contains(X_AXIS_LABEL));
    }
}
