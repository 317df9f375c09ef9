use crate::charts::{AxisDirection, Cell, ChartSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    /// Plot-space y; negated when the axis is reversed.
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    pub label: String,
    pub value: i64,
}

pub fn plot_points(spec: &ChartSpec) -> Vec<PlotPoint> {
    spec.points
        .iter()
        .filter_map(|p| {
            let x = match &p.x {
                Cell::Int(v) => *v as f64,
                Cell::Text(_) => return None,
            };
            Some(PlotPoint {
                x,
                y: plot_y(spec.y_axis, p.y),
                label: p.text.clone().unwrap_or_default(),
            })
        })
        .collect()
}

pub fn plot_y(direction: AxisDirection, y: i64) -> f64 {
    match direction {
        AxisDirection::Ascending => y as f64,
        AxisDirection::Reversed => -(y as f64),
    }
}

pub fn axis_value(direction: AxisDirection, plot: f64) -> f64 {
    match direction {
        AxisDirection::Ascending => plot,
        AxisDirection::Reversed => -plot,
    }
}

/// Padded `[min, max]` bounds for x and y.
pub fn plot_bounds(points: &[PlotPoint]) -> ([f64; 2], [f64; 2]) {
    if points.is_empty() {
        return ([-1.0, 1.0], [-1.0, 1.0]);
    }
    let (mut x0, mut x1, mut y0, mut y1) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for p in points {
        x0 = x0.min(p.x);
        x1 = x1.max(p.x);
        y0 = y0.min(p.y);
        y1 = y1.max(p.y);
    }
    (pad(x0, x1), pad(y0, y1))
}

fn pad(lo: f64, hi: f64) -> [f64; 2] {
    let span = (hi - lo).max(1.0);
    let margin = span * 0.08;
    [lo - margin, hi + margin]
}

pub fn bar_rows(spec: &ChartSpec) -> Vec<BarRow> {
    spec.points
        .iter()
        .map(|p| BarRow {
            label: p.x.to_string(),
            value: p.y,
        })
        .collect()
}

pub fn bar_max(rows: &[BarRow]) -> u64 {
    rows.iter()
        .map(|r| r.value.unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1)
}

pub fn short_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_axis_flips_and_restores() {
        let plot = plot_y(AxisDirection::Reversed, 80);
        assert_eq!(plot, -80.0);
        assert_eq!(axis_value(AxisDirection::Reversed, plot), 80.0);
        assert_eq!(plot_y(AxisDirection::Ascending, 80), 80.0);
    }

    #[test]
    fn bounds_pad_degenerate_ranges() {
        let pts = vec![PlotPoint {
            x: 3.0,
            y: -10.0,
            label: String::new(),
        }];
        let ([x0, x1], [y0, y1]) = plot_bounds(&pts);
        assert!(x0 < 3.0 && x1 > 3.0);
        assert!(y0 < -10.0 && y1 > -10.0);
    }

    #[test]
    fn bar_max_uses_magnitude() {
        let rows = vec![
            BarRow {
                label: "A".into(),
                value: 4,
            },
            BarRow {
                label: "B".into(),
                value: -9,
            },
        ];
        assert_eq!(bar_max(&rows), 9);
        assert_eq!(bar_max(&[]), 1);
    }

    #[test]
    fn short_label_truncates() {
        assert_eq!(short_label("Borussia Dortmund", 8), "Borussi.");
        assert_eq!(short_label("Inter", 8), "Inter");
    }
}
