//! Terminal visualization using braille graphics
//!
//! Renders the fibre angle curve, the target angle and the intersection point
//! using Unicode braille characters, plus a text slider for parameter values.

use drawille::Canvas;

use crate::core::bounds::ParameterName;
use crate::core::cycle::Computation;
use crate::core::model::{LIMIT_ANGLE_DEG, SWEEP_END, SWEEP_START};

/// Smallest canvas that still shows a readable curve
pub const MIN_CHART_WIDTH: u32 = 20;
pub const MIN_CHART_HEIGHT: u32 = 8;

/// Width of the text slider track in characters
pub const SLIDER_WIDTH: usize = 40;

/// Map a sample to canvas pixel coordinates (y grows downward)
fn to_canvas(velocity: f64, angle: f64, width: u32, height: u32) -> (u32, u32) {
    let fx = (velocity - SWEEP_START) / (SWEEP_END - SWEEP_START);
    let fy = 1.0 - angle / LIMIT_ANGLE_DEG;
    let x = (fx.clamp(0.0, 1.0) * (width - 1) as f64).round() as u32;
    let y = (fy.clamp(0.0, 1.0) * (height - 1) as f64).round() as u32;
    (x, y)
}

/// Render the fibre angle curve with target line and intersection marker
///
/// # Example Output
/// ```text
///  90° ⡇⠑⢄
///      ⡇  ⠑⠢⡀
///  45° ⡇⠂⠂⠂⠂⢿⠂⠂⠂⠂⠂⠂⠂⠂⠂⠂
///      ⡇      ⠉⠉⠒⠒⠤⠤⣀⣀
///   0° ⣇⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀
///      0                     100 mm/s
/// ```
pub fn render_curve_chart(computation: &Computation, width: u32, height: u32) -> String {
    let width = width.max(MIN_CHART_WIDTH);
    let height = height.max(MIN_CHART_HEIGHT);
    let mut canvas = Canvas::new(width, height);

    // Axes
    for y in 0..height {
        canvas.set(0, y);
    }
    for x in 0..width {
        canvas.set(x, height - 1);
    }

    // Dashed target line
    let (_, target_y) = to_canvas(SWEEP_START, computation.parameters.target_angle, width, height);
    for x in (0..width).filter(|x| x % 4 < 2) {
        canvas.set(x, target_y);
    }

    // Curve as connected segments
    let points: Vec<(u32, u32)> = computation
        .sweep
        .as_slice()
        .iter()
        .zip(computation.curve.as_slice())
        .map(|(&v, &alpha)| to_canvas(v, alpha, width, height))
        .collect();
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        canvas.line(x1, y1, x2, y2);
    }

    // Intersection marker
    let (ix, iy) = to_canvas(
        computation.intersection.velocity,
        computation.intersection.angle,
        width,
        height,
    );
    for dy in 0..=2u32 {
        for dx in 0..=2u32 {
            let x = (ix + dx).saturating_sub(1).min(width - 1);
            let y = (iy + dy).saturating_sub(1).min(height - 1);
            canvas.set(x, y);
        }
    }

    let rows = canvas.rows();
    let last = rows.len().saturating_sub(1);
    let target_row = (target_y / 4) as usize;
    let target_label = format!("{}°", computation.parameters.target_angle);

    let mut output = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        let label = if i == 0 {
            "90°".to_string()
        } else if i == last {
            "0°".to_string()
        } else if i == target_row {
            target_label.clone()
        } else {
            String::new()
        };
        output.push(format!("{:>5} {}", label, row));
    }

    let axis_chars = (width as usize).div_ceil(2);
    let end_label = format!("{} mm/s", SWEEP_END);
    output.push(format!(
        "{:>5} {}{:>pad$}",
        "",
        SWEEP_START,
        end_label,
        pad = axis_chars.saturating_sub(1)
    ));

    output.join("\n")
}

/// Render a parameter's slider projection as a text track
///
/// ```text
/// [=========●------------------------------]  45°
/// ```
pub fn render_slider(name: ParameterName, value: f64) -> String {
    let bounds = name.bounds();
    let span = bounds.max - bounds.min;
    let fraction = if span > 0.0 {
        ((value - bounds.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let pos = ((fraction * (SLIDER_WIDTH - 1) as f64).round() as usize).min(SLIDER_WIDTH - 1);

    let track: String = (0..SLIDER_WIDTH)
        .map(|i| match i.cmp(&pos) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '-',
        })
        .collect();

    format!("[{}]  {}", track, name.format_value(value))
}
