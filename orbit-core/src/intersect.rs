//! Line and circle intersection
use log::trace;
use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::scene::wrap_degrees;

/// Find where the infinite line through `line_start` and `line_end` crosses a circle.
///
/// Solves `A·t² + B·t + C = 0` for `P(t) = start + t·(end - start)`. Returns
/// both crossings with the `+√D` root first, a single point when the line is
/// exactly tangent (`D == 0`), and nothing when it misses.
pub fn find_intersections(
    center: &Point2<f64>,
    radius: f64,
    line_start: &Point2<f64>,
    line_end: &Point2<f64>,
) -> Result<Vec<Point2<f64>>> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(Error::InvalidRadius(radius));
    }

    let direction = line_end - line_start;
    let offset = line_start - center;

    let a = direction.norm_squared();
    if a == 0.0 {
        return Err(Error::DegenerateLine {
            x: line_start.x,
            y: line_start.y,
        });
    }
    let b = 2.0 * direction.dot(&offset);
    let c = offset.norm_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    trace!("line/circle: a={a} b={b} c={c} discriminant={discriminant}");

    if discriminant < 0.0 {
        return Ok(Vec::new());
    }

    let at = |t: f64| line_start + direction * t;

    if discriminant == 0.0 {
        return Ok(vec![at(-b / (2.0 * a))]);
    }

    let root = discriminant.sqrt();
    Ok(vec![at((-b + root) / (2.0 * a)), at((-b - root) / (2.0 * a))])
}

/// Angle of `point` around `center` in degrees, normalized to `[0, 360)`
pub fn polar_angle(center: &Point2<f64>, point: &Point2<f64>) -> f64 {
    wrap_degrees((point.y - center.y).atan2(point.x - center.x).to_degrees())
}

/// A circular arc, measured counter-clockwise from `start_deg`.
///
/// A negative sweep runs clockwise. Sweeps of 360 degrees or more cover the
/// whole circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl Arc {
    pub fn new(start_deg: f64, sweep_deg: f64) -> Self {
        Self {
            start_deg,
            sweep_deg,
        }
    }

    /// Whether the direction `angle_deg` falls on the arc (endpoints included)
    pub fn contains(&self, angle_deg: f64) -> bool {
        if self.sweep_deg.abs() >= 360.0 {
            return true;
        }
        let (start, sweep) = if self.sweep_deg < 0.0 {
            (self.start_deg + self.sweep_deg, -self.sweep_deg)
        } else {
            (self.start_deg, self.sweep_deg)
        };
        (angle_deg - start).rem_euclid(360.0) <= sweep
    }
}

/// Line/circle crossings restricted to those lying on `arc`, order preserved
pub fn find_arc_intersections(
    center: &Point2<f64>,
    radius: f64,
    arc: &Arc,
    line_start: &Point2<f64>,
    line_end: &Point2<f64>,
) -> Result<Vec<Point2<f64>>> {
    let mut points = find_intersections(center, radius, line_start, line_end)?;
    points.retain(|point| arc.contains(polar_angle(center, point)));
    Ok(points)
}
