//! Frame layout for the orbital diagram
//!
//! Computes every coordinate the renderer draws for one frame: the central
//! body, the light source, the orbiting satellite, and the sight line grazing
//! the satellite toward the light. The orbital angle is always passed in;
//! the driver owns it and advances it with [`advance_angle`].
use log::{debug, warn};
use nalgebra::{Point2, Vector2};

use crate::error::{Error, Result};
use crate::intersect::{find_intersections, Arc};
use crate::matrix::Matrix;

/// Proportions of the diagram, relative to the window and the body radius
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Body radius = min(width, height) / divisor
    pub body_radius_divisor: f64,
    pub light_radius_ratio: f64,
    /// The light sits this many body radii up and left of the body
    pub light_distance_ratio: f64,
    pub satellite_radius_ratio: f64,
    pub orbit_distance_ratio: f64,
    /// Lit half of the body, in the renderer's arc angles
    pub lit_arc: Arc,
    /// How far the sight line's start is pushed back past the satellite
    pub sight_line_extension: f64,
    /// Degrees per animation tick
    pub angle_step: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            body_radius_divisor: 5.0,
            light_radius_ratio: 2.5,
            light_distance_ratio: 2.0,
            satellite_radius_ratio: 5.0,
            orbit_distance_ratio: 1.4,
            lit_arc: Arc::new(45.0, 180.0),
            sight_line_extension: 200.0,
            angle_step: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Point2<f64>,
    pub radius: f64,
}

/// Everything the renderer needs to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub body: Disc,
    pub light: Disc,
    pub satellite: Disc,
    /// Direction from the satellite to the light in degrees, y axis flipped
    /// to the renderer's counter-clockwise arc convention
    pub light_bearing_deg: f64,
    pub lit_arc: Arc,
    pub sight_line: (Point2<f64>, Point2<f64>),
    /// Where the sight line crosses the body outline
    pub shadow_points: Vec<Point2<f64>>,
}

impl SceneLayout {
    /// Lit and dark halves of the satellite, as (lit, dark)
    pub fn satellite_phase_arcs(&self) -> (Arc, Arc) {
        (
            Arc::new(self.light_bearing_deg - 90.0, 180.0),
            Arc::new(self.light_bearing_deg + 90.0, 180.0),
        )
    }
}

/// Normalize an angle in degrees to `[0, 360)`
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds up to exactly 360 for tiny negative angles
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Advance the orbital angle by `step` degrees, wrapping at a full turn
pub fn advance_angle(angle: f64, step: f64) -> f64 {
    wrap_degrees(angle + step)
}

/// Lay out one frame of a `width` x `height` window at orbital angle `angle_deg`
pub fn layout_scene(
    width: u32,
    height: u32,
    angle_deg: f64,
    config: &SceneConfig,
) -> Result<SceneLayout> {
    let (w, h) = (f64::from(width), f64::from(height));
    let origin = Point2::origin();

    let to_center = Matrix::translate(w / 2.0, h / 2.0, 0.0);
    let body = Disc {
        center: to_center.transform_point(&origin)?,
        radius: w.min(h) / config.body_radius_divisor,
    };
    if !(body.radius.is_finite() && body.radius > 0.0) {
        return Err(Error::InvalidRadius(body.radius));
    }

    let light_offset = body.radius * config.light_distance_ratio;
    let light = Disc {
        center: to_center
            .multiply(&Matrix::translate(-light_offset, -light_offset, 0.0))?
            .transform_point(&origin)?,
        radius: body.radius / config.light_radius_ratio,
    };

    // Park the satellite at (-orbit, 0), swing it around the body, then center
    let orbit = body.radius * config.orbit_distance_ratio;
    let orbit_transform = to_center
        .multiply(&Matrix::rotate_z(angle_deg))?
        .multiply(&Matrix::translate(-orbit, 0.0, 0.0))?;
    let satellite = Disc {
        center: orbit_transform.transform_point(&origin)?,
        radius: body.radius / config.satellite_radius_ratio,
    };

    let to_light = light.center - satellite.center;
    let light_bearing_deg = -to_light.y.atan2(to_light.x).to_degrees();

    let sight_line = grazing_line(&satellite, &light, config.sight_line_extension)?;
    let shadow_points = find_intersections(&body.center, body.radius, &sight_line.0, &sight_line.1)?;

    debug!(
        "frame {width}x{height} @ {angle_deg:.2}°: satellite=({:.1}, {:.1}) bearing={light_bearing_deg:.1}° shadow_points={}",
        satellite.center.x,
        satellite.center.y,
        shadow_points.len()
    );

    Ok(SceneLayout {
        body,
        light,
        satellite,
        light_bearing_deg,
        lit_arc: config.lit_arc,
        sight_line,
        shadow_points,
    })
}

/// Line tangent-offset from the satellite toward the light, start pushed back by `extension`
fn grazing_line(
    satellite: &Disc,
    light: &Disc,
    extension: f64,
) -> Result<(Point2<f64>, Point2<f64>)> {
    let to_light = light.center - satellite.center;
    let length = to_light.norm();
    if length == 0.0 {
        warn!("satellite and light share a center, no sight line");
        return Err(Error::DegenerateLine {
            x: satellite.center.x,
            y: satellite.center.y,
        });
    }

    let unit = to_light / length;
    let normal = Vector2::new(-unit.y, unit.x);
    let start = satellite.center + normal * satellite.radius;
    let end = light.center + normal * light.radius;

    let along = end - start;
    let along_length = along.norm();
    if along_length == 0.0 {
        warn!("sight line collapsed to a point");
        return Err(Error::DegenerateLine { x: start.x, y: start.y });
    }

    Ok((start - along * (extension / along_length), end))
}
