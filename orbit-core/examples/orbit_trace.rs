//! Example: Trace one full orbit of the diagram layout
//!
//! Usage: RUST_LOG=debug cargo run --example orbit_trace -- 1024x768

use std::env;
use std::error::Error;

use log::{info, warn};
use orbit_core::{advance_angle, layout_scene, SceneConfig};

fn parse_size(arg: &str) -> Option<(u32, u32)> {
    let (w, h) = arg.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let args: Vec<String> = env::args().collect();
    let (width, height) = match args.get(1) {
        Some(arg) => parse_size(arg).ok_or_else(|| format!("Expected WIDTHxHEIGHT, got {arg}"))?,
        None => {
            warn!("No window size provided, using 800x600");
            (800, 600)
        }
    };

    let config = SceneConfig::default();
    let ticks = (360.0 / config.angle_step).round() as usize;
    let mut angle = 0.0;
    let mut shadowed = 0;

    for tick in 0..ticks {
        let layout = layout_scene(width, height, angle, &config)?;
        if !layout.shadow_points.is_empty() {
            shadowed += 1;
        }
        if tick % 100 == 0 {
            info!(
                "angle {:6.1}° satellite ({:7.1}, {:7.1}) shadow points {:?}",
                angle,
                layout.satellite.center.x,
                layout.satellite.center.y,
                layout
                    .shadow_points
                    .iter()
                    .map(|p| (p.x.round(), p.y.round()))
                    .collect::<Vec<_>>()
            );
        }
        angle = advance_angle(angle, config.angle_step);
    }

    info!("{shadowed} of {ticks} frames cast a sight line across the body");
    Ok(())
}
