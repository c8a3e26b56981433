//! Headless chord-lift run: sketches a loop, plays the parameters for a few
//! seconds and reports the trail and surface sizes.
//!
//! ```text
//! cargo run --example trace
//! RUST_LOG=chordlift=trace cargo run --example trace
//! ```

use chordlift::math::Point3;
use chordlift::session::Sketch;
use chordlift::settings::Settings;

const FRAME_DT: f64 = 1.0 / 60.0;

fn main() -> chordlift::Result<()> {
    // Default: WARN for everything, INFO for the demo and the crate.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trace=info".parse().unwrap_or_default())
        .add_directive("chordlift=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings {
        show_surface: true,
        res_a: 48,
        res_b: 48,
        ..Settings::default()
    };
    let mut sketch = Sketch::new(settings)?;

    let loop_points = [
        (0.0, 2.0),
        (1.6, 1.1),
        (2.2, -0.4),
        (0.7, -1.9),
        (-1.2, -1.5),
        (-2.1, 0.3),
    ];
    for (x, z) in loop_points {
        sketch.add_point(Point3::new(x, 0.0, z))?;
    }

    sketch.set_playing(true);
    let mut highest = 0.0_f64;
    for _ in 0..600 {
        if let Some(sample) = sketch.update(FRAME_DT)? {
            highest = highest.max(sample.chord_length);
        }
    }

    let frame = sketch.frame();
    let trail_points = frame.trail.len();
    let triangles = frame.surface.map_or(0, |s| s.mesh.indices.len());
    tracing::info!(trail_points, triangles, highest, "playback finished");
    Ok(())
}
