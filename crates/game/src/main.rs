//! OpenScrim demo binary: a firing-range scene rendered as a console
//! nameplate overlay.

mod camera;
mod hud;
mod scene;
mod text_grid;

use anyhow::Result;
use camera::Camera;
use engine_core::{ShapeKind, Transform};
use nameplate::{NameplateConfig, NameplateHud};
use rand::rngs::StdRng;
use rand::SeedableRng;

const GRID_W: usize = 80;
const GRID_H: usize = 24;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = NameplateConfig::load();
    // The demo surface is a character grid, so the bar shrinks from pixel
    // units to cells.
    config.bar_size = (10.0, 3.0);
    let hud = NameplateHud::new(config);

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut scene = scene::build(&mut rng);

    // Camera rides the viewer's eye point.
    let eye = {
        let transform = scene.world.get::<&Transform>(scene.viewer)?;
        let kind = scene.world.get::<&ShapeKind>(scene.viewer)?;
        kind.anchor_point(&transform)
    };
    let mut camera = Camera::new(eye);
    // Short label range so the far bots sit in the fade band.
    camera.far = 60.0;
    // Terminal cells are about twice as tall as wide.
    camera.aspect = GRID_W as f32 / (GRID_H as f32 * 2.0);

    for (i, yaw) in [-0.35_f32, 0.0, 0.35].into_iter().enumerate() {
        camera.set_yaw_pitch(yaw, 0.0);
        log::info!("frame {i}: yaw {yaw:.2}");
        match hud::render_overlay(&hud, &camera, &mut scene, GRID_W, GRID_H) {
            Some(grid) => println!("{grid}"),
            None => log::warn!("frame {i} skipped: no nameplate context"),
        }
    }

    Ok(())
}
