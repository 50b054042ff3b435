//! Taps a checkbox of every animation type and writes a strip of PNG frames
//! per transition.
//!
//! Run with `RUST_LOG=debug cargo run --example tap_demo [output-dir]`.

use std::path::PathBuf;

use tickbox::prelude::*;
use tickbox::renderer::Result;

const SIZE: f32 = 48.0;
const FRAMES: u32 = 10;
const SCALE: f32 = 2.0;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/tap_demo"));
    std::fs::create_dir_all(&out_dir)?;

    for (name, animation_type) in [
        ("stroke", AnimationType::Stroke),
        ("fill", AnimationType::Fill),
        ("bounce", AnimationType::Bounce),
        ("flat", AnimationType::Flat),
        ("one_stroke", AnimationType::OneStroke),
        ("fade", AnimationType::Fade),
    ] {
        for box_type in [BoxType::Circle, BoxType::Square] {
            let mut renderer = RecordingRenderer::new();
            let mut checkbox = CheckBox::new()
                .box_type(box_type)
                .animation_type(animation_type)
                .on_tap(move |on| log::info!("{} tapped: {}", name, on))
                .on_animation_settled(move || log::info!("{} settled", name));
            checkbox.layout(SIZE, &mut renderer);

            for transition in ["on", "off"] {
                checkbox.handle_tap(&mut renderer);
                let step = checkbox.config().animation_duration / FRAMES;
                for frame in 0..=FRAMES {
                    let file = out_dir.join(format!(
                        "{}_{:?}_{}_{:02}.png",
                        name, box_type, transition, frame
                    ));
                    Snapshot::capture(&renderer, SIZE).save_png(&file, SCALE)?;
                    renderer.advance(step);
                }
                renderer.finish_all();
            }
        }
    }

    log::info!("frames written to {}", out_dir.display());
    Ok(())
}
