//! Portfolio Platformer entry point
//!
//! On the web this starts the game on `#canvas`. Natively it runs a headless
//! walkthrough that visits every block and logs the activations.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
    }

    log::info!("Portfolio platformer starting...");
    if let Err(e) = portfolio_platformer::platform::web::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio platformer (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let preset = args
        .iter()
        .position(|a| a == "--preset")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .unwrap_or("smooth");
    let dump_frame = args.iter().any(|a| a == "--dump-frame");

    match walkthrough::run(preset, dump_frame) {
        Ok(count) => println!("\n✓ Walkthrough activated {} blocks", count),
        Err(e) => {
            eprintln!("walkthrough failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod walkthrough {
    use portfolio_platformer::consts::REFERENCE_DT;
    use portfolio_platformer::content::sample_sections;
    use portfolio_platformer::renderer::NoAssets;
    use portfolio_platformer::sim::{Action, GameEvent, Viewport};
    use portfolio_platformer::{Session, Tuning};

    /// Frames allowed for any single leg of the walk
    const MAX_LEG_FRAMES: u32 = 5000;

    /// Walk under each block in turn and jump into it
    pub fn run(preset: &str, dump_frame: bool) -> Result<usize, String> {
        let tuning = Tuning::preset(preset).ok_or_else(|| format!("unknown preset '{}'", preset))?;
        let mut session = Session::new(tuning, Viewport::new(1280.0, 720.0), &sample_sections(), 1);
        let mut activated = 0;

        for index in 0..session.world().blocks.len() {
            let target = {
                let world = session.world();
                let block = &world.blocks[index];
                block.pos.x + world.hit_box_size().x / 2.0 - world.player.size.x / 2.0
            };

            let mut events = Vec::new();
            session.input_mut().press(Action::MoveRight);
            let mut frames = 0;
            while session.world().player.pos.x < target {
                events.extend(session.advance(REFERENCE_DT));
                frames += 1;
                if frames > MAX_LEG_FRAMES {
                    return Err(format!("never reached block {}", index));
                }
            }
            session.input_mut().release(Action::MoveRight);

            // Let the block settle from any earlier hit, then jump
            for _ in 0..120 {
                events.extend(session.advance(REFERENCE_DT));
            }
            session.input_mut().press(Action::Jump);
            events.extend(session.advance(REFERENCE_DT));
            session.input_mut().release(Action::Jump);
            for _ in 0..90 {
                events.extend(session.advance(REFERENCE_DT));
            }

            for event in events {
                if let GameEvent::Activate(activation) = event {
                    log::info!(
                        "Activated '{}' at screen ({:.1}, {:.1}), {} bytes of content",
                        activation.label,
                        activation.anchor.x,
                        activation.anchor.y,
                        activation.content.len()
                    );
                    println!("  {} -> {}", index, activation.label);
                    activated += 1;
                }
            }
        }

        if dump_frame {
            let frame = session.frame(REFERENCE_DT, &NoAssets);
            let json = serde_json::to_string_pretty(&frame).map_err(|e| e.to_string())?;
            println!("{}", json);
        }

        session.dispose();
        Ok(activated)
    }
}
