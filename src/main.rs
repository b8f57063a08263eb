//! Standalone Touch Gestures Demo (Desktop)
//!
//! This binary opens a window and logs every recognized gesture. Touch
//! screens produce real contacts; without one, the mouse stands in for
//! fingers. For WASM/web builds, the entry point is in lib.rs (wasm_start).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use touch_gestures::{AppWrapper, GestureConfig};
    use winit::event_loop::{ControlFlow, EventLoop};

    env_logger::init();

    log::info!("🚀 Starting touch gestures desktop demo");

    let event_loop = EventLoop::new()
        .map_err(|e| anyhow::anyhow!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app_wrapper = AppWrapper::with_config(GestureConfig::default());

    event_loop
        .run_app(&mut app_wrapper)
        .map_err(|e| anyhow::anyhow!("Event loop error: {e}"))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
