//! Touch Gestures Library
//!
//! This crate turns a per-frame stream of raw touch contacts into
//! high-level gesture events: touch, tap, long tap, hold, drag, swipe and
//! pinch zoom. It can run:
//! - As a library driven by any input source via [`GestureEngine::update`]
//! - Standalone in a browser (via WASM) or as a desktop demo, both of which
//!   feed winit pointer events through [`AppWrapper`]
//!
//! The recognition core (pool, registry, classifier, engine) has no
//! dependency on the windowing layer.

mod app;
pub mod classify;
mod clock;
mod config;
pub mod debug;
mod engine;
mod events;
mod gesture;
mod input;
mod math;
mod occlusion;
mod pool;
mod simulation;
mod tracker;
mod window;

pub use app::App;
pub use classify::Release;
pub use clock::Clock;
pub use config::{ConfigError, GestureConfig};
pub use engine::{FrameInput, GestureEngine};
pub use events::{
    AllSubscriptions, DragEvent, EventChannel, GestureEvent, GestureEvents, HoldEvent,
    LongTapEvent, PinchZoomEvent, SubscriptionId, SwipeEvent, TapEvent, TouchEvent,
};
pub use gesture::{
    ContactId, DragStatus, HoldStatus, SwipeDirection, TouchPhase, TouchSample, TouchStatus,
};
pub use input::{InputQueue, PointerEvent, PointerEventSource, PointerEventType};
pub use math::Vec2;
pub use occlusion::{NoOcclusion, OcclusionOracle};
pub use pool::FixedPool;
pub use simulation::{simulated_contact_id, PointerButton, PointerSimulator, PointerState};
pub use tracker::{TouchRegistry, TouchTracker};
pub use window::AppWrapper;

// Re-export for WASM builds
#[cfg(target_arch = "wasm32")]
pub use wasm_bindgen;

/// Initialize panic hook for better error messages in WASM
#[cfg(target_arch = "wasm32")]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize logging for WASM (logs go to browser console)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {err}").into());
    }
}

/// WASM entry point - called when the module is loaded
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    init_panic_hook();
    init_logging();

    log::info!("🚀 Touch gestures WASM module started");

    // Spawn the event loop
    wasm_bindgen_futures::spawn_local(async {
        run_event_loop();
    });
}

#[cfg(target_arch = "wasm32")]
fn run_event_loop() {
    use winit::event_loop::{ControlFlow, EventLoop};

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("❌ Failed to create event loop: {err}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app_wrapper = AppWrapper::new();

    if let Err(err) = event_loop.run_app(&mut app_wrapper) {
        log::error!("❌ Event loop error: {err}");
    }
}
