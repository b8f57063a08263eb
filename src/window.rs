//! Window and Event Loop Management
//!
//! This module contains the shared windowing logic used by both
//! WASM (lib.rs) and desktop (main.rs) entry points. It translates winit
//! touch and mouse events into [`PointerEvent`]s for the [`App`].

use crate::input::{PointerEvent, PointerEventSource, PointerEventType};
use crate::math::Vec2;
use crate::simulation::PointerButton;
use crate::{App, GestureConfig};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// Wrapper for the application window and state
pub struct AppWrapper {
    pub window: Option<std::sync::Arc<Window>>,
    pub app: Option<App>,
    config: GestureConfig,
}

impl AppWrapper {
    /// Create a new empty app wrapper with default gesture tuning
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create a new empty app wrapper; the app is built once the window exists
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            window: None,
            app: None,
            config,
        }
    }

    /// Convert a window position (y down) into gesture space (y up)
    fn to_gesture_space(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let height = self
            .window
            .as_ref()
            .map(|window| window.inner_size().height as f64)
            .unwrap_or(0.0);
        Vec2::new(position.x as f32, (height - position.y) as f32)
    }
}

impl Default for AppWrapper {
    fn default() -> Self {
        Self::new()
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn touch_event_type(phase: TouchPhase) -> PointerEventType {
    match phase {
        TouchPhase::Started => PointerEventType::Down,
        TouchPhase::Moved => PointerEventType::Move,
        TouchPhase::Ended => PointerEventType::Up,
        TouchPhase::Cancelled => PointerEventType::Cancel,
    }
}

impl ApplicationHandler for AppWrapper {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        const WIDTH: u32 = 800;
        const HEIGHT: u32 = 600;
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Touch Gestures")
            .with_inner_size(winit::dpi::PhysicalSize::new(WIDTH, HEIGHT));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => window,
            Err(err) => {
                log::error!("❌ Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        log::info!("Window created: {:?}", window.inner_size());

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowExtWebSys;

            // Append canvas to DOM so it can receive pointer events
            let appended = window.canvas().and_then(|canvas| {
                let document = web_sys::window()?.document()?;
                let container = document.get_element_by_id("canvas-container")?;
                container.append_child(&canvas).ok()?;
                Some(())
            });
            if appended.is_none() {
                log::warn!("Could not append canvas to #canvas-container");
            }

            // On web the size can only be applied once the canvas is in the DOM
            let _ = window.request_inner_size(winit::dpi::PhysicalSize::new(WIDTH, HEIGHT));
        }

        match App::new(self.config.clone()) {
            Ok(app) => {
                self.app = Some(app);
                crate::debug::update_status("Ready");
                log::info!("✅ Gesture app initialized");
            }
            Err(err) => {
                log::error!("❌ Invalid gesture configuration: {err}");
                crate::debug::update_status(&err.to_string());
                event_loop.exit();
                return;
            }
        }

        let window = std::sync::Arc::new(window);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Touch(touch) => {
                let position = self.to_gesture_space(touch.location);
                if let Some(app) = &mut self.app {
                    app.queue_input_event(PointerEvent {
                        position,
                        event_type: touch_event_type(touch.phase),
                        source: PointerEventSource::Touch(touch.id),
                    });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = self.to_gesture_space(position);
                if let Some(app) = &mut self.app {
                    app.queue_pointer_position(position);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = pointer_button(button) else {
                    return;
                };
                let event_type = match state {
                    ElementState::Pressed => PointerEventType::Down,
                    ElementState::Released => PointerEventType::Up,
                };
                if let Some(app) = &mut self.app {
                    // Mouse button events carry no position; the queue keeps
                    // the last cursor position
                    let position = app.last_pointer_position();
                    app.queue_input_event(PointerEvent {
                        position,
                        event_type,
                        source: PointerEventSource::Mouse(Some(button)),
                    });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                if let Some(app) = &mut self.app {
                    app.queue_scroll(amount);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(app) = &mut self.app {
                    app.cancel_input();
                }
            }
            WindowEvent::Resized(physical_size) => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    log::warn!("Ignoring resize to zero size: {:?}", physical_size);
                    return;
                }
                log::info!("Window resized: {:?}", physical_size);
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = &mut self.app {
                    app.update();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Keep frames coming while contacts are live so holds and stationary
        // touches are observed; otherwise sleep until the next event
        if let (Some(window), Some(app)) = (&self.window, &self.app) {
            if app.has_pending_input() {
                window.request_redraw();
            }
        }
    }
}
