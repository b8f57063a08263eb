//! Application State and Logic
//!
//! This module owns the gesture engine, the per-frame input queue and the
//! clock. It is independent of the windowing system: the window layer pushes
//! pointer events in and calls [`App::update`] once per frame.

use crate::clock::Clock;
use crate::config::{ConfigError, GestureConfig};
use crate::debug;
use crate::engine::GestureEngine;
use crate::events::{GestureEvent, TouchEvent};
use crate::gesture::TouchStatus;
use crate::input::{InputQueue, PointerEvent};
use crate::math::Vec2;

/// Main application state
pub struct App {
    engine: GestureEngine,
    /// Input event queue
    input_queue: InputQueue,
    clock: Clock,
}

impl App {
    /// Create the application with the given gesture tuning
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        let mut engine = GestureEngine::new(config)?;
        engine.events_mut().subscribe_all(log_gesture);

        Ok(Self {
            engine,
            input_queue: InputQueue::new(),
            clock: Clock::new(),
        })
    }

    /// Run one frame of gesture recognition
    pub fn update(&mut self) {
        let now = self.clock.now();
        let input = self.input_queue.take_frame();
        self.engine.update(now, &input);

        debug::update_contacts(
            self.engine.active_contacts(),
            &self.engine.registry().pool().to_string(),
        );
        debug::increment_frame_count();
    }

    /// Queue an input event for processing
    pub fn queue_input_event(&mut self, event: PointerEvent) {
        self.input_queue.push_event(event);
    }

    /// Record the latest mouse position
    pub fn queue_pointer_position(&mut self, position: Vec2) {
        self.input_queue.push_mouse_position(position);
    }

    /// Latest mouse position seen by the queue
    pub fn last_pointer_position(&self) -> Vec2 {
        self.input_queue.pointer_position()
    }

    /// Record scroll wheel movement; positive is away from the user
    pub fn queue_scroll(&mut self, amount: f32) {
        self.input_queue.push_scroll(amount);
    }

    /// Check if the next frame has input to process
    pub fn has_pending_input(&self) -> bool {
        self.input_queue.has_pending_input()
    }

    /// Drop every contact, e.g. when the window loses focus
    pub fn cancel_input(&mut self) {
        let now = self.clock.now();
        self.engine.cancel_all(now);
        self.input_queue.clear();
        log::info!("Input canceled, all contacts released");
    }

    /// Get mutable reference to the engine (for subscribing to gestures)
    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }

    /// Get reference to the engine
    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }
}

/// Log every gesture; the per-frame touch-hold signal only at trace level
fn log_gesture(event: GestureEvent) {
    if let GestureEvent::Touch(TouchEvent {
        status: TouchStatus::Hold,
        ..
    }) = event
    {
        log::trace!("{event}");
        return;
    }

    log::info!("{event}");
    debug::update_gesture(&event.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PointerEventSource, PointerEventType};

    #[test]
    fn test_touch_flows_through_to_engine() {
        let mut app = App::new(GestureConfig::default()).unwrap();
        app.queue_input_event(PointerEvent {
            position: Vec2::new(10.0, 10.0),
            event_type: PointerEventType::Down,
            source: PointerEventSource::Touch(1),
        });
        assert!(app.has_pending_input());

        app.update();
        assert_eq!(app.engine().active_contacts(), 1);

        app.cancel_input();
        assert_eq!(app.engine().active_contacts(), 0);
        assert!(!app.has_pending_input());
    }

    #[test]
    fn test_subscribers_added_through_app_see_taps() {
        use crate::events::TapEvent;
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut app = App::new(GestureConfig::default()).unwrap();
        let taps: Rc<RefCell<Vec<TapEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = taps.clone();
        app.engine_mut()
            .events_mut()
            .tap
            .subscribe(move |tap| sink.borrow_mut().push(*tap));

        let touch = |event_type| PointerEvent {
            position: Vec2::new(20.0, 30.0),
            event_type,
            source: PointerEventSource::Touch(4),
        };
        app.queue_input_event(touch(PointerEventType::Down));
        app.update();
        // The clock must advance past zero before release
        std::thread::sleep(std::time::Duration::from_millis(5));
        app.queue_input_event(touch(PointerEventType::Up));
        app.update();

        assert_eq!(
            *taps.borrow(),
            vec![TapEvent {
                position: Vec2::new(20.0, 30.0)
            }]
        );
        assert_eq!(app.engine().active_contacts(), 0);
    }

    #[test]
    fn test_invalid_config_fails_startup() {
        let config = GestureConfig::default().with_pool_capacity(0);
        assert!(App::new(config).is_err());
    }
}
