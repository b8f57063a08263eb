//! Gesture Dispatcher
//!
//! The [`GestureEngine`] is ticked once per frame with every active contact.
//! Each sample advances that contact's tracker through its lifecycle
//! (began, moved/stationary, ended/canceled), is run through the classifier
//! and emits its events immediately, before the next sample is looked at.
//!
//! At most one contact owns the drag role at a time. Trackers come from a
//! fixed pool; a contact that arrives while the pool is exhausted is skipped
//! until a tracker frees up.

use crate::classify::{self, Release};
use crate::config::{ConfigError, GestureConfig};
use crate::events::{
    DragEvent, GestureEvents, HoldEvent, LongTapEvent, PinchZoomEvent, SwipeEvent, TapEvent,
    TouchEvent,
};
use crate::gesture::{ContactId, DragStatus, HoldStatus, TouchPhase, TouchSample, TouchStatus};
use crate::math::Vec2;
use crate::occlusion::{NoOcclusion, OcclusionOracle};
use crate::simulation::{PointerSimulator, PointerState};
use crate::tracker::TouchRegistry;

/// Everything the input source reports for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput<'a> {
    /// Real touch contacts, in platform order
    pub touches: &'a [TouchSample],
    /// Pointing device state, used for contact simulation
    pub pointer: Option<PointerState>,
}

/// Multi-touch gesture recognizer
pub struct GestureEngine {
    config: GestureConfig,
    registry: TouchRegistry,
    /// Contact currently owning the drag role; always present in `registry`
    drag_owner: Option<ContactId>,
    occlusion: Box<dyn OcclusionOracle>,
    simulator: PointerSimulator,
    events: GestureEvents,
}

impl GestureEngine {
    /// Create an engine with no UI occlusion
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        Self::with_occlusion(config, NoOcclusion)
    }

    /// Create an engine that asks `occlusion` whether contacts are over UI
    pub fn with_occlusion(
        config: GestureConfig,
        occlusion: impl OcclusionOracle + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = TouchRegistry::new(config.pool_capacity)?;

        log::info!(
            "Gesture engine ready: {} trackers, mouse simulation {}",
            config.pool_capacity,
            if config.mouse_simulation { "on" } else { "off" }
        );

        Ok(Self {
            config,
            registry,
            drag_owner: None,
            occlusion: Box::new(occlusion),
            simulator: PointerSimulator::new(),
            events: GestureEvents::new(),
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Event channels, for subscribing and unsubscribing
    pub fn events_mut(&mut self) -> &mut GestureEvents {
        &mut self.events
    }

    /// Live contacts and tracker pool usage
    pub fn registry(&self) -> &TouchRegistry {
        &self.registry
    }

    /// Number of contacts currently tracked
    pub fn active_contacts(&self) -> usize {
        self.registry.len()
    }

    /// Contact currently owning the drag role
    pub fn drag_owner(&self) -> Option<ContactId> {
        self.drag_owner
    }

    /// Process one frame of input
    ///
    /// # Arguments
    /// * `now` - Clock time in seconds; must not go backwards between frames
    /// * `input` - Real contacts plus the pointing device state
    pub fn update(&mut self, now: f64, input: &FrameInput) {
        if self.config.mouse_simulation && !input.touches.is_empty() {
            // Real touches take over from the mouse
            if self.simulator.has_active_contacts() {
                log::debug!("Touch input detected, canceling simulated contacts");
                let frame = self.simulator.cancel();
                for sample in frame.samples() {
                    self.handle_touch(now, sample);
                }
            }
        }

        for sample in input.touches {
            self.handle_touch(now, sample);
        }

        if let [a, b] = input.touches {
            self.pinch(a, b);
        }

        if self.config.mouse_simulation && input.touches.is_empty() {
            if let Some(pointer) = &input.pointer {
                let frame = self.simulator.step(pointer);
                for sample in frame.samples() {
                    self.handle_touch(now, sample);
                }
                if let Some(delta) = frame.pinch_zoom {
                    self.events.pinch_zoom.emit(&PinchZoomEvent { delta });
                }
            }
        }
    }

    /// Emit pinch-zoom for a frame with exactly two contacts
    fn pinch(&mut self, a: &TouchSample, b: &TouchSample) {
        let persists = |s: &TouchSample| {
            !matches!(s.phase, TouchPhase::Began | TouchPhase::Canceled)
        };
        if !(persists(a) && persists(b)) {
            return;
        }

        let delta = classify::pinch_delta(a, b);
        log::debug!("Pinch zoom {:.2} between {} and {}", delta, a.id, b.id);
        self.events.pinch_zoom.emit(&PinchZoomEvent { delta });
    }

    /// Advance a single contact by one sample
    pub fn handle_touch(&mut self, now: f64, sample: &TouchSample) {
        match sample.phase {
            TouchPhase::Began => self.touch_began(now, sample),
            TouchPhase::Moved | TouchPhase::Stationary => self.touch_moved(now, sample),
            TouchPhase::Ended => self.touch_ended(now, sample),
            TouchPhase::Canceled => self.touch_canceled(sample),
        }
    }

    /// Cancel every tracked contact, e.g. when the window loses focus
    pub fn cancel_all(&mut self, now: f64) {
        loop {
            let Some(id) = self.registry.ids().next() else {
                break;
            };
            let position = self
                .registry
                .get(id)
                .map(|tracker| tracker.last_position)
                .unwrap_or_default();
            let sample = TouchSample::new(id, position, Vec2::ZERO, TouchPhase::Canceled);
            self.handle_touch(now, &sample);
        }

        if self.simulator.has_active_contacts() {
            // Trackers are already gone; only the button state is left to reset
            let _ = self.simulator.cancel();
        }
    }

    fn touch_began(&mut self, now: f64, sample: &TouchSample) {
        let id = sample.id;
        let position = sample.position;
        let valid = !self.occlusion.is_occluded(position, id);

        if self.drag_owner == Some(id) {
            // Close the running drag before the tracker restarts
            let was_valid = self.registry.get(id).is_some_and(|tracker| tracker.valid);
            log::debug!("Contact {id} began again while owning the drag; ending it");
            self.release_drag(id, was_valid, sample);
        }

        let Some((tracker, _)) = self.registry.get_or_acquire(id) else {
            return;
        };
        tracker.begin(id, now, position, valid);
        log::debug!("Contact {id} began at {position} (valid: {valid})");

        if valid {
            self.events.touch.emit(&TouchEvent {
                status: TouchStatus::Down,
                position,
            });
        }
    }

    fn touch_moved(&mut self, now: f64, sample: &TouchSample) {
        let Self {
            config,
            registry,
            drag_owner,
            occlusion,
            events,
            ..
        } = self;
        let position = sample.position;

        let tracker = match registry.get_or_acquire(sample.id) {
            Some((tracker, false)) => tracker,
            Some((tracker, true)) => {
                // Missed its began sample, most likely the pool was full then
                let valid = !occlusion.is_occluded(position, sample.id);
                tracker.begin(sample.id, now, position, valid);
                log::debug!("Contact {} tracked late at {position}", sample.id);
                if valid {
                    events.touch.emit(&TouchEvent {
                        status: TouchStatus::Down,
                        position,
                    });
                }
                tracker
            }
            None => return,
        };
        tracker.last_position = position;

        if tracker.valid {
            events.touch.emit(&TouchEvent {
                status: TouchStatus::Hold,
                position,
            });
        }

        let owner = *drag_owner;
        match owner {
            None => {
                if classify::exceeds_dead_zone(
                    position,
                    tracker.begin_position,
                    config.drag_dead_zone,
                ) {
                    *drag_owner = Some(tracker.id);
                    if tracker.valid {
                        events.drag.emit(&DragEvent {
                            status: DragStatus::Begin,
                            position,
                            delta: sample.delta,
                        });
                    }
                } else if tracker.valid
                    && classify::hold_elapsed(
                        tracker.elapsed(now),
                        config.hold_time,
                        tracker.hold_processed,
                    )
                {
                    events.hold.emit(&HoldEvent {
                        status: HoldStatus::Begin,
                        position,
                    });
                    tracker.hold_processed = true;
                }
            }
            Some(owner) if owner == tracker.id => {
                if tracker.valid
                    && classify::drag_moved(sample.delta, config.continuous_drag_detection)
                {
                    events.drag.emit(&DragEvent {
                        status: DragStatus::Moving,
                        position,
                        delta: sample.delta,
                    });
                }
            }
            Some(_) => {}
        }
    }

    /// Give up the drag role if `id` owns it, emitting drag-end
    fn release_drag(&mut self, id: ContactId, valid: bool, sample: &TouchSample) {
        if self.drag_owner != Some(id) {
            return;
        }
        if valid {
            self.events.drag.emit(&DragEvent {
                status: DragStatus::End,
                position: sample.position,
                delta: sample.delta,
            });
        }
        self.drag_owner = None;
    }

    fn touch_ended(&mut self, now: f64, sample: &TouchSample) {
        let id = sample.id;
        let position = sample.position;
        let Some(tracker) = self.registry.get(id) else {
            log::debug!("Ignoring end of untracked contact {id}");
            return;
        };
        let valid = tracker.valid;
        let hold_processed = tracker.hold_processed;
        let displacement = position - tracker.begin_position;
        let elapsed = tracker.elapsed(now);

        self.release_drag(id, valid, sample);

        match classify::classify_release(displacement, elapsed, &self.config) {
            Release::Swipe(direction, vector) => {
                if valid {
                    self.events.swipe.emit(&SwipeEvent { direction, vector });
                }
            }
            Release::Tap => {
                if valid && !self.occlusion.is_occluded(position, id) {
                    self.events.tap.emit(&TapEvent { position });
                }
            }
            Release::LongTap => {
                if valid && !self.occlusion.is_occluded(position, id) {
                    self.events.long_tap.emit(&LongTapEvent { position });
                }
            }
            Release::Nothing => {}
        }

        if hold_processed {
            self.events.hold.emit(&HoldEvent {
                status: HoldStatus::End,
                position,
            });
        }

        if valid {
            self.events.touch.emit(&TouchEvent {
                status: TouchStatus::Up,
                position,
            });
        }

        self.registry.remove(id);
        log::debug!("Contact {id} ended after {elapsed:.3}s ({})", self.registry.pool());
    }

    fn touch_canceled(&mut self, sample: &TouchSample) {
        let id = sample.id;
        let Some(tracker) = self.registry.get(id) else {
            log::debug!("Ignoring cancel of untracked contact {id}");
            return;
        };
        let valid = tracker.valid;
        let hold_processed = tracker.hold_processed;

        self.release_drag(id, valid, sample);

        if hold_processed {
            self.events.hold.emit(&HoldEvent {
                status: HoldStatus::End,
                position: sample.position,
            });
        }

        self.registry.remove(id);
        log::debug!("Contact {id} canceled ({})", self.registry.pool());
    }
}
