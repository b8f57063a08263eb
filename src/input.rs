//! Input Event Handling
//!
//! This module collects pointer input events (mouse and touch) as they arrive
//! from the windowing system and coalesces them into one [`FrameInput`]
//! snapshot per frame for the gesture engine.
//!
//! Platform events only say when something changed; the engine expects every
//! live contact once per frame. The queue therefore remembers live touches
//! and reports untouched ones as `Stationary`.

use crate::engine::FrameInput;
use crate::gesture::{ContactId, TouchPhase, TouchSample};
use crate::math::Vec2;
use crate::simulation::{PointerButton, PointerState, SIMULATED_BUTTONS};

/// A pointer input event (mouse or touch), positions in y-up space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in canvas space (pixels from bottom-left)
    pub position: Vec2,
    /// Type of event (down, move, up, cancel)
    pub event_type: PointerEventType,
    /// Source of the event
    pub source: PointerEventSource,
}

/// Type of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    /// Finger touched down or mouse button pressed
    Down,
    /// Pointer moved
    Move,
    /// Finger lifted or mouse button released
    Up,
    /// Platform interrupted the contact
    Cancel,
}

/// Source of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventSource {
    /// Mouse; carries the button for down/up events
    Mouse(Option<PointerButton>),
    /// Touch contact with its platform id
    Touch(u64),
}

/// Touch contact known to the queue
#[derive(Debug, Clone, Copy)]
struct LiveTouch {
    id: ContactId,
    position: Vec2,
    /// Position reported in the previous frame
    frame_start: Vec2,
    /// Began since the last frame and not yet reported
    began: bool,
    /// Terminal phase waiting to be reported
    finished: Option<TouchPhase>,
    /// Terminal phase has been reported; drop at the end of the frame
    done: bool,
}

/// Queue for input events that coalesces events between frames
pub struct InputQueue {
    /// Touches that are down or waiting to report their release
    touches: Vec<LiveTouch>,
    /// Samples handed out by the last [`take_frame`](Self::take_frame)
    samples: Vec<TouchSample>,
    /// Mouse state as of the latest event
    pointer: PointerState,
    /// Buttons pressed since the last frame
    pressed_this_frame: [bool; SIMULATED_BUTTONS],
    /// Buttons released in the same frame they were pressed
    pending_release: [bool; SIMULATED_BUTTONS],
    /// Whether any mouse input was ever seen
    has_pointer: bool,
    /// Events arrived since the last frame
    dirty: bool,
}

/// Platform touch ids are unsigned; keep them in the non-negative range so they
/// never collide with simulated contact ids
fn contact_id(platform_id: u64) -> ContactId {
    (platform_id & i64::MAX as u64) as ContactId
}

impl InputQueue {
    /// Create a new empty input queue
    pub fn new() -> Self {
        Self {
            touches: Vec::new(),
            samples: Vec::new(),
            pointer: PointerState::default(),
            pressed_this_frame: [false; SIMULATED_BUTTONS],
            pending_release: [false; SIMULATED_BUTTONS],
            has_pointer: false,
            dirty: false,
        }
    }

    /// Add an event to the queue
    pub fn push_event(&mut self, event: PointerEvent) {
        self.dirty = true;
        match event.source {
            PointerEventSource::Touch(platform_id) => {
                self.push_touch(contact_id(platform_id), event.position, event.event_type)
            }
            PointerEventSource::Mouse(button) => {
                self.push_mouse(button, event.position, event.event_type)
            }
        }

        log::debug!(
            "Input event queued: {:?} from {:?} (live touches: {})",
            event.event_type,
            event.source,
            self.touches.len()
        );
    }

    fn push_touch(&mut self, id: ContactId, position: Vec2, event_type: PointerEventType) {
        let existing = self
            .touches
            .iter_mut()
            .find(|touch| touch.id == id && touch.finished.is_none());

        match (event_type, existing) {
            (PointerEventType::Down, Some(touch)) => {
                // Duplicate down for a live id; treat as a move
                touch.position = position;
            }
            (PointerEventType::Down, None) => {
                self.touches.push(LiveTouch {
                    id,
                    position,
                    frame_start: position,
                    began: true,
                    finished: None,
                    done: false,
                });
            }
            (PointerEventType::Move, Some(touch)) => {
                touch.position = position;
            }
            (PointerEventType::Up, Some(touch)) => {
                touch.position = position;
                touch.finished = Some(TouchPhase::Ended);
            }
            (PointerEventType::Cancel, Some(touch)) => {
                touch.position = position;
                touch.finished = Some(TouchPhase::Canceled);
            }
            (_, None) => {
                log::warn!("Ignoring {:?} for unknown touch {}", event_type, id);
            }
        }
    }

    fn push_mouse(
        &mut self,
        button: Option<PointerButton>,
        position: Vec2,
        event_type: PointerEventType,
    ) {
        self.has_pointer = true;
        self.pointer.position = position;

        let Some(button) = button else {
            return;
        };
        let index = button as usize;

        match event_type {
            PointerEventType::Down => {
                self.pointer.buttons[index] = true;
                self.pressed_this_frame[index] = true;
                self.pending_release[index] = false;
            }
            PointerEventType::Up | PointerEventType::Cancel => {
                if self.pressed_this_frame[index] {
                    // Let the press be seen for one frame first
                    self.pending_release[index] = true;
                } else {
                    self.pointer.buttons[index] = false;
                }
            }
            PointerEventType::Move => {}
        }
    }

    /// Update the mouse position without a button change
    pub fn push_mouse_position(&mut self, position: Vec2) {
        self.dirty = true;
        self.push_mouse(None, position, PointerEventType::Move);
    }

    /// Accumulate scroll wheel movement; positive is away from the user
    pub fn push_scroll(&mut self, amount: f32) {
        self.dirty = true;
        self.has_pointer = true;
        self.pointer.scroll += amount;
    }

    /// Build the snapshot for this frame and reset per-frame state
    ///
    /// Ended and canceled touches are reported once and then forgotten.
    pub fn take_frame(&mut self) -> FrameInput<'_> {
        self.dirty = false;
        self.samples.clear();

        for touch in self.touches.iter_mut() {
            let delta = touch.position - touch.frame_start;
            let phase = if touch.began {
                touch.began = false;
                TouchPhase::Began
            } else if let Some(finished) = touch.finished {
                touch.done = true;
                finished
            } else if delta.length_squared() > 0.0 {
                TouchPhase::Moved
            } else {
                TouchPhase::Stationary
            };

            let delta = if phase == TouchPhase::Began { Vec2::ZERO } else { delta };
            self.samples
                .push(TouchSample::new(touch.id, touch.position, delta, phase));
            touch.frame_start = touch.position;
        }

        self.touches.retain(|touch| !touch.done);

        let pointer = self.has_pointer.then_some(self.pointer);

        for index in 0..SIMULATED_BUTTONS {
            if self.pending_release[index] {
                self.pointer.buttons[index] = false;
                self.pending_release[index] = false;
            }
        }
        self.pressed_this_frame = [false; SIMULATED_BUTTONS];
        self.pointer.scroll = 0.0;

        FrameInput {
            touches: &self.samples,
            pointer,
        }
    }

    /// Check if any touch is down or waiting to be reported
    pub fn has_touches(&self) -> bool {
        !self.touches.is_empty()
    }

    /// Check if the next frame has anything to report
    pub fn has_pending_input(&self) -> bool {
        self.dirty || self.has_touches() || self.is_pointer_down()
    }

    /// Latest known mouse position
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer.position
    }

    /// Check if any mouse button is held
    pub fn is_pointer_down(&self) -> bool {
        self.pointer.buttons.iter().any(|down| *down)
    }

    /// Forget all touches and button state, e.g. after focus loss
    pub fn clear(&mut self) {
        self.touches.clear();
        self.samples.clear();
        self.pointer.buttons = [false; SIMULATED_BUTTONS];
        self.pointer.scroll = 0.0;
        self.pressed_this_frame = [false; SIMULATED_BUTTONS];
        self.pending_release = [false; SIMULATED_BUTTONS];
        self.dirty = false;
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, x: f32, y: f32, event_type: PointerEventType) -> PointerEvent {
        PointerEvent {
            position: Vec2::new(x, y),
            event_type,
            source: PointerEventSource::Touch(id),
        }
    }

    fn mouse(button: Option<PointerButton>, event_type: PointerEventType) -> PointerEvent {
        PointerEvent {
            position: Vec2::new(1.0, 2.0),
            event_type,
            source: PointerEventSource::Mouse(button),
        }
    }

    fn phases(queue: &mut InputQueue) -> Vec<(ContactId, TouchPhase)> {
        queue
            .take_frame()
            .touches
            .iter()
            .map(|s| (s.id, s.phase))
            .collect()
    }

    #[test]
    fn test_touch_phases_across_frames() {
        let mut queue = InputQueue::new();
        queue.push_event(touch(3, 0.0, 0.0, PointerEventType::Down));
        assert_eq!(phases(&mut queue), vec![(3, TouchPhase::Began)]);

        assert_eq!(phases(&mut queue), vec![(3, TouchPhase::Stationary)]);

        queue.push_event(touch(3, 4.0, 0.0, PointerEventType::Move));
        queue.push_event(touch(3, 6.0, 0.0, PointerEventType::Move));
        let frame = queue.take_frame();
        assert_eq!(frame.touches[0].phase, TouchPhase::Moved);
        assert_eq!(frame.touches[0].delta, Vec2::new(6.0, 0.0));

        queue.push_event(touch(3, 6.0, 0.0, PointerEventType::Up));
        assert_eq!(phases(&mut queue), vec![(3, TouchPhase::Ended)]);
        assert!(phases(&mut queue).is_empty());
        assert!(!queue.has_touches());
    }

    #[test]
    fn test_tap_within_one_frame_reports_both_phases() {
        let mut queue = InputQueue::new();
        queue.push_event(touch(1, 5.0, 5.0, PointerEventType::Down));
        queue.push_event(touch(1, 5.0, 5.0, PointerEventType::Up));
        assert_eq!(phases(&mut queue), vec![(1, TouchPhase::Began)]);
        assert_eq!(phases(&mut queue), vec![(1, TouchPhase::Ended)]);
        assert!(phases(&mut queue).is_empty());
    }

    #[test]
    fn test_cancel_is_reported_once() {
        let mut queue = InputQueue::new();
        queue.push_event(touch(1, 0.0, 0.0, PointerEventType::Down));
        queue.take_frame();
        queue.push_event(touch(1, 0.0, 0.0, PointerEventType::Cancel));
        assert_eq!(phases(&mut queue), vec![(1, TouchPhase::Canceled)]);
        assert!(phases(&mut queue).is_empty());
    }

    #[test]
    fn test_id_reused_after_release() {
        let mut queue = InputQueue::new();
        queue.push_event(touch(1, 0.0, 0.0, PointerEventType::Down));
        queue.take_frame();
        queue.push_event(touch(1, 0.0, 0.0, PointerEventType::Up));
        queue.push_event(touch(1, 9.0, 9.0, PointerEventType::Down));
        assert_eq!(
            phases(&mut queue),
            vec![(1, TouchPhase::Ended), (1, TouchPhase::Began)]
        );
        assert_eq!(phases(&mut queue), vec![(1, TouchPhase::Stationary)]);
    }

    #[test]
    fn test_unknown_touch_move_is_ignored() {
        let mut queue = InputQueue::new();
        queue.push_event(touch(9, 0.0, 0.0, PointerEventType::Move));
        assert!(phases(&mut queue).is_empty());
    }

    #[test]
    fn test_mouse_click_within_one_frame_is_seen() {
        let mut queue = InputQueue::new();
        assert!(queue.take_frame().pointer.is_none());

        queue.push_event(mouse(Some(PointerButton::Left), PointerEventType::Down));
        queue.push_event(mouse(Some(PointerButton::Left), PointerEventType::Up));
        let pointer = queue.take_frame().pointer.unwrap();
        assert!(pointer.is_pressed(PointerButton::Left));
        assert_eq!(pointer.position, Vec2::new(1.0, 2.0));

        let pointer = queue.take_frame().pointer.unwrap();
        assert!(!pointer.is_pressed(PointerButton::Left));
        assert!(!queue.has_pending_input());
    }

    #[test]
    fn test_scroll_resets_each_frame() {
        let mut queue = InputQueue::new();
        queue.push_scroll(1.0);
        queue.push_scroll(0.5);
        assert_eq!(queue.take_frame().pointer.unwrap().scroll, 1.5);
        assert_eq!(queue.take_frame().pointer.unwrap().scroll, 0.0);
    }

    #[test]
    fn test_large_platform_ids_stay_non_negative() {
        assert_eq!(contact_id(u64::MAX), i64::MAX);
        assert_eq!(contact_id(42), 42);
    }
}
