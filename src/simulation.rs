//! Pointer Simulation
//!
//! Turns a single pointing device (mouse) into up to three virtual contacts,
//! one per button, so the gesture pipeline can be driven without a touch
//! screen. Scroll wheel movement stands in for pinch-zoom.

use crate::gesture::{ContactId, TouchPhase, TouchSample};
use crate::math::Vec2;

/// Number of pointer buttons that map to virtual contacts
pub const SIMULATED_BUTTONS: usize = 3;

/// Pinch-zoom delta reported per scroll notch
pub const SCROLL_ZOOM_STEP: f32 = 1.0;

/// Contact id for a simulated button: -1, -2, -3
///
/// Negative ids never collide with platform touch ids.
pub fn simulated_contact_id(button: usize) -> ContactId {
    -(1 + button as ContactId)
}

/// Pointer buttons in simulation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

/// Snapshot of the pointing device for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position (y-up)
    pub position: Vec2,
    /// Pressed state per [`PointerButton`]
    pub buttons: [bool; SIMULATED_BUTTONS],
    /// Scroll accumulated this frame; positive is wheel up / away from the user
    pub scroll: f32,
}

impl PointerState {
    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.buttons[button as usize]
    }
}

/// Virtual contacts and zoom produced for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulatedFrame {
    contacts: [Option<TouchSample>; SIMULATED_BUTTONS],
    /// Synthetic pinch-zoom delta, at most one per frame
    pub pinch_zoom: Option<f32>,
}

impl SimulatedFrame {
    /// Virtual contact samples in button order
    pub fn samples(&self) -> impl Iterator<Item = &TouchSample> + '_ {
        self.contacts.iter().flatten()
    }
}

/// Tracks button transitions between frames
#[derive(Debug, Default)]
pub struct PointerSimulator {
    was_down: [bool; SIMULATED_BUTTONS],
    /// Buttons whose contact was canceled and that are still held
    blocked: [bool; SIMULATED_BUTTONS],
    last_position: Option<Vec2>,
}

impl PointerSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while any simulated contact is down
    pub fn has_active_contacts(&self) -> bool {
        self.was_down.iter().any(|down| *down)
    }

    /// Advance one frame
    ///
    /// Newly pressed buttons begin a contact, held buttons move it by the
    /// pointer's travel since the last frame, released buttons end it.
    pub fn step(&mut self, pointer: &PointerState) -> SimulatedFrame {
        let position = pointer.position;
        let delta = position - self.last_position.unwrap_or(position);
        let mut frame = SimulatedFrame::default();

        for button in 0..SIMULATED_BUTTONS {
            let down = pointer.buttons[button];
            if self.blocked[button] {
                self.blocked[button] = down;
                continue;
            }
            let phase = match (self.was_down[button], down) {
                (false, true) => TouchPhase::Began,
                (true, true) => TouchPhase::Moved,
                (true, false) => TouchPhase::Ended,
                (false, false) => continue,
            };
            frame.contacts[button] = Some(TouchSample::new(
                simulated_contact_id(button),
                position,
                delta,
                phase,
            ));
            self.was_down[button] = down;
        }

        if pointer.scroll > 0.0 {
            frame.pinch_zoom = Some(-SCROLL_ZOOM_STEP);
        } else if pointer.scroll < 0.0 {
            frame.pinch_zoom = Some(SCROLL_ZOOM_STEP);
        }

        self.last_position = Some(position);
        frame
    }

    /// Cancel every simulated contact that is still down
    ///
    /// Used when real touches take over. The buttons must be released and
    /// pressed again to start new virtual contacts.
    pub fn cancel(&mut self) -> SimulatedFrame {
        let position = self.last_position.unwrap_or_default();
        let mut frame = SimulatedFrame::default();

        for button in 0..SIMULATED_BUTTONS {
            if self.was_down[button] {
                frame.contacts[button] = Some(TouchSample::new(
                    simulated_contact_id(button),
                    position,
                    Vec2::ZERO,
                    TouchPhase::Canceled,
                ));
            }
        }

        self.blocked = self.was_down;
        self.was_down = [false; SIMULATED_BUTTONS];
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(x: f32, y: f32, left: bool) -> PointerState {
        PointerState {
            position: Vec2::new(x, y),
            buttons: [left, false, false],
            scroll: 0.0,
        }
    }

    fn phases(frame: &SimulatedFrame) -> Vec<(ContactId, TouchPhase)> {
        frame.samples().map(|s| (s.id, s.phase)).collect()
    }

    #[test]
    fn test_button_lifecycle() {
        let mut sim = PointerSimulator::new();
        assert!(phases(&sim.step(&pointer(0.0, 0.0, false))).is_empty());

        let frame = sim.step(&pointer(0.0, 0.0, true));
        assert_eq!(phases(&frame), vec![(-1, TouchPhase::Began)]);
        assert!(sim.has_active_contacts());

        let frame = sim.step(&pointer(5.0, 2.0, true));
        assert_eq!(phases(&frame), vec![(-1, TouchPhase::Moved)]);
        assert_eq!(frame.samples().next().unwrap().delta, Vec2::new(5.0, 2.0));

        let frame = sim.step(&pointer(5.0, 2.0, false));
        assert_eq!(phases(&frame), vec![(-1, TouchPhase::Ended)]);
        assert!(!sim.has_active_contacts());
    }

    #[test]
    fn test_each_button_has_its_own_contact() {
        let mut sim = PointerSimulator::new();
        let state = PointerState {
            position: Vec2::ZERO,
            buttons: [true, true, true],
            scroll: 0.0,
        };
        let ids: Vec<ContactId> = sim.step(&state).samples().map(|s| s.id).collect();
        assert_eq!(ids, vec![-1, -2, -3]);
        assert!(state.is_pressed(PointerButton::Middle));
    }

    #[test]
    fn test_scroll_maps_to_unit_zoom() {
        let mut sim = PointerSimulator::new();
        let mut state = pointer(0.0, 0.0, false);
        state.scroll = 3.0;
        assert_eq!(sim.step(&state).pinch_zoom, Some(-1.0));
        state.scroll = -0.5;
        assert_eq!(sim.step(&state).pinch_zoom, Some(1.0));
        state.scroll = 0.0;
        assert_eq!(sim.step(&state).pinch_zoom, None);
    }

    #[test]
    fn test_cancel_requires_fresh_press() {
        let mut sim = PointerSimulator::new();
        sim.step(&pointer(1.0, 1.0, true));

        let frame = sim.cancel();
        assert_eq!(phases(&frame), vec![(-1, TouchPhase::Canceled)]);
        assert!(!sim.has_active_contacts());

        // still held: stays quiet
        assert!(phases(&sim.step(&pointer(1.0, 1.0, true))).is_empty());
        // released then pressed again: new contact
        assert!(phases(&sim.step(&pointer(1.0, 1.0, false))).is_empty());
        assert_eq!(
            phases(&sim.step(&pointer(1.0, 1.0, true))),
            vec![(-1, TouchPhase::Began)]
        );
    }
}
