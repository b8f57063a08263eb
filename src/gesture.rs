//! Gesture Value Types
//!
//! Small `Copy` types describing what the recognizer detected. These are the
//! payloads carried by the event channels in [`crate::events`].

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::math::Vec2;

/// Identifier of a contact, stable for the lifetime of one touch
///
/// Real touches use the ids reported by the platform. Contacts synthesized
/// from mouse buttons use -1, -2 and -3.
pub type ContactId = i64;

/// Phase of a contact as reported by the input source for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// First sample of a new contact
    Began,
    /// Contact moved since the previous frame
    Moved,
    /// Contact is down but did not move
    Stationary,
    /// Contact was lifted
    Ended,
    /// Contact was interrupted by the platform
    Canceled,
}

/// Presence of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchStatus {
    Down,
    Hold,
    Up,
}

/// Progress of the single active drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStatus {
    Begin,
    Moving,
    End,
}

/// Progress of a stationary hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldStatus {
    Begin,
    End,
}

/// Set of directions a swipe travelled in
///
/// Cardinal swipes carry one bit; diagonal swipes carry the two adjacent
/// cardinal bits (e.g. `RIGHT | UP`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SwipeDirection(u8);

impl SwipeDirection {
    pub const NONE: SwipeDirection = SwipeDirection(0);
    pub const LEFT: SwipeDirection = SwipeDirection(0x1);
    pub const UP: SwipeDirection = SwipeDirection(0x2);
    pub const RIGHT: SwipeDirection = SwipeDirection(0x4);
    pub const DOWN: SwipeDirection = SwipeDirection(0x8);

    pub const HORIZONTAL: SwipeDirection = SwipeDirection(0x1 | 0x4);
    pub const VERTICAL: SwipeDirection = SwipeDirection(0x2 | 0x8);
    pub const FULL: SwipeDirection = SwipeDirection(0xF);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`
    pub fn contains(self, other: SwipeDirection) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one bit
    pub fn intersects(self, other: SwipeDirection) -> bool {
        self.0 & other.0 != 0
    }

    /// True for the four single-bit directions
    pub fn is_cardinal(self) -> bool {
        self.0.count_ones() == 1
    }
}

impl BitOr for SwipeDirection {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        SwipeDirection(self.0 | rhs.0)
    }
}

impl BitOrAssign for SwipeDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SwipeDirection {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        SwipeDirection(self.0 & rhs.0)
    }
}

impl fmt::Debug for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }

        let names = [
            (SwipeDirection::LEFT, "Left"),
            (SwipeDirection::UP, "Up"),
            (SwipeDirection::RIGHT, "Right"),
            (SwipeDirection::DOWN, "Down"),
        ];
        let mut first = true;
        for (direction, name) in names {
            if self.contains(direction) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// One raw contact sample handed to the engine for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: ContactId,
    /// Current position (y-up)
    pub position: Vec2,
    /// Movement since the previous frame
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn new(id: ContactId, position: Vec2, delta: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            delta,
            phase,
        }
    }

    /// Position of this contact in the previous frame
    pub fn previous_position(&self) -> Vec2 {
        self.position - self.delta
    }
}
