//! Gesture Classifier
//!
//! Pure geometric and timing tests. Nothing in here holds state; the
//! dispatcher in [`crate::engine`] feeds it tracker data and acts on the
//! answers.

use crate::config::GestureConfig;
use crate::gesture::{SwipeDirection, TouchSample};
use crate::math::Vec2;

/// Per-frame movement below this is treated as sensor noise while dragging
pub const DRAG_NOISE_FLOOR: f32 = 0.1;

/// Outcome of classifying a contact at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Fast, long movement; carries the direction and the unit displacement
    Swipe(SwipeDirection, Vec2),
    /// Short press inside the dead zone
    Tap,
    /// Press inside the dead zone that outlasted the tap window
    LongTap,
    /// Nothing to report (slow drag, empty direction, degenerate timing)
    Nothing,
}

/// True once `position` has left the dead zone around `origin`
#[inline]
pub fn exceeds_dead_zone(position: Vec2, origin: Vec2, dead_zone: f32) -> bool {
    position.distance(origin) > dead_zone
}

/// True if a stationary contact has been down long enough to start a hold
#[inline]
pub fn hold_elapsed(elapsed: f32, hold_time: f32, hold_processed: bool) -> bool {
    !hold_processed && elapsed > 0.0 && elapsed > hold_time
}

/// True if a frame's movement should produce a drag-moving event
#[inline]
pub fn drag_moved(delta: Vec2, continuous: bool) -> bool {
    continuous || delta.length() > DRAG_NOISE_FLOOR
}

/// Half-open angle range test on a circle, wrapping through 0/360
fn angle_in_band(angle: f32, start: f32, end: f32) -> bool {
    if start > end {
        angle >= start || angle < end
    } else {
        angle >= start && angle < end
    }
}

/// Bucket a displacement into one of 8 directions
///
/// The circle is split into four cardinal bands `[c - threshold, c + threshold)`
/// centred on 0/90/180/270 degrees and four diagonal bands filling the gaps.
/// Angles are counter-clockwise from +x with y pointing up.
///
/// # Arguments
/// * `displacement` - Release position minus begin position
/// * `threshold` - Half-width of the cardinal bands in degrees
pub fn swipe_direction(displacement: Vec2, threshold: f32) -> SwipeDirection {
    if displacement.length_squared() == 0.0 {
        return SwipeDirection::NONE;
    }

    let angle = displacement.angle_degrees();
    let t = threshold;

    let bands = [
        (360.0 - t, t, SwipeDirection::RIGHT),
        (t, 90.0 - t, SwipeDirection::RIGHT | SwipeDirection::UP),
        (90.0 - t, 90.0 + t, SwipeDirection::UP),
        (90.0 + t, 180.0 - t, SwipeDirection::UP | SwipeDirection::LEFT),
        (180.0 - t, 180.0 + t, SwipeDirection::LEFT),
        (180.0 + t, 270.0 - t, SwipeDirection::LEFT | SwipeDirection::DOWN),
        (270.0 - t, 270.0 + t, SwipeDirection::DOWN),
        (270.0 + t, 360.0 - t, SwipeDirection::DOWN | SwipeDirection::RIGHT),
    ];

    bands
        .iter()
        .find(|(start, end, _)| angle_in_band(angle, *start, *end))
        .map(|(_, _, direction)| *direction)
        .unwrap_or(SwipeDirection::NONE)
}

/// Decide which terminal gesture a released contact produced
///
/// Validity and occlusion are not considered here; the caller decides whether
/// to emit the result.
///
/// # Arguments
/// * `displacement` - Release position minus begin position
/// * `elapsed` - Seconds between begin and release
pub fn classify_release(displacement: Vec2, elapsed: f32, config: &GestureConfig) -> Release {
    if elapsed <= 0.0 {
        return Release::Nothing;
    }

    if displacement.length() > config.swipe_dead_zone {
        if elapsed >= config.swipe_max_time {
            return Release::Nothing;
        }
        let direction = swipe_direction(displacement, config.drag_angle_threshold);
        if direction.is_empty() {
            return Release::Nothing;
        }
        return Release::Swipe(direction, displacement.normalize());
    }

    if elapsed < config.tap_max_time {
        Release::Tap
    } else {
        Release::LongTap
    }
}

/// Change in distance between two contacts since the previous frame
///
/// Positive when the contacts moved closer together.
pub fn pinch_delta(a: &TouchSample, b: &TouchSample) -> f32 {
    let previous = a.previous_position().distance(b.previous_position());
    let current = a.position.distance(b.position);
    previous - current
}
