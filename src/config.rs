//! Gesture Recognition Configuration
//!
//! Thresholds that drive the classifier, plus the pool capacity. A config is
//! validated once when the engine is built and is read-only afterwards.

use std::fmt;

/// Reasons a [`GestureConfig`] is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The tracker pool must hold at least one record
    ZeroPoolCapacity,
    /// A time threshold (seconds) was negative or not finite
    InvalidTime { name: &'static str, value: f32 },
    /// A dead zone (distance) was negative or not finite
    InvalidDeadZone { name: &'static str, value: f32 },
    /// The swipe angle threshold must lie strictly between 0 and 45 degrees
    InvalidAngleThreshold(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPoolCapacity => {
                write!(f, "trying to create a tracker pool of size 0")
            }
            ConfigError::InvalidTime { name, value } => {
                write!(f, "{name} must be a finite, non-negative time (got {value})")
            }
            ConfigError::InvalidDeadZone { name, value } => {
                write!(f, "{name} must be a finite, non-negative distance (got {value})")
            }
            ConfigError::InvalidAngleThreshold(value) => {
                write!(f, "drag angle threshold must be in (0, 45) degrees (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning parameters for gesture recognition
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// A release before this many seconds is a tap, after it a long tap
    pub tap_max_time: f32,
    /// A swipe must complete within this many seconds
    pub swipe_max_time: f32,
    /// Distance from the start point that promotes a contact to a drag
    pub drag_dead_zone: f32,
    /// Distance from the start point required for a swipe on release
    pub swipe_dead_zone: f32,
    /// Half-width in degrees of each cardinal swipe band
    pub drag_angle_threshold: f32,
    /// Seconds a contact must stay inside the dead zone before a hold begins
    pub hold_time: f32,
    /// Synthesize contacts from mouse buttons when no touches are present
    pub mouse_simulation: bool,
    /// Emit drag moves every frame, not only when the contact actually moved
    pub continuous_drag_detection: bool,
    /// Maximum number of simultaneously tracked contacts
    pub pool_capacity: usize,
}

impl GestureConfig {
    pub fn with_tap_max_time(mut self, seconds: f32) -> Self {
        self.tap_max_time = seconds;
        self
    }

    pub fn with_swipe_max_time(mut self, seconds: f32) -> Self {
        self.swipe_max_time = seconds;
        self
    }

    pub fn with_drag_dead_zone(mut self, distance: f32) -> Self {
        self.drag_dead_zone = distance;
        self
    }

    pub fn with_swipe_dead_zone(mut self, distance: f32) -> Self {
        self.swipe_dead_zone = distance;
        self
    }

    pub fn with_drag_angle_threshold(mut self, degrees: f32) -> Self {
        self.drag_angle_threshold = degrees;
        self
    }

    pub fn with_hold_time(mut self, seconds: f32) -> Self {
        self.hold_time = seconds;
        self
    }

    pub fn with_mouse_simulation(mut self, enabled: bool) -> Self {
        self.mouse_simulation = enabled;
        self
    }

    pub fn with_continuous_drag_detection(mut self, enabled: bool) -> Self {
        self.continuous_drag_detection = enabled;
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Validate that parameters are in acceptable ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }

        let times = [
            ("tap_max_time", self.tap_max_time),
            ("swipe_max_time", self.swipe_max_time),
            ("hold_time", self.hold_time),
        ];
        for (name, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTime { name, value });
            }
        }

        let dead_zones = [
            ("drag_dead_zone", self.drag_dead_zone),
            ("swipe_dead_zone", self.swipe_dead_zone),
        ];
        for (name, value) in dead_zones {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDeadZone { name, value });
            }
        }

        // 45 would collapse the diagonal bands to nothing
        if !(self.drag_angle_threshold > 0.0 && self.drag_angle_threshold < 45.0) {
            return Err(ConfigError::InvalidAngleThreshold(self.drag_angle_threshold));
        }

        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_time: 0.5,
            swipe_max_time: 0.4,
            drag_dead_zone: 15.0,
            swipe_dead_zone: 15.0,
            drag_angle_threshold: 25.0,
            hold_time: 2.0,
            mouse_simulation: true,
            continuous_drag_detection: true,
            pool_capacity: 16,
        }
    }
}
