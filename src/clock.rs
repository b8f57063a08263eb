//! Frame clock in seconds since start-up.
//!
//! `std::time::Instant` is unavailable in the browser, so WASM builds read
//! `performance.now()` instead.

/// Monotonic clock used to timestamp gesture frames
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    performance: Option<web_sys::Performance>,
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
}

impl Clock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|window| window.performance());
        if performance.is_none() {
            log::warn!("window.performance unavailable; gesture timing will not advance");
        }
        let start_ms = performance.as_ref().map(|p| p.now()).unwrap_or(0.0);
        Self {
            performance,
            start_ms,
        }
    }

    /// Seconds elapsed since the clock was created
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Seconds elapsed since the clock was created
    #[cfg(target_arch = "wasm32")]
    pub fn now(&self) -> f64 {
        match &self.performance {
            Some(performance) => (performance.now() - self.start_ms) / 1000.0,
            None => 0.0,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
