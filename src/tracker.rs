//! Touch Tracking
//!
//! A [`TouchTracker`] holds what the recognizer remembers about one live
//! contact. The [`TouchRegistry`] maps contact ids to trackers borrowed from a
//! [`FixedPool`]; a tracker is owned either by the pool or by the registry,
//! never both.

use crate::config::ConfigError;
use crate::gesture::ContactId;
use crate::math::Vec2;
use crate::pool::FixedPool;

/// Per-contact state kept between frames
#[derive(Debug, Clone, PartialEq)]
pub struct TouchTracker {
    /// Contact this tracker belongs to
    pub id: ContactId,
    /// Clock time (seconds) of the first sample
    pub begin_time: f64,
    /// Position of the first sample
    pub begin_position: Vec2,
    /// Position of the most recent sample
    pub last_position: Vec2,
    /// False if the contact started over an occluding UI element
    pub valid: bool,
    /// True once a hold-begin was emitted for this contact
    pub hold_processed: bool,
}

impl TouchTracker {
    /// Reset the tracker for a contact starting at `position`
    pub fn begin(&mut self, id: ContactId, now: f64, position: Vec2, valid: bool) {
        self.id = id;
        self.begin_time = now;
        self.begin_position = position;
        self.last_position = position;
        self.valid = valid;
        self.hold_processed = false;
    }

    /// Seconds since the contact began
    pub fn elapsed(&self, now: f64) -> f32 {
        (now - self.begin_time) as f32
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self {
            id: 0,
            begin_time: 0.0,
            begin_position: Vec2::ZERO,
            last_position: Vec2::ZERO,
            valid: true,
            hold_processed: false,
        }
    }
}

/// Live contacts keyed by id, backed by a fixed pool of trackers
pub struct TouchRegistry {
    pool: FixedPool<TouchTracker>,
    /// Trackers on loan; never longer than the pool capacity
    active: Vec<TouchTracker>,
}

impl TouchRegistry {
    /// Create a registry able to track `capacity` simultaneous contacts
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let pool = FixedPool::new(capacity)?;
        Ok(Self {
            active: Vec::with_capacity(pool.capacity()),
            pool,
        })
    }

    fn index_of(&self, id: ContactId) -> Option<usize> {
        self.active.iter().position(|tracker| tracker.id == id)
    }

    /// Tracker for a live contact
    pub fn get(&self, id: ContactId) -> Option<&TouchTracker> {
        self.index_of(id).map(|index| &self.active[index])
    }

    /// Mutable tracker for a live contact
    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut TouchTracker> {
        self.index_of(id).map(move |index| &mut self.active[index])
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.index_of(id).is_some()
    }

    /// Look up the tracker for `id`, borrowing a fresh one from the pool if
    /// the contact is not tracked yet
    ///
    /// # Returns
    /// The tracker and whether it was newly acquired, or `None` if the pool
    /// is exhausted.
    pub fn get_or_acquire(&mut self, id: ContactId) -> Option<(&mut TouchTracker, bool)> {
        if let Some(index) = self.index_of(id) {
            return Some((&mut self.active[index], false));
        }

        let mut tracker = match self.pool.acquire() {
            Some(tracker) => tracker,
            None => {
                log::warn!("No tracker free for contact {id}; skipping until one is released");
                return None;
            }
        };
        tracker.id = id;
        self.active.push(tracker);

        let last = self.active.len() - 1;
        Some((&mut self.active[last], true))
    }

    /// Stop tracking `id` and return its tracker to the pool
    ///
    /// Returns false if the contact was not tracked.
    pub fn remove(&mut self, id: ContactId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let tracker = self.active.swap_remove(index);
                self.pool.release(tracker);
                true
            }
            None => false,
        }
    }

    /// Ids of all live contacts
    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.active.iter().map(|tracker| tracker.id)
    }

    /// Number of live contacts
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Backing pool, for usage statistics
    pub fn pool(&self) -> &FixedPool<TouchTracker> {
        &self.pool
    }
}
