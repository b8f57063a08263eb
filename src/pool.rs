//! Fixed-Capacity Object Pool
//!
//! Records are built once up front and then lent out and taken back by value.
//! The free records sit at the front of the backing slots; a single free-depth
//! index marks the top of that LIFO stack, so lending and reclaiming never
//! touch the allocator.

use std::fmt;

use crate::config::ConfigError;

/// A pool of `capacity` pre-built records
pub struct FixedPool<T> {
    /// Backing slots; `slots[..free]` hold the records currently available
    slots: Vec<Option<T>>,
    /// Number of free records (top of the free stack)
    free: usize,
}

impl<T: Default> FixedPool<T> {
    /// Create a pool of `capacity` default-constructed records
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_factory(capacity, T::default)
    }
}

impl<T> FixedPool<T> {
    /// Create a pool, building each record with `factory`
    ///
    /// # Arguments
    /// * `capacity` - Number of records, must be non-zero
    /// * `factory` - Called exactly `capacity` times
    pub fn with_factory(
        capacity: usize,
        mut factory: impl FnMut() -> T,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            log::error!("Trying to create an object pool of size 0");
            return Err(ConfigError::ZeroPoolCapacity);
        }

        let slots = (0..capacity).map(|_| Some(factory())).collect();

        Ok(Self {
            slots,
            free: capacity,
        })
    }

    /// Take a record out of the pool
    ///
    /// Returns `None` when every record is already lent out.
    pub fn acquire(&mut self) -> Option<T> {
        if self.free == 0 {
            log::warn!("Object pool empty ({} in use)", self.used_count());
            return None;
        }

        self.free -= 1;
        self.slots[self.free].take()
    }

    /// Hand a record back to the pool
    ///
    /// Releasing into a full pool is ignored and the record is dropped.
    pub fn release(&mut self, record: T) {
        if self.free == self.slots.len() {
            log::debug!("Release into a full pool ignored");
            return;
        }

        self.slots[self.free] = Some(record);
        self.free += 1;
    }

    /// Number of records available to [`acquire`](Self::acquire)
    pub fn free_count(&self) -> usize {
        self.free
    }

    /// Number of records currently lent out
    pub fn used_count(&self) -> usize {
        self.slots.len() - self.free
    }

    /// Total number of records owned by the pool
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T> fmt::Display for FixedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.used_count(), self.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_an_error() {
        assert!(matches!(
            FixedPool::<u32>::new(0),
            Err(ConfigError::ZeroPoolCapacity)
        ));
    }

    #[test]
    fn test_acquire_all_then_release_all() {
        for capacity in [1, 2, 16] {
            let mut pool = FixedPool::<u32>::new(capacity).unwrap();
            let lent: Vec<u32> = (0..capacity).map(|_| pool.acquire().unwrap()).collect();
            assert_eq!(pool.used_count(), capacity);
            assert_eq!(pool.free_count(), 0);

            for record in lent {
                pool.release(record);
            }
            assert_eq!(pool.used_count(), 0);
            assert_eq!(pool.free_count(), capacity);
        }
    }

    #[test]
    fn test_last_slot_is_usable() {
        let mut pool = FixedPool::<u32>::new(1).unwrap();
        assert!(pool.acquire().is_some());
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn test_exhausted_pool_returns_none() {
        let mut pool = FixedPool::with_factory(3, || 7u32).unwrap();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();
        assert_eq!(pool.acquire(), None);
        assert_eq!(pool.used_count(), 3);

        pool.release(a);
        assert_eq!(pool.used_count(), 2);
        assert_eq!(pool.acquire(), Some(7));
        pool.release(b);
        pool.release(c);
    }

    #[test]
    fn test_release_into_full_pool_is_ignored() {
        let mut pool = FixedPool::<u32>::new(2).unwrap();
        pool.release(99);
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.used_count(), 0);
    }

    #[test]
    fn test_lifo_reuse() {
        let mut counter = 0;
        let mut pool = FixedPool::with_factory(4, || {
            counter += 1;
            counter
        })
        .unwrap();
        let record = pool.acquire().unwrap();
        assert_eq!(record, 4);
        pool.release(100);
        assert_eq!(pool.acquire(), Some(100));
    }

    #[test]
    fn test_display_shows_usage() {
        let mut pool = FixedPool::<u32>::new(16).unwrap();
        let _held = pool.acquire();
        assert_eq!(pool.to_string(), "1 / 16");
    }
}
