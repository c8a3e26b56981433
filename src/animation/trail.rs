use tracing::trace;

use crate::math::Point3;

/// Number of `f64` components per stored point.
pub const STRIDE: usize = 3;

/// Default number of points allocated before the first growth.
pub const DEFAULT_TRAIL_START_CAPACITY: usize = 4096;

/// Default upper bound on the number of retained points.
pub const DEFAULT_TRAIL_HARD_CAP: usize = 200_000;

/// Default minimum distance between consecutive trail points.
pub const DEFAULT_TRAIL_MIN_STEP: f64 = 0.002;

/// Capacity and spacing policy for a [`TrailBuffer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParams {
    /// Points allocated up front.
    pub start_capacity: usize,
    /// Maximum number of points retained; older points are evicted beyond it.
    pub hard_cap: usize,
    /// A new point is recorded only when farther than this from the last one.
    pub min_step: f64,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            start_capacity: DEFAULT_TRAIL_START_CAPACITY,
            hard_cap: DEFAULT_TRAIL_HARD_CAP,
            min_step: DEFAULT_TRAIL_MIN_STEP,
        }
    }
}

/// A bounded, growable sequence of points stored as flat `[x, y, z, ...]` data.
///
/// Capacity starts at `start_capacity` and doubles on overflow until it
/// reaches `hard_cap`. Once full at the cap, every push overwrites the oldest
/// point. The storage is circular: `head` marks the oldest point and the
/// logical sequence may wrap past the end of `data`.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    data: Vec<f64>,
    capacity: usize,
    hard_cap: usize,
    head: usize,
    len: usize,
}

impl TrailBuffer {
    /// Creates an empty buffer. Both limits are raised to at least one point,
    /// and the start capacity never exceeds the hard cap.
    #[must_use]
    pub fn new(start_capacity: usize, hard_cap: usize) -> Self {
        let hard_cap = hard_cap.max(1);
        let capacity = start_capacity.clamp(1, hard_cap);
        Self {
            data: vec![0.0; capacity * STRIDE],
            capacity,
            hard_cap,
            head: 0,
            len: 0,
        }
    }

    /// Number of points currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no points are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Currently allocated capacity, in points.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum number of retained points.
    #[must_use]
    pub fn hard_cap(&self) -> usize {
        self.hard_cap
    }

    /// Appends a point, growing or evicting the oldest point as needed.
    pub fn push(&mut self, point: Point3) {
        if self.len == self.capacity {
            if self.capacity < self.hard_cap {
                let grown = (self.capacity * 2).min(self.hard_cap);
                trace!(from = self.capacity, to = grown, "trail buffer grown");
                self.reallocate(grown);
            } else {
                let slot = self.head;
                self.write(slot, &point);
                self.head = (self.head + 1) % self.capacity;
                trace!(len = self.len, "trail buffer evicted oldest point");
                return;
            }
        }
        let slot = (self.head + self.len) % self.capacity;
        self.write(slot, &point);
        self.len += 1;
    }

    /// Returns the point at logical position `index` (0 is the oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point3> {
        (index < self.len).then(|| self.read((self.head + index) % self.capacity))
    }

    /// Returns the most recently pushed point.
    #[must_use]
    pub fn last(&self) -> Option<Point3> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterates over the stored points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Point3> + '_ {
        (0..self.len).map(move |i| self.read((self.head + i) % self.capacity))
    }

    /// Returns the flat data as two ordered slices, oldest first.
    ///
    /// The second slice is empty unless the stored range wraps.
    #[must_use]
    pub fn as_slices(&self) -> (&[f64], &[f64]) {
        let end = self.head + self.len;
        if end <= self.capacity {
            (&self.data[self.head * STRIDE..end * STRIDE], &[])
        } else {
            (
                &self.data[self.head * STRIDE..self.capacity * STRIDE],
                &self.data[..(end - self.capacity) * STRIDE],
            )
        }
    }

    /// Rotates the storage so the points are contiguous and returns them, oldest first.
    pub fn make_contiguous(&mut self) -> &[f64] {
        if self.head != 0 {
            self.data.rotate_left(self.head * STRIDE);
            self.head = 0;
        }
        &self.data[..self.len * STRIDE]
    }

    /// Removes all points. The allocated capacity is kept.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Changes the hard cap, evicting the oldest points if the buffer holds
    /// more than the new cap.
    pub fn set_hard_cap(&mut self, hard_cap: usize) {
        let hard_cap = hard_cap.max(1);
        if self.len > hard_cap {
            let excess = self.len - hard_cap;
            self.head = (self.head + excess) % self.capacity;
            self.len = hard_cap;
        }
        self.hard_cap = hard_cap;
        if self.capacity > hard_cap {
            self.reallocate(hard_cap);
        }
    }

    /// Moves the stored points, in order, into a fresh allocation of `capacity` points.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut data = Vec::with_capacity(capacity * STRIDE);
        let (front, back) = self.as_slices();
        data.extend_from_slice(front);
        data.extend_from_slice(back);
        data.resize(capacity * STRIDE, 0.0);
        self.data = data;
        self.capacity = capacity;
        self.head = 0;
    }

    fn write(&mut self, slot: usize, point: &Point3) {
        let base = slot * STRIDE;
        self.data[base..base + STRIDE].copy_from_slice(&[point.x, point.y, point.z]);
    }

    fn read(&self, slot: usize) -> Point3 {
        let base = slot * STRIDE;
        Point3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_START_CAPACITY, DEFAULT_TRAIL_HARD_CAP)
    }
}
