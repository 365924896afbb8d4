//! Time abstraction traits for platform-agnostic timing operations.
//!
//! The drive controller is fed monotonic cycle timestamps through
//! [`crate::drive::CycleInput`]; the `TimeSource` trait is how the
//! caller-owned loop produces them, abstracting over the platform clock
//! so tests can drive time deterministically.

use core::cell::Cell;

/// Platform-agnostic monotonic time source for control loops.
///
/// # Example
///
/// ```
/// use mecadrive_core::traits::{MockTime, TimeSource};
///
/// fn due_for_cycle<T: TimeSource>(time: &T, last_update_us: u64) -> bool {
///     time.elapsed_since(last_update_us) >= 20_000 // 50 Hz
/// }
///
/// let time = MockTime::new();
/// time.advance(20_000);
/// assert!(due_for_cycle(&time, 0));
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns current time in seconds, for control cycle timestamps.
    fn now_s(&self) -> f32 {
        self.now_us() as f32 / 1_000_000.0
    }

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Mock time source for testing with controllable time advancement.
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// Safety: MockTime is only used in single-threaded test contexts where
// Cell is safe. The Send+Sync bounds on TimeSource are required for
// platform clocks, but MockTime never crosses threads.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advances the current time by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms * 1000);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
