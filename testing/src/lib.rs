//! # Event Wizard Testing
//!
//! Testing utilities and helpers for the event wizard.
//!
//! This crate provides:
//! - Deterministic clocks for the `Clock` environment trait
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for returned effects
//!
//! ## Example
//!
//! ```ignore
//! use event_wizard_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(WizardReducer::new())
//!     .with_env(test_environment())
//!     .given_state(WizardState::default())
//!     .when_action(WizardAction::Next)
//!     .then_state(|state| assert!(!state.errors.is_empty()))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use event_wizard_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use event_wizard_testing::mocks::FixedClock;
    /// use event_wizard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// Useful when consecutive checkpoints must carry distinct timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Create a clock starting at `start` and advancing by `step` per call
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            match self.next.lock() {
                Ok(mut next) => {
                    let current = *next;
                    *next = current + self.step;
                    current
                },
                Err(poisoned) => *poisoned.into_inner(),
            }
        }
    }

    /// The instant every default test clock reports (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, test_epoch, FixedClock, SteppingClock};
pub use reducer_test::{assertions, ReducerTest};
