//! Validation rules for the event draft.
//!
//! Validators are pure functions from a draft (or a slice of it) to
//! [`ValidationErrors`]. They never fail in the `Result` sense: a broken rule
//! is data for the UI, keyed by the form field it belongs to.
//!
//! - [`calendar`]: local calendar days for session grouping
//! - [`temporal`]: ordering of dates and deadlines
//! - [`capacity`]: categories against the event capacity
//! - [`intervals`]: meal session collisions and date range

pub mod calendar;
pub mod capacity;
pub mod intervals;
pub mod temporal;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub use calendar::CalendarZone;
pub use capacity::validate_capacity;
pub use intervals::{detect_overlap, find_overlap, validate_date_range};
pub use temporal::{validate_dates, validate_payment, validate_schedule};

/// Form field an error is reported against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Event name
    Name,
    /// Venue name
    Venue,
    /// Event start
    Date,
    /// Event end
    EndDate,
    /// Registration deadline
    RegistrationDeadline,
    /// Payment deadline
    PaymentDeadline,
    /// Full-payment deadline
    FullPaymentDeadline,
    /// Deposit percentage
    DepositPercentage,
    /// Category list
    Categories,
    /// Event capacity against categories
    MaxCapacity,
    /// Meal session list (completeness)
    MealSessions,
    /// Meal sessions ending no later than they start
    MealSessionTimeRange,
    /// Meal sessions colliding on the same day
    MealSessionOverlap,
    /// Meal sessions outside the event's dates
    MealSessionRange,
    /// Badge template selection
    BadgeTemplate,
}

impl Field {
    /// Key used by the UI to place the message next to its input
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Venue => "venue",
            Self::Date => "date",
            Self::EndDate => "endDate",
            Self::RegistrationDeadline => "registrationDeadline",
            Self::PaymentDeadline => "paymentDeadline",
            Self::FullPaymentDeadline => "fullPaymentDeadline",
            Self::DepositPercentage => "depositPercentage",
            Self::Categories => "categories",
            Self::MaxCapacity => "maxCapacity",
            Self::MealSessions => "mealSessions",
            Self::MealSessionTimeRange => "mealSessionTimeRange",
            Self::MealSessionOverlap => "mealSessionOverlap",
            Self::MealSessionRange => "mealSessionRange",
            Self::BadgeTemplate => "badgeTemplate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A broken validation rule
///
/// Positions (`index`) are 1-based so they can be shown to the user as-is.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A mandatory field is empty
    #[error("{label} is required")]
    Required {
        /// Human-readable field label
        label: String,
    },

    /// End date precedes the start date
    #[error("End date cannot be before the start date")]
    EndDateBeforeStart,

    /// Registration deadline is not strictly before the start
    #[error("Registration deadline must be before the event start")]
    DeadlineNotBeforeStart,

    /// Payment is required but no deadline is set
    #[error("Payment deadline is required when payment is required")]
    MissingPaymentDeadline,

    /// Payment deadline is not strictly before the start
    #[error("Payment deadline must be before the event start")]
    PaymentDeadlineNotBeforeStart,

    /// Deposit percentage outside the open interval (0, 100)
    #[error("Deposit percentage must be between 1 and 99 (got {value})")]
    InvalidDepositPercentage {
        /// The rejected value
        value: i32,
    },

    /// Deposits are allowed but no full-payment deadline is set
    #[error("Full payment deadline is required when deposits are allowed")]
    MissingFullPaymentDeadline,

    /// Full-payment deadline is not strictly before the start
    #[error("Full payment deadline must be before the event start")]
    FullPaymentDeadlineNotBeforeStart,

    /// Full-payment deadline precedes the initial payment deadline
    #[error("Full payment deadline cannot be before the initial payment deadline")]
    FullPaymentDeadlineBeforeInitial,

    /// No category defined
    #[error("At least one category is required")]
    NoCategories,

    /// A category has a blank name, a negative price or no seats
    #[error("Category {index} is invalid: {reason}")]
    InvalidCategory {
        /// 1-based position of the first offending category
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Categories offer more seats than the event holds
    #[error("Total category capacity ({total}) exceeds event capacity ({max})")]
    CapacityExceeded {
        /// Sum of category capacities
        total: i64,
        /// Event capacity
        max: u32,
    },

    /// A named session is missing one of its times
    #[error("Meal session {index} needs both a start and an end time")]
    IncompleteSession {
        /// 1-based position of the session
        index: usize,
    },

    /// A session does not end after it begins
    #[error("Meal session {index} must end after it starts")]
    InvalidSessionTimeRange {
        /// 1-based position of the session
        index: usize,
    },

    /// Two sessions on the same day intersect
    #[error("Meal sessions {first} and {second} overlap on the same day")]
    SessionOverlap {
        /// 1-based position of the first session of the colliding pair
        first: usize,
        /// 1-based position of the second session of the colliding pair
        second: usize,
    },

    /// One or more sessions fall outside the event dates
    #[error("{}", .violations.join("; "))]
    SessionOutOfRange {
        /// One description per violation
        violations: Vec<String>,
    },

    /// No badge template selected
    #[error("A badge template must be selected")]
    MissingBadgeTemplate,
}

/// Field-keyed validation result; empty means valid
///
/// Each field holds at most one error: the first rule that fails for a field
/// wins, later ones for the same field are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    /// No errors
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records an error unless the field already has one
    pub fn add(&mut self, field: Field, error: ValidationError) {
        self.0.entry(field).or_insert(error);
    }

    /// Merges another result in, keeping existing entries
    pub fn merge(&mut self, other: Self) {
        for (field, error) in other.0 {
            self.add(field, error);
        }
    }

    /// True when no rule failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error for a field
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// True if the field has an error
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterates over `(field, error)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// The `field → message` map the UI displays
    #[must_use]
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.0
            .iter()
            .map(|(field, error)| (field.key(), error.to_string()))
            .collect()
    }
}

impl FromIterator<(Field, ValidationError)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (Field, ValidationError)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, error) in iter {
            errors.add(field, error);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(
            Field::FullPaymentDeadline,
            ValidationError::FullPaymentDeadlineNotBeforeStart,
        );
        errors.add(
            Field::FullPaymentDeadline,
            ValidationError::FullPaymentDeadlineBeforeInitial,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::FullPaymentDeadline),
            Some(&ValidationError::FullPaymentDeadlineNotBeforeStart)
        );
    }

    #[test]
    fn messages_are_keyed_by_form_field() {
        let errors: ValidationErrors = [
            (Field::EndDate, ValidationError::EndDateBeforeStart),
            (
                Field::MaxCapacity,
                ValidationError::CapacityExceeded { total: 110, max: 100 },
            ),
        ]
        .into_iter()
        .collect();

        let messages = errors.messages();
        assert_eq!(
            messages.get("endDate").map(String::as_str),
            Some("End date cannot be before the start date")
        );
        assert_eq!(
            messages.get("maxCapacity").map(String::as_str),
            Some("Total category capacity (110) exceeds event capacity (100)")
        );
    }

    #[test]
    fn out_of_range_message_joins_violations() {
        let error = ValidationError::SessionOutOfRange {
            violations: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(error.to_string(), "a; b");
    }
}
