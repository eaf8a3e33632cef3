//! Ordering rules for the event's dates and deadlines.
//!
//! Every rule is checked independently; one failing rule never hides another.
//! Deadlines are strict: a deadline equal to the event start is rejected.

use super::{Field, ValidationError, ValidationErrors};
use crate::types::EventDraft;

/// End-date and registration-deadline rules (event details step)
#[must_use]
pub fn validate_schedule(draft: &EventDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let (Some(start), Some(end)) = (draft.date, draft.end_date) {
        if end < start {
            errors.add(Field::EndDate, ValidationError::EndDateBeforeStart);
        }
    }

    if let (Some(start), Some(deadline)) = (draft.date, draft.registration_deadline) {
        if deadline >= start {
            errors.add(
                Field::RegistrationDeadline,
                ValidationError::DeadlineNotBeforeStart,
            );
        }
    }

    errors
}

/// Payment and deposit rules (payment settings step)
///
/// Nothing is checked unless payment is required.
#[must_use]
pub fn validate_payment(draft: &EventDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !draft.payment_required {
        return errors;
    }

    match (draft.payment_deadline, draft.date) {
        (None, _) => errors.add(Field::PaymentDeadline, ValidationError::MissingPaymentDeadline),
        (Some(deadline), Some(start)) if deadline >= start => errors.add(
            Field::PaymentDeadline,
            ValidationError::PaymentDeadlineNotBeforeStart,
        ),
        _ => {},
    }

    if !draft.deposit_allowed {
        return errors;
    }

    let percentage = draft.deposit_percentage;
    if percentage <= 0 || percentage >= 100 {
        errors.add(
            Field::DepositPercentage,
            ValidationError::InvalidDepositPercentage { value: percentage },
        );
    }

    let Some(full_deadline) = draft.full_payment_deadline else {
        errors.add(
            Field::FullPaymentDeadline,
            ValidationError::MissingFullPaymentDeadline,
        );
        return errors;
    };

    if draft.date.is_some_and(|start| full_deadline >= start) {
        errors.add(
            Field::FullPaymentDeadline,
            ValidationError::FullPaymentDeadlineNotBeforeStart,
        );
    }

    if draft
        .payment_deadline
        .is_some_and(|initial| full_deadline < initial)
    {
        errors.add(
            Field::FullPaymentDeadline,
            ValidationError::FullPaymentDeadlineBeforeInitial,
        );
    }

    errors
}

/// All temporal rules
#[must_use]
pub fn validate_dates(draft: &EventDraft) -> ValidationErrors {
    let mut errors = validate_schedule(draft);
    errors.merge(validate_payment(draft));
    errors
}
