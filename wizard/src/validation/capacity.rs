//! Category rules: at least one well-formed category, and no more seats on
//! offer than the event holds.

use super::{Field, ValidationError, ValidationErrors};
use crate::types::{Category, EventDraft};

/// Why a category is rejected, if it is
fn category_defect(category: &Category) -> Option<&'static str> {
    if category.name.trim().is_empty() {
        Some("name is required")
    } else if category.price.is_negative() {
        Some("price cannot be negative")
    } else if category.max_capacity <= 0 {
        Some("capacity must be greater than zero")
    } else {
        None
    }
}

/// Checks the category list against the event capacity
///
/// An event capacity of `0` means unbounded and disables the sum check.
#[must_use]
pub fn validate_capacity(draft: &EventDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.categories.is_empty() {
        errors.add(Field::Categories, ValidationError::NoCategories);
    }

    let first_defect = draft
        .categories
        .iter()
        .enumerate()
        .find_map(|(i, category)| category_defect(category).map(|reason| (i + 1, reason)));
    if let Some((index, reason)) = first_defect {
        errors.add(
            Field::Categories,
            ValidationError::InvalidCategory {
                index,
                reason: reason.to_string(),
            },
        );
    }

    if draft.max_capacity > 0 {
        let total = draft.total_category_capacity();
        if total > i64::from(draft.max_capacity) {
            errors.add(
                Field::MaxCapacity,
                ValidationError::CapacityExceeded {
                    total,
                    max: draft.max_capacity,
                },
            );
        }
    }

    errors
}
