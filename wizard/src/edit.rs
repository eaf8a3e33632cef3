//! Field-level edits to an [`EventDraft`].
//!
//! Every change the UI can make to the draft is a [`DraftEdit`] value. Keeping
//! edits as data lets the reducer tell a real user change apart from a no-op
//! echo (the UI re-emitting values it was just handed by a restore).

use crate::types::{Category, EventDraft, MealSession, Money, TempId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Partial update of a category; `None` leaves the field untouched
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// New name
    pub name: Option<String>,
    /// New price
    pub price: Option<Money>,
    /// New capacity
    pub max_capacity: Option<i64>,
    /// New description
    pub description: Option<String>,
}

/// Partial update of a meal session
///
/// Times use a nested `Option` so a patch can clear a time
/// (`Some(None)`) as well as leave it alone (`None`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSessionPatch {
    /// New name
    pub name: Option<String>,
    /// New begin time
    pub begin_time: Option<Option<DateTime<Utc>>>,
    /// New end time
    pub end_time: Option<Option<DateTime<Utc>>>,
    /// New description
    pub description: Option<String>,
}

/// A single change to the draft
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEdit {
    /// Set the event name
    SetName(String),
    /// Set the venue name
    SetVenue(String),
    /// Set the address
    SetAddress(String),
    /// Set the description
    SetDescription(String),
    /// Set or clear the start date
    SetDate(Option<DateTime<Utc>>),
    /// Set or clear the end date
    SetEndDate(Option<DateTime<Utc>>),
    /// Set or clear the registration deadline
    SetRegistrationDeadline(Option<DateTime<Utc>>),
    /// Set or clear the payment deadline
    SetPaymentDeadline(Option<DateTime<Utc>>),
    /// Set or clear the full-payment deadline
    SetFullPaymentDeadline(Option<DateTime<Utc>>),
    /// Set the event capacity (`0` = unconstrained)
    SetMaxCapacity(u32),
    /// Toggle mandatory payment
    SetPaymentRequired(bool),
    /// Toggle deposits
    SetDepositAllowed(bool),
    /// Set the deposit percentage
    SetDepositPercentage(i32),
    /// Select or clear the badge template
    SetBadgeTemplate(Option<String>),
    /// Append a category
    AddCategory(Category),
    /// Patch an existing category
    UpdateCategory {
        /// Category to patch
        id: TempId,
        /// Fields to change
        patch: CategoryPatch,
    },
    /// Remove a category
    RemoveCategory(TempId),
    /// Append a meal session
    AddMealSession(MealSession),
    /// Patch an existing meal session
    UpdateMealSession {
        /// Session to patch
        id: TempId,
        /// Fields to change
        patch: MealSessionPatch,
    },
    /// Remove a meal session
    RemoveMealSession(TempId),
    /// Add an organizer (ignored if already assigned)
    AssignOrganizer(UserId),
    /// Remove an organizer
    UnassignOrganizer(UserId),
}

/// Assigns `value` to `slot`, reporting whether it differed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl CategoryPatch {
    fn apply_to(self, category: &mut Category) -> bool {
        let mut changed = false;
        if let Some(name) = self.name {
            changed |= replace(&mut category.name, name);
        }
        if let Some(price) = self.price {
            changed |= replace(&mut category.price, price);
        }
        if let Some(max_capacity) = self.max_capacity {
            changed |= replace(&mut category.max_capacity, max_capacity);
        }
        if let Some(description) = self.description {
            changed |= replace(&mut category.description, description);
        }
        changed
    }
}

impl MealSessionPatch {
    fn apply_to(self, session: &mut MealSession) -> bool {
        let mut changed = false;
        if let Some(name) = self.name {
            changed |= replace(&mut session.name, name);
        }
        if let Some(begin_time) = self.begin_time {
            changed |= replace(&mut session.begin_time, begin_time);
        }
        if let Some(end_time) = self.end_time {
            changed |= replace(&mut session.end_time, end_time);
        }
        if let Some(description) = self.description {
            changed |= replace(&mut session.description, description);
        }
        changed
    }
}

impl EventDraft {
    /// Applies an edit, returning true if the draft actually changed
    ///
    /// Updates and removals addressed to an unknown id are no-ops.
    pub fn apply(&mut self, edit: DraftEdit) -> bool {
        match edit {
            DraftEdit::SetName(value) => replace(&mut self.name, value),
            DraftEdit::SetVenue(value) => replace(&mut self.venue, value),
            DraftEdit::SetAddress(value) => replace(&mut self.address, value),
            DraftEdit::SetDescription(value) => replace(&mut self.description, value),
            DraftEdit::SetDate(value) => replace(&mut self.date, value),
            DraftEdit::SetEndDate(value) => replace(&mut self.end_date, value),
            DraftEdit::SetRegistrationDeadline(value) => {
                replace(&mut self.registration_deadline, value)
            },
            DraftEdit::SetPaymentDeadline(value) => replace(&mut self.payment_deadline, value),
            DraftEdit::SetFullPaymentDeadline(value) => {
                replace(&mut self.full_payment_deadline, value)
            },
            DraftEdit::SetMaxCapacity(value) => replace(&mut self.max_capacity, value),
            DraftEdit::SetPaymentRequired(value) => replace(&mut self.payment_required, value),
            DraftEdit::SetDepositAllowed(value) => replace(&mut self.deposit_allowed, value),
            DraftEdit::SetDepositPercentage(value) => {
                replace(&mut self.deposit_percentage, value)
            },
            DraftEdit::SetBadgeTemplate(value) => replace(&mut self.badge_template_id, value),
            DraftEdit::AddCategory(category) => {
                self.categories.push(category);
                true
            },
            DraftEdit::UpdateCategory { id, patch } => self
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .is_some_and(|category| patch.apply_to(category)),
            DraftEdit::RemoveCategory(id) => {
                let before = self.categories.len();
                self.categories.retain(|c| c.id != id);
                self.categories.len() != before
            },
            DraftEdit::AddMealSession(session) => {
                self.meal_sessions.push(session);
                true
            },
            DraftEdit::UpdateMealSession { id, patch } => self
                .meal_sessions
                .iter_mut()
                .find(|s| s.id == id)
                .is_some_and(|session| patch.apply_to(session)),
            DraftEdit::RemoveMealSession(id) => {
                let before = self.meal_sessions.len();
                self.meal_sessions.retain(|s| s.id != id);
                self.meal_sessions.len() != before
            },
            DraftEdit::AssignOrganizer(user) => {
                if self.assigned_organizers.contains(&user) {
                    false
                } else {
                    self.assigned_organizers.push(user);
                    true
                }
            },
            DraftEdit::UnassignOrganizer(user) => {
                let before = self.assigned_organizers.len();
                self.assigned_organizers.retain(|u| *u != user);
                self.assigned_organizers.len() != before
            },
        }
    }
}
