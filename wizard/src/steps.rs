//! Per-step validation.
//!
//! Each wizard step consults only the rules for the fields it shows. The same
//! [`StepValidator::validate`] call backs both the live "is Next disabled"
//! test and the check performed when Next is pressed, so the two can never
//! disagree.

use crate::types::{EventDraft, WizardStep};
use crate::validation::{
    find_overlap, validate_capacity, validate_date_range, validate_payment, validate_schedule,
    CalendarZone, Field, ValidationError, ValidationErrors,
};

/// Dispatches a draft to the validators of one step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepValidator {
    zone: CalendarZone,
}

impl StepValidator {
    /// Validator grouping meal sessions by calendar day in `zone`
    #[must_use]
    pub const fn new(zone: CalendarZone) -> Self {
        Self { zone }
    }

    /// Zone used for calendar-day computations
    #[must_use]
    pub const fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// Errors for the fields of `step`; empty means the step may be left
    #[must_use]
    pub fn validate(&self, step: WizardStep, draft: &EventDraft) -> ValidationErrors {
        match step {
            WizardStep::EventDetails => event_details(draft),
            WizardStep::Categories => validate_capacity(draft),
            WizardStep::MealSessions => self.meal_sessions(draft),
            WizardStep::PaymentSettings => validate_payment(draft),
            WizardStep::BadgeTemplate => badge_template(draft),
            WizardStep::Organizers => ValidationErrors::new(),
        }
    }

    /// Live check behind the UI's Next button
    #[must_use]
    pub fn is_next_disabled(&self, step: WizardStep, draft: &EventDraft) -> bool {
        !self.validate(step, draft).is_empty()
    }

    /// Re-validates every step in order, returning the first one that fails
    #[must_use]
    pub fn validate_all(&self, draft: &EventDraft) -> Option<(WizardStep, ValidationErrors)> {
        WizardStep::ALL.into_iter().find_map(|step| {
            let errors = self.validate(step, draft);
            (!errors.is_empty()).then_some((step, errors))
        })
    }

    fn meal_sessions(&self, draft: &EventDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let sessions = &draft.meal_sessions;

        if let Some(index) = sessions
            .iter()
            .position(|s| !s.name.trim().is_empty() && !s.is_complete())
        {
            errors.add(
                Field::MealSessions,
                ValidationError::IncompleteSession { index: index + 1 },
            );
        }

        if let Some(index) = sessions
            .iter()
            .position(|s| s.interval().is_some_and(|(begin, end)| begin >= end))
        {
            errors.add(
                Field::MealSessionTimeRange,
                ValidationError::InvalidSessionTimeRange { index: index + 1 },
            );
        }

        if let Some((first, second)) = find_overlap(sessions, &self.zone) {
            errors.add(
                Field::MealSessionOverlap,
                ValidationError::SessionOverlap {
                    first: first + 1,
                    second: second + 1,
                },
            );
        }

        // No start date means there is no span to check against yet
        if let Some(start) = draft.date {
            let violations = validate_date_range(sessions, start, draft.end_date, &self.zone);
            if !violations.is_empty() {
                errors.add(
                    Field::MealSessionRange,
                    ValidationError::SessionOutOfRange { violations },
                );
            }
        }

        errors
    }
}

fn required(errors: &mut ValidationErrors, field: Field, label: &str, present: bool) {
    if !present {
        errors.add(
            field,
            ValidationError::Required {
                label: label.to_string(),
            },
        );
    }
}

fn event_details(draft: &EventDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    required(&mut errors, Field::Name, "Event name", !draft.name.trim().is_empty());
    required(&mut errors, Field::Date, "Event date", draft.date.is_some());
    required(&mut errors, Field::Venue, "Venue", !draft.venue.trim().is_empty());
    errors.merge(validate_schedule(draft));
    errors
}

fn badge_template(draft: &EventDraft) -> ValidationErrors {
    let selected = draft
        .badge_template_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());

    let mut errors = ValidationErrors::new();
    if !selected {
        errors.add(Field::BadgeTemplate, ValidationError::MissingBadgeTemplate);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, MealSession, Money};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use chrono_tz::Europe::Berlin;

    fn validator() -> StepValidator {
        StepValidator::new(CalendarZone::utc())
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, hour, minute, 0)
            .single()
            .unwrap_or_default()
    }

    /// A draft that passes every step
    fn complete_draft() -> EventDraft {
        EventDraft {
            name: "Annual Meeting".to_string(),
            venue: "Grand Hall".to_string(),
            date: Some(at(9, 0)),
            registration_deadline: Some(at(9, 0) - Duration::days(3)),
            max_capacity: 100,
            categories: vec![Category::new("Member", Money::from_cents(5_000), 80)],
            meal_sessions: vec![MealSession::new("Lunch", Some(at(12, 0)), Some(at(13, 0)))],
            badge_template_id: Some("classic".to_string()),
            ..EventDraft::default()
        }
    }

    #[test]
    fn complete_draft_passes_every_step() {
        let validator = validator();
        assert_eq!(validator.validate_all(&complete_draft()), None);
        for step in WizardStep::ALL {
            assert!(!validator.is_next_disabled(step, &complete_draft()));
        }
    }

    #[test]
    fn event_details_requires_name_date_and_venue() {
        let errors = validator().validate(WizardStep::EventDetails, &EventDraft::new());
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Date));
        assert!(errors.contains(Field::Venue));
        assert_eq!(
            errors.messages().get("name").map(String::as_str),
            Some("Event name is required")
        );
    }

    #[test]
    fn event_details_ignores_other_steps_fields() {
        let mut draft = complete_draft();
        draft.categories.clear();
        draft.badge_template_id = None;
        assert!(validator()
            .validate(WizardStep::EventDetails, &draft)
            .is_empty());
    }

    #[test]
    fn overlapping_lunches_block_meal_step() {
        let mut draft = complete_draft();
        draft
            .meal_sessions
            .push(MealSession::new("Second lunch", Some(at(12, 30)), Some(at(13, 30))));

        let validator = validator();
        let errors = validator.validate(WizardStep::MealSessions, &draft);
        assert_eq!(
            errors.get(Field::MealSessionOverlap),
            Some(&ValidationError::SessionOverlap { first: 1, second: 2 })
        );
        assert!(validator.is_next_disabled(WizardStep::MealSessions, &draft));
    }

    #[test]
    fn back_to_back_lunches_pass_meal_step() {
        let mut draft = complete_draft();
        draft
            .meal_sessions
            .push(MealSession::new("Second lunch", Some(at(13, 0)), Some(at(13, 30))));
        assert!(!validator().is_next_disabled(WizardStep::MealSessions, &draft));
    }

    #[test]
    fn named_session_without_times_is_incomplete() {
        let mut draft = complete_draft();
        draft
            .meal_sessions
            .push(MealSession::new("Dinner", Some(at(19, 0)), None));
        draft.meal_sessions.push(MealSession::new("", None, None));

        let errors = validator().validate(WizardStep::MealSessions, &draft);
        assert_eq!(
            errors.get(Field::MealSessions),
            Some(&ValidationError::IncompleteSession { index: 2 })
        );
    }

    #[test]
    fn reversed_session_is_invalid_time_range() {
        let mut draft = complete_draft();
        draft.meal_sessions = vec![MealSession::new("Snack", Some(at(15, 0)), Some(at(15, 0)))];
        assert_eq!(
            validator()
                .validate(WizardStep::MealSessions, &draft)
                .get(Field::MealSessionTimeRange),
            Some(&ValidationError::InvalidSessionTimeRange { index: 1 })
        );
    }

    #[test]
    fn reversed_session_is_reported_beside_an_incomplete_one() {
        let mut draft = complete_draft();
        draft.meal_sessions = vec![
            MealSession::new("Dinner", Some(at(19, 0)), None),
            MealSession::new("Snack", Some(at(16, 0)), Some(at(15, 0))),
        ];

        let errors = validator().validate(WizardStep::MealSessions, &draft);
        assert_eq!(
            errors.get(Field::MealSessions),
            Some(&ValidationError::IncompleteSession { index: 1 })
        );
        assert_eq!(
            errors.get(Field::MealSessionTimeRange),
            Some(&ValidationError::InvalidSessionTimeRange { index: 2 })
        );
    }

    #[test]
    fn winter_sessions_pass_with_a_daylight_saving_zone() {
        let local = |d: u32, h: u32, m: u32| {
            Berlin
                .with_ymd_and_hms(2027, 1, d, h, m, 0)
                .single()
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_default()
        };
        let mut draft = complete_draft();
        draft.date = Some(local(10, 18, 0));
        draft.end_date = Some(local(11, 18, 0));
        draft.registration_deadline = Some(local(3, 18, 0));
        draft.meal_sessions = vec![
            MealSession::new("Late supper", Some(local(10, 23, 30)), Some(local(11, 0, 30))),
            MealSession::new("Breakfast", Some(local(11, 0, 10)), Some(local(11, 0, 40))),
        ];

        let validator = StepValidator::new(CalendarZone::Named(Berlin));
        assert!(validator
            .validate(WizardStep::MealSessions, &draft)
            .is_empty());
        assert!(!validator.is_next_disabled(WizardStep::MealSessions, &draft));
    }

    #[test]
    fn session_before_event_is_out_of_range() {
        let mut draft = complete_draft();
        draft.meal_sessions = vec![MealSession::new("Breakfast", Some(at(7, 0)), Some(at(8, 0)))];
        assert!(validator()
            .validate(WizardStep::MealSessions, &draft)
            .contains(Field::MealSessionRange));
    }

    #[test]
    fn range_check_waits_for_a_start_date() {
        let mut draft = complete_draft();
        draft.date = None;
        draft.meal_sessions = vec![MealSession::new("Breakfast", Some(at(7, 0)), Some(at(8, 0)))];
        assert!(validator()
            .validate(WizardStep::MealSessions, &draft)
            .is_empty());
    }

    #[test]
    fn badge_template_must_be_selected() {
        let mut draft = complete_draft();
        draft.badge_template_id = Some(" ".to_string());
        assert_eq!(
            validator()
                .validate(WizardStep::BadgeTemplate, &draft)
                .get(Field::BadgeTemplate),
            Some(&ValidationError::MissingBadgeTemplate)
        );
    }

    #[test]
    fn organizers_step_has_no_requirements() {
        assert!(validator()
            .validate(WizardStep::Organizers, &EventDraft::new())
            .is_empty());
    }

    #[test]
    fn validate_all_returns_first_failing_step() {
        let mut draft = complete_draft();
        draft.payment_required = true;
        draft.badge_template_id = None;

        let (step, errors) = validator()
            .validate_all(&draft)
            .unwrap_or((WizardStep::FIRST, ValidationErrors::new()));
        assert_eq!(step, WizardStep::PaymentSettings);
        assert_eq!(
            errors.get(Field::PaymentDeadline),
            Some(&ValidationError::MissingPaymentDeadline)
        );
    }
}
