//! Payloads exchanged with the event service at submission time.

use crate::error::WizardError;
use crate::types::{EventDraft, EventId, Money, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category as sent to the server (no client id)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Name
    pub name: String,
    /// Price
    pub price: Money,
    /// Seats
    pub max_capacity: i64,
    /// Description
    pub description: String,
}

/// Meal session as sent to the server (no client id)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSessionInput {
    /// Name
    pub name: String,
    /// Start
    pub begin_time: DateTime<Utc>,
    /// End
    pub end_time: DateTime<Utc>,
    /// Description
    pub description: String,
}

/// Create-event request built from a fully validated draft
///
/// Organizers are not part of the request: they are assigned one by one
/// once the event exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// Event name
    pub name: String,
    /// Venue
    pub venue: String,
    /// Address
    pub address: String,
    /// Description
    pub description: String,
    /// Start
    pub date: Option<DateTime<Utc>>,
    /// End, defaulted to the start
    pub end_date: Option<DateTime<Utc>>,
    /// Registration deadline
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Capacity (`0` = unbounded)
    pub max_capacity: u32,
    /// Payment required
    pub payment_required: bool,
    /// Payment deadline, only when payment is required
    pub payment_deadline: Option<DateTime<Utc>>,
    /// Deposits allowed
    pub deposit_allowed: bool,
    /// Deposit percentage, only when deposits apply
    pub deposit_percentage: Option<i32>,
    /// Full-payment deadline, only when deposits apply
    pub full_payment_deadline: Option<DateTime<Utc>>,
    /// Categories
    pub categories: Vec<CategoryInput>,
    /// Complete meal sessions
    pub meal_sessions: Vec<MealSessionInput>,
    /// Badge template
    pub badge_template_id: Option<String>,
}

impl From<&EventDraft> for EventInput {
    fn from(draft: &EventDraft) -> Self {
        let payment_required = draft.payment_required;
        let deposits = payment_required && draft.deposit_allowed;

        Self {
            name: draft.name.trim().to_string(),
            venue: draft.venue.trim().to_string(),
            address: draft.address.clone(),
            description: draft.description.clone(),
            date: draft.date,
            end_date: draft.effective_end_date(),
            registration_deadline: draft.registration_deadline,
            max_capacity: draft.max_capacity,
            payment_required,
            payment_deadline: draft.payment_deadline.filter(|_| payment_required),
            deposit_allowed: deposits,
            deposit_percentage: deposits.then_some(draft.deposit_percentage),
            full_payment_deadline: draft.full_payment_deadline.filter(|_| deposits),
            categories: draft
                .categories
                .iter()
                .map(|c| CategoryInput {
                    name: c.name.trim().to_string(),
                    price: c.price,
                    max_capacity: c.max_capacity,
                    description: c.description.clone(),
                })
                .collect(),
            meal_sessions: draft
                .meal_sessions
                .iter()
                .filter_map(|s| {
                    s.interval().map(|(begin_time, end_time)| MealSessionInput {
                        name: s.name.trim().to_string(),
                        begin_time,
                        end_time,
                        description: s.description.clone(),
                    })
                })
                .collect(),
            badge_template_id: draft.badge_template_id.clone(),
        }
    }
}

/// Server's answer to a create-event request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    /// Server-assigned id
    pub id: EventId,
    /// Name as stored
    pub name: String,
}

/// Outcome of assigning each organizer to a new event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReport {
    /// Organizers now managing the event
    pub assigned: Vec<UserId>,
    /// Organizers that could not be assigned, with the reason
    pub failed: Vec<(UserId, String)>,
}

impl AssignmentReport {
    /// Number of assignments attempted
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.assigned.len() + self.failed.len()
    }

    /// True if every assignment succeeded (vacuously so for none)
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// The single warning shown to the user, if any assignment failed
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let summary = WizardError::PartialAssignment {
            failed: self.failed.len(),
            attempted: self.attempted(),
        };
        let details = self
            .failed
            .iter()
            .map(|(user, reason)| format!("{user}: {reason}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!("{summary} ({details})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, MealSession};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn input_defaults_end_date_and_drops_inapplicable_deposit() {
        let draft = EventDraft {
            name: "  Gala ".to_string(),
            date: Some(start()),
            payment_required: true,
            payment_deadline: Some(start() - Duration::days(5)),
            deposit_allowed: false,
            deposit_percentage: 40,
            full_payment_deadline: Some(start() - Duration::days(1)),
            ..EventDraft::default()
        };

        let input = EventInput::from(&draft);
        assert_eq!(input.name, "Gala");
        assert_eq!(input.end_date, Some(start()));
        assert_eq!(input.payment_deadline, draft.payment_deadline);
        assert_eq!(input.deposit_percentage, None);
        assert_eq!(input.full_payment_deadline, None);
    }

    #[test]
    fn input_drops_payment_fields_when_not_required() {
        let draft = EventDraft {
            payment_deadline: Some(start()),
            deposit_allowed: true,
            deposit_percentage: 20,
            ..EventDraft::default()
        };
        let input = EventInput::from(&draft);
        assert_eq!(input.payment_deadline, None);
        assert!(!input.deposit_allowed);
        assert_eq!(input.deposit_percentage, None);
    }

    #[test]
    fn input_strips_client_ids_and_blank_sessions() {
        let draft = EventDraft {
            categories: vec![Category::new("VIP", Money::from_cents(10_000), 10)],
            meal_sessions: vec![
                MealSession::new("Dinner", Some(start()), Some(start() + Duration::hours(2))),
                MealSession::new("", None, None),
            ],
            ..EventDraft::default()
        };
        let input = EventInput::from(&draft);
        let json = serde_json::to_string(&input).unwrap_or_default();
        assert!(!json.contains("temp-"));
        assert_eq!(input.meal_sessions.len(), 1);
        assert_eq!(input.categories[0].name, "VIP");
    }

    #[test]
    fn report_warning_summarises_failures() {
        let ok = UserId::new();
        let bad = UserId::new();
        let report = AssignmentReport {
            assigned: vec![ok],
            failed: vec![(bad, "user not found".to_string())],
        };
        let warning = report.warning().unwrap_or_default();
        assert!(warning.starts_with("Event created, but 1 of 2 organizers could not be assigned"));
        assert!(warning.contains(&bad.to_string()));
        assert_eq!(AssignmentReport::default().warning(), None);
    }
}
