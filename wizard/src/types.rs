//! Domain types for the event-creation wizard.
//!
//! The central type is [`EventDraft`], the compound object under
//! construction. It is allowed to be partially invalid at any time; the
//! validators in [`crate::validation`] decide which subset must hold before a
//! step can be left.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Client-side temporary identifier for a category or meal session
///
/// Temporary ids only exist while the event is a draft; they are stripped
/// before the event is sent to the event-creation service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempId(String);

impl TempId {
    /// Prefix every generated temporary id carries
    pub const PREFIX: &'static str = "temp-";

    /// Generates a fresh temporary id
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::new_v4()))
    }

    /// Wraps an existing id string
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this id was generated on the client
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(Self::PREFIX)
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a user account (organizer candidate)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `UserId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of a created event
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wraps an id returned by the event-creation service
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Value types
// ============================================================================

/// Monetary amount in cents
///
/// Signed on purpose: the form accepts whatever the user typed and the
/// capacity validator rejects negative prices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount (free category)
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is below zero
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// ============================================================================
// Draft entities
// ============================================================================

/// A ticket category of the event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Temporary client id
    pub id: TempId,
    /// Display name
    pub name: String,
    /// Ticket price
    pub price: Money,
    /// Seats in this category; must be positive
    pub max_capacity: i64,
    /// Free-form description
    pub description: String,
}

impl Category {
    /// Creates a category with a fresh temporary id
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money, max_capacity: i64) -> Self {
        Self {
            id: TempId::generate(),
            name: name.into(),
            price,
            max_capacity,
            description: String::new(),
        }
    }
}

/// A meal session offered during the event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSession {
    /// Temporary client id
    pub id: TempId,
    /// Display name (e.g. "Lunch")
    pub name: String,
    /// Start of the session
    pub begin_time: Option<DateTime<Utc>>,
    /// End of the session
    pub end_time: Option<DateTime<Utc>>,
    /// Free-form description
    pub description: String,
}

impl MealSession {
    /// Creates a session with a fresh temporary id
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        begin_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: TempId::generate(),
            name: name.into(),
            begin_time,
            end_time,
            description: String::new(),
        }
    }

    /// Both endpoints, if the session is complete
    #[must_use]
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.begin_time.zip(self.end_time)
    }

    /// A session is complete only when both times are set
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.begin_time.is_some() && self.end_time.is_some()
    }
}

/// The event under construction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    /// Event name (required by step 1)
    pub name: String,
    /// Venue name (required by step 1)
    pub venue: String,
    /// Street address
    pub address: String,
    /// Free-form description
    pub description: String,
    /// Event start
    pub date: Option<DateTime<Utc>>,
    /// Event end; `date` is used when absent
    pub end_date: Option<DateTime<Utc>>,
    /// Last moment to register
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Initial payment (or deposit) deadline
    pub payment_deadline: Option<DateTime<Utc>>,
    /// Deadline for the remaining balance when deposits are allowed
    pub full_payment_deadline: Option<DateTime<Utc>>,
    /// Event capacity; `0` means unconstrained
    pub max_capacity: u32,
    /// Whether attendees must pay
    pub payment_required: bool,
    /// Whether a deposit may be paid first
    pub deposit_allowed: bool,
    /// Deposit share in percent, meaningful only with `deposit_allowed`
    pub deposit_percentage: i32,
    /// Ticket categories, in display order
    pub categories: Vec<Category>,
    /// Meal sessions, in display order
    pub meal_sessions: Vec<MealSession>,
    /// Users to be made event managers after creation
    pub assigned_organizers: Vec<UserId>,
    /// Selected badge template
    pub badge_template_id: Option<String>,
}

impl EventDraft {
    /// Creates an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective end of the event
    #[must_use]
    pub fn effective_end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date.or(self.date)
    }

    /// True once any field that makes a draft worth keeping is filled in
    ///
    /// Auto-save only kicks in for drafts with seed content, so an untouched
    /// form never creates a persisted draft.
    #[must_use]
    pub fn has_seed_content(&self) -> bool {
        [&self.name, &self.description, &self.venue]
            .iter()
            .any(|field| !field.trim().is_empty())
    }

    /// Sum of all category capacities
    #[must_use]
    pub fn total_category_capacity(&self) -> i64 {
        self.categories
            .iter()
            .fold(0_i64, |sum, c| sum.saturating_add(c.max_capacity))
    }

    /// Looks up a category by id
    #[must_use]
    pub fn category(&self, id: &TempId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Looks up a meal session by id
    #[must_use]
    pub fn meal_session(&self, id: &TempId) -> Option<&MealSession> {
        self.meal_sessions.iter().find(|s| &s.id == id)
    }
}

// ============================================================================
// Wizard steps
// ============================================================================

/// One of the six ordered sections of the wizard
///
/// Serialized as its 1-based position so a persisted checkpoint reads
/// `"currentStep": 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// Name, venue, dates
    #[default]
    EventDetails,
    /// Ticket categories and capacity
    Categories,
    /// Meal sessions
    MealSessions,
    /// Payment and deposit policy
    PaymentSettings,
    /// Badge template selection
    BadgeTemplate,
    /// Organizer assignment
    Organizers,
}

impl WizardStep {
    /// Every step, in wizard order
    pub const ALL: [Self; 6] = [
        Self::EventDetails,
        Self::Categories,
        Self::MealSessions,
        Self::PaymentSettings,
        Self::BadgeTemplate,
        Self::Organizers,
    ];

    /// First step
    pub const FIRST: Self = Self::EventDetails;

    /// Last step
    pub const LAST: Self = Self::Organizers;

    /// Zero-based position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-based step number as shown in the sidebar
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Step for a one-based number
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        usize::from(number)
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Following step, clamped to the last one
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(Self::LAST)
    }

    /// Preceding step, clamped to the first one
    #[must_use]
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(Self::FIRST)
    }

    /// Sidebar title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::EventDetails => "Event Details",
            Self::Categories => "Categories",
            Self::MealSessions => "Meal Sessions",
            Self::PaymentSettings => "Payment Settings",
            Self::BadgeTemplate => "Badge Template",
            Self::Organizers => "Organizers",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("no wizard step numbered {number}"))
    }
}

// ============================================================================
// Persisted checkpoint
// ============================================================================

/// The persisted draft checkpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    /// Draft contents at checkpoint time
    pub draft_data: EventDraft,
    /// Step the wizard was on
    pub current_step: WizardStep,
    /// When the store accepted the checkpoint
    pub last_saved_at: DateTime<Utc>,
}
