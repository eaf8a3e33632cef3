//! Wizard environment.
//!
//! Holds every external dependency the reducer's effects need.

use crate::config::{ConfigError, WizardConfig};
use crate::providers::{DraftStore, EventService, OrganizerService};
use crate::steps::StepValidator;
use std::sync::Arc;

/// Dependencies injected into the wizard reducer.
#[derive(Clone)]
pub struct WizardEnvironment {
    /// Draft persistence
    pub drafts: Arc<dyn DraftStore>,
    /// Event creation
    pub events: Arc<dyn EventService>,
    /// Organizer assignment
    pub organizers: Arc<dyn OrganizerService>,
    /// Session configuration
    pub config: WizardConfig,
    /// Step validator for the configured calendar zone
    pub validator: StepValidator,
}

impl WizardEnvironment {
    /// Create an environment, checking the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(
        drafts: Arc<dyn DraftStore>,
        events: Arc<dyn EventService>,
        organizers: Arc<dyn OrganizerService>,
        config: WizardConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let validator = StepValidator::new(config.zone()?);
        Ok(Self {
            drafts,
            events,
            organizers,
            config,
            validator,
        })
    }
}

impl std::fmt::Debug for WizardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardEnvironment")
            .field("config", &self.config)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
