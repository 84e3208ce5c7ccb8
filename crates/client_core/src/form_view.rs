//! Create/edit form for a single catalog entry.
//!
//! The mode is resolved once from the route segment and never changes. Busy
//! phases (`Loading`, `Saving`, `Deleting`) refuse re-entry instead of cancelling
//! the request in flight, and so does `Success` while its redirect is pending.

use std::{collections::BTreeSet, sync::Arc, time::Duration};

use shared::{domain::VideoGameId, protocol::VideoGame};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{
    draft::GameDraft,
    navigation::{schedule_navigation, Confirm, Navigator, DELETE_CONFIRMATION_PROMPT},
    routes::Route,
    validation::{self, Field, ValidationReport},
    CatalogApi, CatalogError,
};

pub const LOAD_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(2_000);

pub const INVALID_ID_MESSAGE: &str = "Invalid game ID";
pub const LOAD_TIMEOUT_MESSAGE: &str =
    "Request timed out. Please check if the backend API is running.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load video game. It may have been deleted.";
pub const CREATE_SUCCESS_MESSAGE: &str = "Video game created successfully!";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Video game updated successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create video game. Please try again.";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update video game. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete video game. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: VideoGameId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormModeError {
    #[error("invalid game id '{0}'")]
    InvalidId(String),
}

/// Absent or `new` creates; a positive integer edits; anything else is rejected.
pub fn resolve_mode(segment: Option<&str>) -> Result<FormMode, FormModeError> {
    match segment {
        None | Some("new") => Ok(FormMode::Create),
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(FormMode::Edit {
                id: VideoGameId(id),
            }),
            _ => Err(FormModeError::InvalidId(raw.to_string())),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Loading,
    Saving,
    Deleting,
    /// Saved; redirect to the list is pending.
    Success,
    /// Route identifier was unusable. Terminal.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    TimedOut,
    Failed,
    /// Not in edit mode.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(VideoGame),
    Blocked(ValidationReport),
    Failed,
    Busy,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed,
    Busy,
    /// Create mode or an invalid route: there is nothing to delete.
    Unavailable,
}

pub struct FormView {
    mode: Option<FormMode>,
    phase: FormPhase,
    draft: GameDraft,
    touched: BTreeSet<Field>,
    error: Option<String>,
    success_message: Option<String>,
    navigator: Arc<dyn Navigator>,
    redirect: Option<JoinHandle<()>>,
}

impl FormView {
    pub fn open(segment: Option<&str>, navigator: Arc<dyn Navigator>) -> Self {
        let (mode, phase, error) = match resolve_mode(segment) {
            Ok(mode) => (Some(mode), FormPhase::Editing, None),
            Err(err) => {
                warn!(error = %err, "form: rejecting route identifier");
                (None, FormPhase::Invalid, Some(INVALID_ID_MESSAGE.to_string()))
            }
        };
        Self {
            mode,
            phase,
            draft: GameDraft::default(),
            touched: BTreeSet::new(),
            error,
            success_message: None,
            navigator,
            redirect: None,
        }
    }

    pub fn for_route(route: &Route, navigator: Arc<dyn Navigator>) -> Self {
        Self::open(route.form_segment(), navigator)
    }

    /// Fetches the record being edited, waiting at most [`LOAD_TIMEOUT`].
    pub async fn load(&mut self, api: &dyn CatalogApi) -> LoadOutcome {
        let Some(FormMode::Edit { id }) = self.mode else {
            return LoadOutcome::Skipped;
        };

        self.phase = FormPhase::Loading;
        self.error = None;

        let outcome = match tokio::time::timeout(LOAD_TIMEOUT, api.get(id)).await {
            Ok(Ok(game)) => {
                info!(id = id.0, "form: record loaded");
                self.draft.apply_game(&game);
                LoadOutcome::Loaded
            }
            Ok(Err(err)) => self.load_failed(id, err),
            Err(_) => self.load_failed(id, CatalogError::Timeout(LOAD_TIMEOUT)),
        };

        self.phase = FormPhase::Editing;
        outcome
    }

    fn load_failed(&mut self, id: VideoGameId, err: CatalogError) -> LoadOutcome {
        error!(id = id.0, error = %err, "form: failed to load video game");
        if err.is_timeout() {
            self.error = Some(LOAD_TIMEOUT_MESSAGE.to_string());
            LoadOutcome::TimedOut
        } else {
            self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            LoadOutcome::Failed
        }
    }

    pub async fn submit(&mut self, api: &dyn CatalogApi) -> SubmitOutcome {
        let Some(mode) = self.mode else {
            return SubmitOutcome::Unavailable;
        };
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }

        let report = validation::validate(&self.draft);
        if !report.is_valid() {
            self.mark_all_touched();
            return SubmitOutcome::Blocked(report);
        }

        self.phase = FormPhase::Saving;
        self.error = None;
        self.success_message = None;

        let (result, success_message, failure_message) = match mode {
            FormMode::Create => {
                let Some(request) = self.draft.create_request() else {
                    self.phase = FormPhase::Editing;
                    return SubmitOutcome::Blocked(report);
                };
                (
                    api.create(&request).await,
                    CREATE_SUCCESS_MESSAGE,
                    CREATE_FAILED_MESSAGE,
                )
            }
            FormMode::Edit { id } => {
                let Some(request) = self.draft.update_request(id) else {
                    self.phase = FormPhase::Editing;
                    return SubmitOutcome::Blocked(report);
                };
                (
                    api.update(id, &request).await,
                    UPDATE_SUCCESS_MESSAGE,
                    UPDATE_FAILED_MESSAGE,
                )
            }
        };

        match result {
            Ok(game) => {
                info!(id = game.id.0, "form: video game saved");
                self.success_message = Some(success_message.to_string());
                self.phase = FormPhase::Success;
                self.redirect = Some(schedule_navigation(
                    Arc::clone(&self.navigator),
                    Route::List,
                    SUCCESS_REDIRECT_DELAY,
                ));
                SubmitOutcome::Saved(game)
            }
            Err(err) => {
                error!(mode = ?mode, error = %err, "form: failed to save video game");
                self.error = Some(failure_message.to_string());
                self.phase = FormPhase::Editing;
                SubmitOutcome::Failed
            }
        }
    }

    /// Asks `confirm` first; a declined prompt sends nothing.
    pub async fn delete(&mut self, api: &dyn CatalogApi, confirm: &dyn Confirm) -> DeleteOutcome {
        let Some(FormMode::Edit { id }) = self.mode else {
            return DeleteOutcome::Unavailable;
        };
        if self.is_busy() {
            return DeleteOutcome::Busy;
        }
        if !confirm.confirm(DELETE_CONFIRMATION_PROMPT) {
            return DeleteOutcome::Declined;
        }

        self.phase = FormPhase::Deleting;
        self.error = None;

        match api.delete(id).await {
            Ok(()) => {
                info!(id = id.0, "form: video game deleted");
                self.navigator.navigate(Route::List);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(id = id.0, error = %err, "form: failed to delete video game");
                self.error = Some(DELETE_FAILED_MESSAGE.to_string());
                self.phase = FormPhase::Editing;
                DeleteOutcome::Failed
            }
        }
    }

    /// A saved form is also locked until its redirect lands.
    fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            FormPhase::Loading | FormPhase::Saving | FormPhase::Deleting | FormPhase::Success
        )
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.mode
    }

    pub fn game_id(&self) -> Option<VideoGameId> {
        match self.mode {
            Some(FormMode::Edit { id }) => Some(id),
            _ => None,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.game_id().is_some()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase == FormPhase::Loading
    }

    pub fn saving(&self) -> bool {
        self.phase == FormPhase::Saving
    }

    pub fn deleting(&self) -> bool {
        self.phase == FormPhase::Deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn draft(&self) -> &GameDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut GameDraft {
        &mut self.draft
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(Field::ALL);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_field_invalid(&self, field: Field) -> bool {
        self.is_touched(field) && !validation::validate_field(&self.draft, field).is_empty()
    }

    /// Current message for `field` whether or not it has been touched.
    pub fn field_error(&self, field: Field) -> Option<String> {
        validation::field_error(field, &validation::validate_field(&self.draft, field))
    }

    /// Errors to show inline: touched fields that currently fail validation.
    pub fn inline_errors(&self) -> Vec<(Field, String)> {
        Field::ALL
            .into_iter()
            .filter(|field| self.is_field_invalid(*field))
            .filter_map(|field| self.field_error(field).map(|msg| (field, msg)))
            .collect()
    }

    /// Hands the pending success redirect to the caller, if one was scheduled.
    pub fn take_redirect(&mut self) -> Option<JoinHandle<()>> {
        self.redirect.take()
    }
}

#[cfg(test)]
#[path = "tests/form_view_tests.rs"]
mod tests;
