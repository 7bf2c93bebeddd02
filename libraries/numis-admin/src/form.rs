//! Coin form state manager
//!
//! [`CoinForm`] owns one [`CoinDraft`] (new or loaded for edit) and drives the
//! submit workflow:
//!
//! ```text
//! Idle -> Validating -> Uploading -> Persisting -> Succeeded
//!              |            |             |
//!              v            v             v
//!             Idle        Failed        Failed (uploads rolled back)
//! ```
//!
//! There is no retry. After a failure the form accepts a fresh submit.

use crate::adapter::Adapter;
use crate::draft::{CoinDraft, DraftAction};
use crate::error::{DraftError, FormError, ValidationError};
use crate::guard::Route;
use crate::i18n::MessageKey;
use crate::preview::PreviewRegistry;
use crate::settings::SettingsContext;
use crate::toast::{Toast, ToastKind};
use crate::validate::{assemble_payload, validate};
use numis_core::types::{CoinId, CoinUpdate, ImageRef};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between a successful save and the navigation back to the dashboard
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CoinId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Uploading,
    Persisting,
    Succeeded,
    Failed,
}

/// Navigation the page should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

impl Redirect {
    pub fn to_dashboard(after: Duration) -> Self {
        Self {
            to: Route::Dashboard,
            after,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved { id: CoinId, redirect: Redirect },
    Invalid(ValidationError),
    Failed(FormError),
}

pub enum LoadOutcome {
    Loaded(Box<CoinForm>),
    NotFound { redirect: Redirect },
}

pub struct CoinForm {
    adapter: Adapter,
    settings: SettingsContext,
    mode: FormMode,
    draft: CoinDraft,
    /// Storage paths the record had when it was loaded
    original_paths: HashSet<String>,
    phase: SubmitPhase,
    loading: bool,
    error: Option<String>,
    toast: Option<Toast>,
}

impl CoinForm {
    /// Empty form for a new coin
    pub fn new(adapter: Adapter, settings: SettingsContext, previews: PreviewRegistry) -> Self {
        Self::with_draft(
            adapter,
            settings,
            FormMode::Create,
            CoinDraft::new(previews),
        )
    }

    /// Fetch a coin and open it for editing
    ///
    /// Any failure to fetch sends the user back to the dashboard.
    pub async fn load(
        adapter: Adapter,
        settings: SettingsContext,
        previews: PreviewRegistry,
        id: CoinId,
    ) -> LoadOutcome {
        match adapter.get_record(&id).await {
            Ok(coin) => {
                debug!(coin_id = %id, "Loaded coin for edit");
                let draft = CoinDraft::from_coin(&coin, previews);
                LoadOutcome::Loaded(Box::new(Self::with_draft(
                    adapter,
                    settings,
                    FormMode::Edit(id),
                    draft,
                )))
            }
            Err(e) => {
                warn!(coin_id = %id, error = %e, "Coin could not be loaded for edit");
                LoadOutcome::NotFound {
                    redirect: Redirect::to_dashboard(Duration::ZERO),
                }
            }
        }
    }

    fn with_draft(
        adapter: Adapter,
        settings: SettingsContext,
        mode: FormMode,
        draft: CoinDraft,
    ) -> Self {
        let original_paths = draft.existing().values().map(|i| i.path.clone()).collect();
        Self {
            adapter,
            settings,
            mode,
            draft,
            original_paths,
            phase: SubmitPhase::Idle,
            loading: false,
            error: None,
            toast: None,
        }
    }

    /// Apply an edit to the draft
    ///
    /// A refused edit sets the form error and leaves the draft unchanged.
    pub fn dispatch(&mut self, action: DraftAction) -> Result<(), DraftError> {
        self.draft.apply(action).map_err(|e| {
            self.error = Some(self.settings.message(e.message_key()).to_string());
            e
        })
    }

    /// Validate, upload staged images and persist the record
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.error = None;
        self.loading = true;
        self.phase = SubmitPhase::Validating;

        if let Err(invalid) = validate(&self.draft) {
            debug!(reason = %invalid, "Submit rejected by validation");
            self.error = Some(self.settings.message(invalid.message_key()).to_string());
            self.loading = false;
            self.phase = SubmitPhase::Idle;
            return SubmitOutcome::Invalid(invalid);
        }

        self.phase = SubmitPhase::Uploading;
        let uploaded = match self.upload_staged().await {
            Ok(uploaded) => uploaded,
            Err(()) => {
                let message = self.settings.message(MessageKey::UploadFailed).to_string();
                return self.fail(message, FormError::Upload);
            }
        };

        self.phase = SubmitPhase::Persisting;
        let payload = assemble_payload(&self.draft, uploaded.clone());

        let persisted = match &self.mode {
            FormMode::Create => self.adapter.create_record(payload).await,
            FormMode::Edit(id) => self
                .adapter
                .update_record(id, CoinUpdate::Full(payload))
                .await
                .map(|()| id.clone()),
        };

        match persisted {
            Ok(id) => {
                info!(coin_id = %id, mode = ?self.mode, "Coin saved");
                let key = match self.mode {
                    FormMode::Create => MessageKey::CreateSuccess,
                    FormMode::Edit(_) => MessageKey::EditSuccess,
                };
                self.toast = Some(Toast::new(self.settings.message(key), ToastKind::Success));
                self.phase = SubmitPhase::Succeeded;
                SubmitOutcome::Saved {
                    id,
                    redirect: Redirect::to_dashboard(REDIRECT_DELAY),
                }
            }
            Err(e) => {
                self.roll_back(&uploaded).await;
                let message = if e.message.trim().is_empty() {
                    self.settings.message(self.generic_error()).to_string()
                } else {
                    e.message
                };
                self.fail(message.clone(), FormError::Adapter(message))
            }
        }
    }

    /// Upload staged files one at a time, in order
    async fn upload_staged(&self) -> Result<Vec<ImageRef>, ()> {
        let mut uploaded = Vec::with_capacity(self.draft.staged().len());
        for staged in self.draft.staged().values() {
            match self.adapter.upload_file(staged.file()).await {
                Ok(image) => uploaded.push(image),
                Err(e) => {
                    warn!(file = %staged.file().name, error = %e, "Image upload failed");
                    return Err(());
                }
            }
        }
        Ok(uploaded)
    }

    /// Best-effort delete of images uploaded by a failed attempt
    async fn roll_back(&self, uploaded: &[ImageRef]) {
        for image in uploaded {
            if self.original_paths.contains(&image.path) {
                continue;
            }
            if let Err(e) = self.adapter.delete_file(&image.path).await {
                warn!(path = %image.path, error = %e, "Rollback delete failed");
            }
        }
    }

    fn fail(&mut self, message: String, error: FormError) -> SubmitOutcome {
        self.error = Some(message);
        self.loading = false;
        self.phase = SubmitPhase::Failed;
        SubmitOutcome::Failed(error)
    }

    fn generic_error(&self) -> MessageKey {
        match self.mode {
            FormMode::Create => MessageKey::CreateError,
            FormMode::Edit(_) => MessageKey::EditError,
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &CoinDraft {
        &self.draft
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// True from submit until failure, or until the redirect after success
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current inline error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }
}
