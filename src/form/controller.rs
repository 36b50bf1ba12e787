use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{debug, warn};

use super::answers::{AnswerState, ErrorState};
use super::schema::{
    CompiledField, FieldSpec, FormSchema, SchemaError, compile_schema, parse_json_schema,
};
use super::validation::validate_field;
use super::view::SubmitButton;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type BoxedSubmitFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// Asynchronous capability the engine hands validated answers to.
///
/// The engine awaits the returned future but never inspects its success
/// value; a failure is handed back to whoever called [`FormEngine::submit`].
pub trait SubmitHandler: Send + Sync + 'static {
    fn submit(&self, answers: AnswerState) -> BoxedSubmitFuture;
}

impl<F, Fut> SubmitHandler for F
where
    F: Fn(AnswerState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn submit(&self, answers: AnswerState) -> BoxedSubmitFuture {
        Box::pin((self)(answers))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
}

/// What happens to a submit intent that arrives while a submit is in flight.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReentrantSubmit {
    #[default]
    Ignore,
    Reject,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    Invalid,
    Ignored,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub submit_button: SubmitButton,
    pub submitting_text: String,
    pub reentrant_submit: ReentrantSubmit,
    pub clear_on_success: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            submit_button: SubmitButton::default(),
            submitting_text: "Submitting...".to_owned(),
            reentrant_submit: ReentrantSubmit::Ignore,
            clear_on_success: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormSnapshot {
    pub answers: AnswerState,
    pub errors: ErrorState,
    pub status: SubmissionStatus,
    pub submit_count: u32,
    /// Whether the current answers would pass validation, whether or not a
    /// validation pass has run. `errors` only reflects the last pass.
    pub is_valid: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FormError {
    #[error("form state lock poisoned while {0}")]
    StatePoisoned(&'static str),
}

pub type FormResult<T> = Result<T, FormError>;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form submit is already in progress")]
    AlreadySubmitting,
    #[error("submit handler failed: {0}")]
    Handler(#[source] BoxError),
    #[error(transparent)]
    Form(#[from] FormError),
}

pub(super) struct EngineState {
    pub(super) answers: AnswerState,
    pub(super) errors: ErrorState,
    pub(super) status: SubmissionStatus,
    pub(super) submit_count: u32,
    pub(super) first_error: Option<String>,
}

/// Form block engine: schema, answers, errors and submission status for one
/// block instance.
///
/// Cloning yields another handle onto the same instance, which is how the
/// rendering layer keeps reading state while a submit future is pending.
#[derive(Clone)]
pub struct FormEngine {
    pub(super) options: Arc<FormOptions>,
    pub(super) fields: Arc<[CompiledField]>,
    pub(super) handler: Arc<dyn SubmitHandler>,
    pub(super) state: Arc<RwLock<EngineState>>,
}

impl FormEngine {
    pub fn new(fields: Vec<FieldSpec>, handler: impl SubmitHandler) -> Result<Self, SchemaError> {
        Self::with_options(fields, handler, FormOptions::default())
    }

    pub fn with_options(
        fields: Vec<FieldSpec>,
        handler: impl SubmitHandler,
        options: FormOptions,
    ) -> Result<Self, SchemaError> {
        let fields = compile_schema(fields)?;
        debug!(fields = fields.len(), "form engine created");
        Ok(Self {
            options: Arc::new(options),
            fields: fields.into(),
            handler: Arc::new(handler),
            state: Arc::new(RwLock::new(EngineState {
                answers: AnswerState::new(),
                errors: ErrorState::new(),
                status: SubmissionStatus::Idle,
                submit_count: 0,
                first_error: None,
            })),
        })
    }

    /// Builds an engine from the JSON field array stored in a block config.
    pub fn from_json(json: &str, handler: impl SubmitHandler) -> Result<Self, SchemaError> {
        Self::new(parse_json_schema(json)?, handler)
    }

    pub fn for_schema<S>(handler: impl SubmitHandler) -> Result<Self, SchemaError>
    where
        S: FormSchema,
    {
        Self::new(S::schema(), handler)
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().map(|field| &field.spec)
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.compiled_field(id).map(|field| &field.spec)
    }

    pub(super) fn compiled_field(&self, id: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|field| field.id() == id)
    }

    pub fn answers(&self) -> FormResult<AnswerState> {
        Ok(read_lock(&self.state, "reading answers")?.answers.clone())
    }

    pub fn errors(&self) -> FormResult<ErrorState> {
        Ok(read_lock(&self.state, "reading errors")?.errors.clone())
    }

    /// Current message for one field; empty when it has none.
    pub fn error(&self, field_id: &str) -> FormResult<String> {
        Ok(read_lock(&self.state, "reading field error")?
            .errors
            .get(field_id)
            .cloned()
            .unwrap_or_default())
    }

    pub fn first_error(&self) -> FormResult<Option<String>> {
        Ok(read_lock(&self.state, "reading first error")?
            .first_error
            .clone())
    }

    pub fn status(&self) -> FormResult<SubmissionStatus> {
        Ok(read_lock(&self.state, "reading submission status")?.status)
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(self.status()? == SubmissionStatus::Submitting)
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        Ok(FormSnapshot {
            answers: state.answers.clone(),
            errors: state.errors.clone(),
            status: state.status,
            submit_count: state.submit_count,
            is_valid: self
                .fields
                .iter()
                .all(|field| validate_field(field, state.answers.get(field.id())).is_none()),
        })
    }

    pub fn clear_answers(&self) -> FormResult<()> {
        write_lock(&self.state, "clearing answers")?.answers.clear();
        Ok(())
    }

    pub fn clear_errors(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "clearing errors")?;
        state.errors.clear();
        state.first_error = None;
        Ok(())
    }

    /// Drops answers and errors. An in-flight submit keeps its status.
    pub fn reset(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.answers.clear();
        state.errors.clear();
        state.first_error = None;
        Ok(())
    }

    /// Validates, then hands the answers to the submit handler.
    ///
    /// The caller must already have suppressed the rendering layer's default
    /// form submission. The status is back to [`SubmissionStatus::Idle`] once
    /// this future completes, fails, unwinds or is dropped.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        if self.is_submitting()? {
            return self.reentrant_outcome();
        }

        if !self.validate()? {
            debug!("submit blocked by validation errors");
            return Ok(SubmitOutcome::Invalid);
        }

        let submitted = {
            let mut state = write_lock(&self.state, "moving status to submitting")?;
            if state.status == SubmissionStatus::Submitting {
                drop(state);
                return self.reentrant_outcome();
            }
            state.status = SubmissionStatus::Submitting;
            state.submit_count = state.submit_count.saturating_add(1);
            state.answers.clone()
        };
        let guard = SubmittingGuard {
            state: self.state.clone(),
        };

        debug!(answers = submitted.len(), "invoking submit handler");
        let result = self.handler.submit(submitted.clone()).await;
        if result.is_ok() && self.options.clear_on_success {
            self.clear_submitted(&submitted)?;
        }
        drop(guard);

        match result {
            Ok(()) => Ok(SubmitOutcome::Submitted),
            Err(error) => {
                warn!(%error, "submit handler failed");
                Err(SubmitError::Handler(error))
            }
        }
    }

    /// Drops the answers that went out with a successful submit. Edits made
    /// while the handler ran are kept, along with their (cleared) errors.
    fn clear_submitted(&self, submitted: &AnswerState) -> FormResult<()> {
        let mut guard = write_lock(&self.state, "clearing submitted answers")?;
        let state = &mut *guard;
        state
            .answers
            .retain(|id, value| submitted.get(id) != Some(value));
        let answers = &state.answers;
        state.errors.retain(|id, _| answers.contains_key(id));
        state.first_error = None;
        Ok(())
    }

    fn reentrant_outcome(&self) -> Result<SubmitOutcome, SubmitError> {
        match self.options.reentrant_submit {
            ReentrantSubmit::Ignore => {
                debug!("ignoring submit while another submit is in flight");
                Ok(SubmitOutcome::Ignored)
            }
            ReentrantSubmit::Reject => Err(SubmitError::AlreadySubmitting),
        }
    }
}

/// Puts the status back to idle when the in-flight submit ends, however it
/// ends.
struct SubmittingGuard {
    state: Arc<RwLock<EngineState>>,
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.status = SubmissionStatus::Idle;
        debug!("submission status back to idle");
    }
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
