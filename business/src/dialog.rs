//! Create-user dialog controller.
//!
//! Owns the form values, the inline errors, the `Idle`/`Submitting` phase and
//! the open/closed state of the modal. Rendering lives in the UI crate; this
//! type only reacts to events (blur, submit, cancel) and to the settled
//! result of the create-user call.
//!
//! ## Flow
//! 1. `submit()` validates every field. Any failure is stored in `errors()`
//!    and nothing is sent.
//! 2. A valid form is packed into a [`CreateUserPayload`] and handed to the
//!    [`UsersService`] on a spawned task. The phase becomes `Submitting` and
//!    further `submit()` calls are ignored until the call settles.
//! 3. The settled result comes back over a channel. `poll()` (once per frame)
//!    or `settle().await` applies it:
//!    - success: toast, form reset, dialog closed, `on_close` invoked;
//!    - failure: error routed through [`handle_error`], values kept.
//!
//!    Either way `UsersListInvalidated` is emitted.

use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, info};

use crate::avatar::AvatarFile;
use crate::error::{ApiError, handle_error};
use crate::events::{CacheEvent, CacheEventSender};
use crate::form::{FieldErrors, FormField, NewUserForm};
use crate::notify::{Notifier, Severity};
use crate::payload::CreateUserPayload;
use crate::service::UsersService;
use crate::task;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// The create-user call is in flight.
    Submitting,
}

/// What a `submit()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; inline errors were recorded and nothing was sent.
    Blocked,
    /// A previous submission has not settled yet; nothing was sent.
    Busy,
    /// The payload could not be built; the error was surfaced.
    Failed,
    /// The payload was handed to the users service.
    Dispatched,
}

/// Result of a settled create-user call, after it was applied to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Created,
    Failed(ApiError),
}

type SettledResult = Result<(), ApiError>;

pub struct UserCreationDialog {
    is_open: bool,
    form: NewUserForm,
    errors: FieldErrors,
    phase: SubmitPhase,
    service: Arc<dyn UsersService>,
    notifier: Arc<dyn Notifier>,
    cache_events: CacheEventSender,
    on_close: Box<dyn FnMut()>,
    settled_tx: Sender<SettledResult>,
    settled_rx: Receiver<SettledResult>,
}

impl UserCreationDialog {
    pub fn new(
        service: Arc<dyn UsersService>,
        notifier: Arc<dyn Notifier>,
        cache_events: CacheEventSender,
    ) -> Self {
        let (settled_tx, settled_rx) = flume::bounded(1);
        Self {
            is_open: false,
            form: NewUserForm::default(),
            errors: FieldErrors::default(),
            phase: SubmitPhase::Idle,
            service,
            notifier,
            cache_events,
            on_close: Box::new(|| {}),
            settled_tx,
            settled_rx,
        }
    }

    /// Sets the caller's close handler. Invoked whenever the dialog closes.
    pub fn with_on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Box::new(on_close);
        self
    }

    pub fn open(&mut self) {
        debug!("Opening create user dialog");
        self.is_open = true;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn form(&self) -> &NewUserForm {
        &self.form
    }

    /// Direct access for input bindings. Editing is allowed while submitting.
    pub fn form_mut(&mut self) -> &mut NewUserForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<ValidationError> {
        self.errors.get(field)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// A field lost focus: re-run its rule and update its inline error.
    pub fn blur(&mut self, field: FormField) {
        self.errors.record(field, self.form.validate_field(field));
    }

    /// Applies an avatar file selection; only the first file is kept.
    pub fn select_avatar(&mut self, files: impl IntoIterator<Item = AvatarFile>) {
        self.form.select_avatar(files);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            debug!("Create user already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        }

        if let Err(errors) = self.form.validate() {
            debug!("Create user blocked by {} invalid field(s)", errors.len());
            self.errors = errors;
            return SubmitOutcome::Blocked;
        }
        self.errors.clear();

        let payload = match CreateUserPayload::from_form(&self.form) {
            Ok(payload) => payload,
            Err(err) => {
                handle_error(&ApiError::Encode(err.to_string()), self.notifier.as_ref());
                return SubmitOutcome::Failed;
            }
        };

        info!("Submitting create user for {}", self.form.email);
        self.phase = SubmitPhase::Submitting;

        let call = self.service.create_user(payload);
        let tx = self.settled_tx.clone();
        task::spawn(async move {
            let result = call.await;
            if tx.send_async(result).await.is_err() {
                debug!("Create user settled after the dialog was dropped");
            }
        });

        SubmitOutcome::Dispatched
    }

    /// Applies a settled result if one is ready. Never blocks.
    pub fn poll(&mut self) -> Option<Settled> {
        let result = self.settled_rx.try_recv().ok()?;
        Some(self.apply_settled(result))
    }

    /// Waits for the in-flight call, if any, and applies its result.
    pub async fn settle(&mut self) -> Option<Settled> {
        if !self.is_submitting() {
            return None;
        }
        let result = self.settled_rx.recv_async().await.ok()?;
        Some(self.apply_settled(result))
    }

    /// Discards the form and closes the dialog.
    ///
    /// An in-flight call is not cancelled; its result is still applied.
    pub fn cancel(&mut self) {
        debug!("Create user dialog cancelled");
        self.form.reset();
        self.errors.clear();
        self.close();
    }

    fn apply_settled(&mut self, result: SettledResult) -> Settled {
        self.phase = SubmitPhase::Idle;

        let settled = match result {
            Ok(()) => {
                self.notifier
                    .notify("Success!", "User created successfully.", Severity::Success);
                self.form.reset();
                self.errors.clear();
                self.close();
                Settled::Created
            }
            Err(err) => {
                handle_error(&err, self.notifier.as_ref());
                Settled::Failed(err)
            }
        };

        self.cache_events.emit(CacheEvent::UsersListInvalidated);
        settled
    }

    fn close(&mut self) {
        if self.is_open {
            self.is_open = false;
            (self.on_close)();
        }
    }
}

impl std::fmt::Debug for UserCreationDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreationDialog")
            .field("is_open", &self.is_open)
            .field("phase", &self.phase)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
