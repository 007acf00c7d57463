//! Fakes for exercising the create-user dialog without a server.
//!
//! ```ignore
//! let mut t = test_dialog(Ok(()));
//! *t.dialog.form_mut() = valid_form();
//! t.dialog.submit();
//! t.dialog.settle().await;
//! assert_eq!(t.service.calls().len(), 1);
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{
    ApiError, CacheEventReceiver, CreateUserPayload, NewUserForm, Notifier, PortalRole, Severity,
    ServiceFuture, UserCreationDialog, UsersService, cache_channel,
};

/// Records every payload and answers with a fixed result.
pub struct RecordingUsersService {
    calls: Mutex<Vec<CreateUserPayload>>,
    outcome: Result<(), ApiError>,
}

impl RecordingUsersService {
    pub fn new(outcome: Result<(), ApiError>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn calls(&self) -> Vec<CreateUserPayload> {
        self.calls.lock().unwrap().clone()
    }
}

impl UsersService for RecordingUsersService {
    fn create_user(&self, payload: CreateUserPayload) -> ServiceFuture<()> {
        self.calls.lock().unwrap().push(payload);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(String, String, Severity)>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<(String, String, Severity)> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        self.toasts
            .lock()
            .unwrap()
            .push((title.to_owned(), message.to_owned(), severity));
    }
}

pub struct TestDialog {
    pub dialog: UserCreationDialog,
    pub service: Arc<RecordingUsersService>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: CacheEventReceiver,
    pub close_calls: Arc<AtomicUsize>,
}

impl TestDialog {
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

/// An open dialog wired to recording fakes.
pub fn test_dialog(outcome: Result<(), ApiError>) -> TestDialog {
    let service = Arc::new(RecordingUsersService::new(outcome));
    let notifier = Arc::new(RecordingNotifier::default());
    let (events_tx, events) = cache_channel();
    let close_calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&close_calls);
    let mut dialog = UserCreationDialog::new(service.clone(), notifier.clone(), events_tx)
        .with_on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    dialog.open();

    TestDialog {
        dialog,
        service,
        notifier,
        events,
        close_calls,
    }
}

pub fn valid_form() -> NewUserForm {
    let mut form = NewUserForm {
        email: "a@b.com".to_owned(),
        password: "longenough1".to_owned(),
        confirm_password: "longenough1".to_owned(),
        ..Default::default()
    };
    form.roles.insert(PortalRole::PortalUser);
    form
}
