//! Create-user domain for the admin portal: form state, validation, the
//! multipart payload, the HTTP users service and the dialog controller that
//! ties them together. No UI types live here.

mod avatar;
mod config;
mod dialog;
mod error;
mod events;
mod form;
pub mod http;
mod notify;
mod payload;
mod roles;
mod service;
mod task;
mod validation;

#[cfg(test)]
mod test_utils;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod dialog_tests;

pub use avatar::AvatarFile;
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use dialog::{Settled, SubmitOutcome, SubmitPhase, UserCreationDialog};
pub use error::{ApiError, FALLBACK_ERROR_MESSAGE, ValidationDetail, handle_error};
pub use events::{
    CacheEvent, CacheEventReceiver, CacheEventSender, QueryKey, UsersListCache, cache_channel,
};
pub use form::{FieldErrors, FormField, NewUserForm};
pub use notify::{Notifier, Severity, Toast, ToastQueue, ToastSender, toast_channel};
pub use payload::{CreateUserPayload, PayloadPart};
pub use roles::PortalRole;
pub use service::{HttpUsersService, ServiceFuture, UsersService};
pub use validation::{MIN_PASSWORD_LEN, ValidationError, is_valid_email};
