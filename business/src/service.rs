//! The external "create user" operation.

use std::future::Future;
use std::pin::Pin;

use log::{debug, info, warn};

use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::http::Client;
use crate::payload::CreateUserPayload;

/// Send-safe boxed future, the shape every service call returns.
pub type ServiceFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Remote users API as seen by the dialog.
pub trait UsersService: Send + Sync {
    /// Creates a user from `payload` in one call. Success carries no data.
    fn create_user(&self, payload: CreateUserPayload) -> ServiceFuture<()>;
}

/// [`UsersService`] backed by the portal HTTP API.
#[derive(Debug, Clone)]
pub struct HttpUsersService {
    config: BusinessConfig,
}

impl HttpUsersService {
    pub fn new(config: BusinessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }
}

impl UsersService for HttpUsersService {
    fn create_user(&self, payload: CreateUserPayload) -> ServiceFuture<()> {
        let url = self.config.users_create_url();
        let bearer = self
            .config
            .access_token()
            .map(|token| format!("Bearer {token}"));

        Box::pin(async move {
            debug!(
                "POST {} with fields {:?}",
                url.as_str(),
                payload.field_names()
            );

            let response = Client::post(url.as_str())
                .header_opt("Authorization", bearer)
                .multipart(payload.into_parts())
                .send()
                .await?;

            if response.is_success() {
                info!("User created, status {}", response.status);
                return Ok(());
            }

            let err = ApiError::from_response(&response);
            warn!("Create user rejected: {err}");
            Err(err)
        })
    }
}
