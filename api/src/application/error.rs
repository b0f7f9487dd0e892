use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::application::ports::store_conflict::StoreConflict;

/// Field name to human readable message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub BTreeMap<String, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ServiceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Failures a use case reports to its caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User with id '{0}' not found")]
    UserNotFound(i64),

    #[error("User with email '{0}' not found")]
    UserEmailNotFound(String),

    #[error("Task with id '{0}' not found")]
    TaskNotFound(i64),

    #[error("Task with title '{0}' not found")]
    TaskTitleNotFound(String),

    /// Profile update onto an email owned by somebody else.
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Registration with an email that already has an account.
    #[error("Email already in use")]
    EmailInUse,

    #[error("Task with title '{0}' already exists")]
    TitleAlreadyExists(String),

    #[error("User with ID '{0}' is already attached to the task")]
    UserAlreadyAttached(i64),

    #[error("User with ID '{0}' is not attached to the task")]
    UserNotAttached(i64),

    #[error("Invalid current password")]
    InvalidCurrentPassword,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// A failed store write; uniqueness rejections become `conflict`.
    pub fn from_store(
        err: anyhow::Error,
        conflict: impl FnOnce(&StoreConflict) -> ServiceError,
    ) -> Self {
        match StoreConflict::find(&err) {
            Some(found) => conflict(found),
            None => ServiceError::Internal(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
