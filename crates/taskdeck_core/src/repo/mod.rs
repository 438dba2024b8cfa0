//! Repository layer: CRUD contracts over the mock data store.
//!
//! # Responsibility
//! - Define async data-access contracts mirroring the REST-shaped surface a
//!   real backend would expose.
//! - Keep store access details (latency wrapping, table layout) out of the
//!   service layer.
//!
//! # Invariants
//! - Write paths validate drafts/patches before any store interaction.
//! - Contracts return semantic errors (`NotFound`) rather than sentinel
//!   values; failures surface immediately, there is no retry.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::ValidationError;

pub mod list_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity kind carried by [`RepoError::NotFound`] for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    List,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Repository error taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    /// Payload rejected before reaching the store.
    Validation(ValidationError),
    /// Operation referenced a nonexistent id.
    NotFound { kind: EntityKind, id: u64 },
    /// Catch-all for any other rejected asynchronous operation.
    Failed(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Failed(message) => write!(f, "operation failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Failed(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
