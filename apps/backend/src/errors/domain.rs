//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Group,
    Participant,
    Assignment,
    Wish,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The group's draw has already happened
    AlreadyDrawn,
    /// Lost the compare-and-swap race against a concurrent draw
    DrawRace,
    /// Group join code collided with an existing group
    GroupCode,
    /// A unique constraint rejected the write
    UniqueConstraint(String),
    Other(String),
}

/// Domain-level validation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Fewer than two participants in the group
    InsufficientParticipants,
    /// Participants with an empty wish list block the draw
    IncompleteWishLists,
    /// Operation requires a drawn group
    GroupNotDrawn,
    /// A required request field is missing or empty
    MissingField,
    Other,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Requester is authenticated but not allowed to do this
    Forbidden(String),
    /// A guaranteed internal invariant did not hold; fatal logic defect
    Invariant(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Forbidden(d) => write!(f, "forbidden: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match &e {
            DbErr::RecordNotFound(detail) => {
                DomainError::not_found(NotFoundKind::Other("record".to_string()), detail.clone())
            }
            _ => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    DomainError::conflict(ConflictKind::UniqueConstraint(detail.clone()), detail)
                }
                _ => DomainError::infra(InfraErrorKind::Other("db".to_string()), e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::validation(
            ValidationKind::InsufficientParticipants,
            "need at least 2 participants",
        );
        let s = err.to_string();
        assert!(s.contains("InsufficientParticipants"));
        assert!(s.contains("need at least 2 participants"));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let db_err = sea_orm::DbErr::RecordNotFound("Group not found".to_string());
        let err = DomainError::from(db_err);
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }
}
