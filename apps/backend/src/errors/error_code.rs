//! Error codes for the Wichtel backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Wichtel backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User behind the token no longer exists
    ForbiddenUserNotFound,

    // Request Validation
    /// A group needs at least two participants before it can be drawn
    InsufficientParticipants,
    /// One or more participants have an empty wish list
    IncompleteWishLists,
    /// The group has not been drawn yet
    GroupNotDrawn,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Group not found
    GroupNotFound,
    /// Participant not found
    ParticipantNotFound,
    /// Assignment not found
    AssignmentNotFound,
    /// Wish not found
    WishNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// The group has already been drawn
    AlreadyDrawn,
    /// Lost the race against a concurrent draw of the same group
    DrawConflict,
    /// Group code already exists
    GroupCodeConflict,
    /// Unique constraint violation (generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (generic 409)
    FkViolation,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// The generator produced an invalid permutation; fatal logic defect
    AssignmentInvariantViolation,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            // Request Validation
            Self::InsufficientParticipants => "INSUFFICIENT_PARTICIPANTS",
            Self::IncompleteWishLists => "INCOMPLETE_WISH_LISTS",
            Self::GroupNotDrawn => "GROUP_NOT_DRAWN",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::WishNotFound => "WISH_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::AlreadyDrawn => "ALREADY_DRAWN",
            Self::DrawConflict => "DRAW_CONFLICT",
            Self::GroupCodeConflict => "GROUP_CODE_CONFLICT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::AssignmentInvariantViolation => "ASSIGNMENT_INVARIANT_VIOLATION",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
