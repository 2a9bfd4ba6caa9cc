//! User identity service.
//!
//! Verification-code delivery lives with the auth provider; this service
//! only upserts the user behind a verified phone number and hands back the
//! stable `sub` the token layer works with.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::users::{self, User};

/// Find or create the user for a verified phone number.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phone: &str,
    display_name: &str,
) -> Result<User, DomainError> {
    if phone.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingField,
            "phone number is required",
        ));
    }
    if display_name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingField,
            "display name is required",
        ));
    }

    if let Some(user) = users::find_by_phone(conn, phone).await? {
        return Ok(user);
    }

    let sub = uuid::Uuid::new_v4().to_string();
    users::create_user(conn, &sub, display_name, Some(phone)).await
}
