//! User repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea;
use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};

/// User domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub sub: String,
    pub display_name: String,
    pub phone: Option<String>,
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_sea::find_by_sub(conn, sub).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_phone<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    phone: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_sea::find_by_phone(conn, phone).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<User>, DomainError> {
    let users = users_sea::find_by_ids(conn, ids).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    let user = users_sea::find_by_id(conn, user_id).await?;
    user.map(User::from).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
    display_name: &str,
    phone: Option<&str>,
) -> Result<User, DomainError> {
    let user = users_sea::create_user(conn, sub, display_name, phone).await?;
    Ok(User::from(user))
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            display_name: model.display_name,
            phone: model.phone,
        }
    }
}
