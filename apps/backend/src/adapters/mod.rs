//! SeaORM adapters, generic over `ConnectionTrait`.
//!
//! Adapter functions speak `DbErr`; the repos layer converts to `DomainError`.

pub mod assignments_sea;
pub mod groups_sea;
pub mod participants_sea;
pub mod users_sea;
pub mod wishes_sea;
