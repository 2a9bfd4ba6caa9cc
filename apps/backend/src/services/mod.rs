//! Service layer: business logic between routes and repos.

pub mod assignments;
pub mod draw;
pub mod groups;
pub mod participants;
pub mod users;
pub mod wishes;
