//! Repository layer: domain models over the SeaORM adapters.

pub mod assignments;
pub mod groups;
pub mod participants;
pub mod users;
pub mod wishes;
