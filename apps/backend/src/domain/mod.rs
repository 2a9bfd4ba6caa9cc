//! Pure domain logic, independent of HTTP and persistence.

pub mod derangement;
