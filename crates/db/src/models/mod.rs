//! Row structs and request/response DTOs for the database layer.

pub mod badge;
pub mod discussion;
pub mod donation;
pub mod governance;
pub mod poll;
pub mod quest;
pub mod reaction;
pub mod reward;
pub mod session;
pub mod user;
