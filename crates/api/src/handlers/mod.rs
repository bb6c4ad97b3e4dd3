//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod badges;
pub mod discussions;
pub mod donations;
pub mod polls;
pub mod proposals;
pub mod quests;
pub mod reactions;
pub mod recommendations;
pub mod rewards;
pub mod users;
