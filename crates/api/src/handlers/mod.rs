//! HTTP handlers, one module per resource.

pub mod account;
pub mod auth;
pub mod cook_mode;
pub mod cookbooks;
pub mod family;
pub mod folders;
pub mod health;
pub mod recipes;
