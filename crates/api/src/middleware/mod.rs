//! Request extractors: authentication, family context, device key.

pub mod auth;
pub mod family;
