//! Domain logic for the Recetario service.
//!
//! Everything in this crate is pure and I/O-free: the recipe text model,
//! color math for cookbook covers, the deterministic cover-style hash,
//! join-code helpers, and the recipe-creation wizard step machine. The
//! database and HTTP layers build on these primitives.

pub mod color;
pub mod cover;
pub mod error;
pub mod family;
pub mod text;
pub mod types;
pub mod wizard;
