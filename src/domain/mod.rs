//! Domain Layer
//!
//! Core business entity definitions

pub mod calendar;
pub mod message;

pub use calendar::DateFacts;
pub use message::*;
