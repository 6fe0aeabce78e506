//! Domain models for the Moxie frame.
//!
//! These types are shared across all modules: earnings client, screens, and rendering.

pub mod directive;
pub mod earnings;
pub mod markup;
pub mod request;
