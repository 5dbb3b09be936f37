//! Shared utility functions.
//!
//! - [`content_length`] - Expected size and content type from response headers

pub mod content_length;

pub use content_length::{content_length, content_type};
