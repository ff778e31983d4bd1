//! Render-side helpers shared by every page.

pub mod format;

pub use format::{FALLBACK, decimal_or_fallback, integer_or_fallback, note_timestamp, text_or_fallback};
