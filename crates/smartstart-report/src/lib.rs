//! smartstart-report — HTML and markdown rendering of assessment reports.
//!
//! Takes the JSON-serializable report from `smartstart-core` and turns
//! it into something a parent or teacher can read.

pub mod html;
pub mod markdown;
