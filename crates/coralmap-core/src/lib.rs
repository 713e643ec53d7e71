#![forbid(unsafe_code)]

//! Mindmap document model + validator/normalizer (headless).
//!
//! Design goals:
//! - a typed, canonical tree (`MindmapDocument`) instead of loose JSON
//! - descriptive schema errors that name the failed constraint
//! - deterministic, side-effect-free validation
//!
//! The upstream generation collaborator (a text model producing JSON) is out
//! of scope here; this crate starts at raw text / parsed JSON.

pub mod error;
pub mod model;
pub mod preprocess;

pub use error::{Error, Result};
pub use model::{MindmapDocument, MindmapNode, ROOT_KEY, normalize};
pub use preprocess::{parse_document, repair_trailing_commas};
