// src/types/mod.rs
pub mod content;
pub mod payload;
pub mod response;

pub use content::{Bullets, ContentError, EnhancedContent, StructuredContent};
pub use payload::{ApplicationPayload, ResumeFile, PDF_MEDIA_TYPE};
pub use response::EnhancementResult;
