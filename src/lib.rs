//! Client for a resume enhancement service: credential stubs, the job
//! application form with its submission state machine, and a renderer for
//! whatever shape of content the service sends back.

pub mod app;
pub mod cli;
pub mod core;
pub mod forms;
pub mod render;
pub mod types;
pub mod utils;

pub use app::{AuthScreen, Portal, View};
pub use crate::core::{ConfigManager, EnhancementService, FsOps, ServiceClient, ServiceError};
pub use forms::{ApplicationForm, Download, SubmissionStatus};
pub use render::{render_content, render_result, RenderedContent, ResultView};
pub use types::{EnhancedContent, EnhancementResult, ResumeFile};
