// src/render.rs
//! Turns an enhancement result into a printable view tree.
//!
//! Rendering never fails: anything the typed parser rejects is shown raw
//! under an explicit notice instead.

use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::forms::application::{JSON_EXPORT_NAME, LATEX_EXPORT_NAME};
use crate::types::{Bullets, EnhancedContent, EnhancementResult, StructuredContent};

pub const NO_CONTENT_NOTICE: &str = "No enhanced content available";
pub const FALLBACK_NOTICE: &str = "Error displaying enhanced content. Raw content:";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedContent {
    Empty,
    Text(String),
    Sections(Vec<Section>),
    Fallback { notice: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// One "category: value" line per entry
    Lines(Vec<String>),
    /// A heading per entry with its bullets beneath
    Blocks(Vec<Block>),
    Items(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub heading: String,
    pub items: Vec<String>,
}

/// Render `enhanced_content` (object, string or absent).
pub fn render_content(content: Option<&Value>) -> RenderedContent {
    let value = match content {
        None | Some(Value::Null) => return RenderedContent::Empty,
        Some(Value::String(text)) if text.is_empty() => return RenderedContent::Empty,
        Some(value) => value,
    };

    match EnhancedContent::parse(value) {
        Ok(EnhancedContent::RawText(text)) => RenderedContent::Text(text),
        Ok(EnhancedContent::Structured(structured)) => {
            let sections = sections_of(structured);
            debug!("Rendered {} content sections", sections.len());
            RenderedContent::Sections(sections)
        }
        Err(e) => {
            warn!("Falling back to raw content display: {}", e);
            let raw = match value {
                Value::String(text) => text.clone(),
                other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
            };
            RenderedContent::Fallback {
                notice: FALLBACK_NOTICE,
                raw,
            }
        }
    }
}

fn sections_of(content: StructuredContent) -> Vec<Section> {
    let mut sections = Vec::new();

    if let Some(skills) = content.skills {
        sections.push(Section {
            title: "Skills",
            body: SectionBody::Lines(
                skills
                    .into_iter()
                    .map(|(category, value)| format!("{}: {}", category, value))
                    .collect(),
            ),
        });
    }
    if let Some(experience) = content.experience {
        sections.push(Section {
            title: "Experience",
            body: SectionBody::Blocks(blocks(experience)),
        });
    }
    if let Some(projects) = content.projects {
        sections.push(Section {
            title: "Projects",
            body: SectionBody::Blocks(blocks(projects)),
        });
    }
    if let Some(achievements) = content.achievements {
        sections.push(Section {
            title: "Achievements",
            body: SectionBody::Items(bullet_items(achievements)),
        });
    }

    sections
}

fn blocks(entries: Vec<(String, Bullets)>) -> Vec<Block> {
    entries
        .into_iter()
        .map(|(heading, bullets)| Block {
            heading,
            items: bullet_items(bullets),
        })
        .collect()
}

fn bullet_items(bullets: Bullets) -> Vec<String> {
    match bullets {
        Bullets::List(items) => items,
        Bullets::Single(item) => vec![item],
    }
}

/// Full result screen: content plus keywords, recommendations and the
/// downloads on offer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub content: RenderedContent,
    pub keywords: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
    pub downloads: Vec<&'static str>,
}

pub fn render_result(result: &EnhancementResult) -> ResultView {
    let mut downloads = vec![JSON_EXPORT_NAME];
    if result.latex().is_some() {
        downloads.push(LATEX_EXPORT_NAME);
    }

    ResultView {
        content: render_content(result.enhanced_content.as_ref()),
        keywords: result.keywords().map(<[String]>::to_vec),
        recommendations: result.recommendations().map(<[String]>::to_vec),
        downloads,
    }
}

impl fmt::Display for RenderedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => writeln!(f, "{}", NO_CONTENT_NOTICE),
            Self::Text(text) => writeln!(f, "{}", text),
            Self::Sections(sections) => {
                for section in sections {
                    write!(f, "{}", section)?;
                }
                Ok(())
            }
            Self::Fallback { notice, raw } => {
                writeln!(f, "{}", notice)?;
                writeln!(f, "{}", raw)
            }
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        match &self.body {
            SectionBody::Lines(lines) | SectionBody::Items(lines) => {
                for line in lines {
                    writeln!(f, "  - {}", line)?;
                }
            }
            SectionBody::Blocks(blocks) => {
                for block in blocks {
                    writeln!(f, "  {}", block.heading)?;
                    for item in &block.items {
                        writeln!(f, "    - {}", item)?;
                    }
                }
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resume Enhanced Successfully!")?;
        writeln!(f)?;
        write!(f, "{}", self.content)?;

        if let Some(keywords) = &self.keywords {
            writeln!(f)?;
            writeln!(f, "Matching Keywords")?;
            writeln!(f, "  {}", keywords.join(" | "))?;
        }
        if let Some(recommendations) = &self.recommendations {
            writeln!(f)?;
            writeln!(f, "Recommendations")?;
            for rec in recommendations {
                writeln!(f, "  - {}", rec)?;
            }
        }
        Ok(())
    }
}
