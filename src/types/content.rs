// src/types/content.rs
//! Typed view over the loosely shaped `enhanced_content` payload

use serde_json::{Map, Value};
use thiserror::Error;

const SKILLS_KEY: &str = "Skills";
const EXPERIENCE_KEY: &str = "Experience";
const PROJECTS_KEY: &str = "Projects";
const ACHIEVEMENTS_KEY: &str = "Achievements";

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("malformed JSON content: {0}")]
    Malformed(String),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("section `{section}` must be an object, found {found}")]
    SectionShape {
        section: &'static str,
        found: &'static str,
    },
    #[error("section `{section}` holds an unsupported {found} value")]
    UnsupportedValue {
        section: &'static str,
        found: &'static str,
    },
}

/// One or more bullet lines under a heading
#[derive(Debug, Clone, PartialEq)]
pub enum Bullets {
    List(Vec<String>),
    Single(String),
}

impl Bullets {
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Single(item) => vec![item.as_str()],
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Single(item) => item.is_empty(),
        }
    }
}

/// The four conventional resume sections. Each is `None` when the payload
/// omits it or leaves it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredContent {
    pub skills: Option<Vec<(String, String)>>,
    pub experience: Option<Vec<(String, Bullets)>>,
    pub projects: Option<Vec<(String, Bullets)>>,
    pub achievements: Option<Bullets>,
}

impl StructuredContent {
    pub fn is_empty(&self) -> bool {
        self.skills.is_none()
            && self.experience.is_none()
            && self.projects.is_none()
            && self.achievements.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnhancedContent {
    RawText(String),
    Structured(StructuredContent),
}

impl EnhancedContent {
    /// Convert a raw `enhanced_content` value into its typed form.
    ///
    /// Strings that look like JSON objects are decoded; any other string is
    /// kept as literal text. Values of any other kind are rejected.
    pub fn parse(value: &Value) -> Result<Self, ContentError> {
        match value {
            Value::String(text) => {
                if text.trim_start().starts_with('{') {
                    let decoded: Value = serde_json::from_str(text)
                        .map_err(|e| ContentError::Malformed(e.to_string()))?;
                    match decoded {
                        Value::Object(map) => Ok(Self::Structured(parse_sections(&map)?)),
                        other => Err(ContentError::NotAnObject(kind_of(&other))),
                    }
                } else {
                    Ok(Self::RawText(text.clone()))
                }
            }
            Value::Object(map) => Ok(Self::Structured(parse_sections(map)?)),
            other => Err(ContentError::NotAnObject(kind_of(other))),
        }
    }
}

fn parse_sections(map: &Map<String, Value>) -> Result<StructuredContent, ContentError> {
    let skills = match section_map(map, SKILLS_KEY)? {
        Some(entries) => {
            let mut lines = Vec::with_capacity(entries.len());
            for (category, value) in entries {
                lines.push((category.clone(), skill_text(value)?));
            }
            non_empty(lines)
        }
        None => None,
    };

    let achievements = match map.get(ACHIEVEMENTS_KEY) {
        None | Some(Value::Null) => None,
        Some(value) => Some(bullets(ACHIEVEMENTS_KEY, value)?).filter(|b| !b.is_empty()),
    };

    Ok(StructuredContent {
        skills,
        experience: headed_bullets(map, EXPERIENCE_KEY)?,
        projects: headed_bullets(map, PROJECTS_KEY)?,
        achievements,
    })
}

fn section_map<'a>(
    map: &'a Map<String, Value>,
    section: &'static str,
) -> Result<Option<&'a Map<String, Value>>, ContentError> {
    match map.get(section) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(entries)),
        Some(other) => Err(ContentError::SectionShape {
            section,
            found: kind_of(other),
        }),
    }
}

fn headed_bullets(
    map: &Map<String, Value>,
    section: &'static str,
) -> Result<Option<Vec<(String, Bullets)>>, ContentError> {
    let Some(entries) = section_map(map, section)? else {
        return Ok(None);
    };

    let mut blocks = Vec::with_capacity(entries.len());
    for (heading, value) in entries {
        blocks.push((heading.clone(), bullets(section, value)?));
    }
    Ok(non_empty(blocks))
}

/// Empty items (including `null`) never become bullet lines
fn bullets(section: &'static str, value: &Value) -> Result<Bullets, ContentError> {
    match value {
        Value::Array(items) => {
            let mut lines = Vec::with_capacity(items.len());
            for item in items {
                let text = scalar_text(section, item)?;
                if !text.is_empty() {
                    lines.push(text);
                }
            }
            Ok(Bullets::List(lines))
        }
        other => {
            let text = scalar_text(section, other)?;
            if text.is_empty() {
                Ok(Bullets::List(Vec::new()))
            } else {
                Ok(Bullets::Single(text))
            }
        }
    }
}

/// Skill values are usually a descriptive string; lists are joined.
fn skill_text(value: &Value) -> Result<String, ContentError> {
    match value {
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| scalar_text(SKILLS_KEY, item))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ")),
        other => scalar_text(SKILLS_KEY, other),
    }
}

fn scalar_text(section: &'static str, value: &Value) -> Result<String, ContentError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(ContentError::UnsupportedValue {
            section,
            found: kind_of(other),
        }),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
