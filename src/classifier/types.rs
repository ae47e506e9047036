use crate::models::{
    tool::ToolCategory,
    video::{Category, Priority},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification API key is not configured")]
    NotConfigured,
    #[error("completion endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed analysis: {0}")]
    MalformedResponse(String),
}

/// Validated result of classifying one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub category: Category,
    pub priority: Priority,
    pub summary: String,
    pub tools: Vec<ExtractedTool>,
    pub news: Vec<ExtractedNews>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedTool {
    pub name: String,
    pub description: Option<String>,
    pub category: ToolCategory,
    pub url: Option<String>,
    pub pricing: Option<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedNews {
    pub title: String,
    pub summary: String,
    pub importance: Priority,
}

/// The model's JSON exactly as written. Enumerated fields stay strings until
/// [`RawAnalysis::validate`] maps them.
#[derive(Debug, Deserialize)]
pub struct RawAnalysis {
    pub category: String,
    pub priority: String,
    pub summary: String,
    #[serde(default)]
    pub tools: Option<Vec<RawTool>>,
    #[serde(default)]
    pub news: Option<Vec<RawNews>>,
}

#[derive(Debug, Deserialize)]
pub struct RawTool {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pricing: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct RawNews {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
}

/// Parses `value` as `T`, falling back to `fallback` with a warning.
fn enum_or<T: FromStr + Copy>(value: Option<&str>, fallback: T, field: &str) -> T {
    match value.map(str::trim) {
        Some(v) => match v.to_ascii_uppercase().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(field, value = v, "Unrecognized value from model, using fallback");
                fallback
            }
        },
        None => fallback,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawAnalysis {
    /// Maps free-form strings onto the closed enumerations. Unknown values
    /// fall back to UNCATEGORIZED / MEDIUM / OTHER; a blank summary is an
    /// error because a processed video must carry one.
    pub fn validate(self) -> Result<ContentAnalysis, ClassifierError> {
        let summary = self.summary.trim().to_string();
        if summary.is_empty() {
            return Err(ClassifierError::MalformedResponse(
                "analysis has an empty summary".to_string(),
            ));
        }

        let tools = self
            .tools
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                let name = non_blank(t.name)?;
                Some(ExtractedTool {
                    name,
                    category: enum_or(
                        t.category.as_deref(),
                        ToolCategory::Other,
                        "tools.category",
                    ),
                    description: non_blank(t.description),
                    url: non_blank(t.url),
                    pricing: non_blank(t.pricing),
                    features: t
                        .features
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(non_blank)
                        .collect(),
                })
            })
            .collect();

        let news = self
            .news
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| {
                Some(ExtractedNews {
                    title: non_blank(n.title)?,
                    importance: enum_or(n.importance.as_deref(), Priority::Medium, "news.importance"),
                    summary: n.summary.unwrap_or_default().trim().to_string(),
                })
            })
            .collect();

        Ok(ContentAnalysis {
            category: enum_or(Some(self.category.as_str()), Category::Uncategorized, "category"),
            priority: enum_or(Some(self.priority.as_str()), Priority::Medium, "priority"),
            summary,
            tools,
            news,
        })
    }
}

/// Parses the assistant message content into a validated analysis.
pub fn parse_analysis(content: &str) -> Result<ContentAnalysis, ClassifierError> {
    let raw: RawAnalysis = serde_json::from_str(content.trim())
        .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;
    raw.validate()
}

// OpenAI-compatible chat completion wire types

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
}
