use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TASK_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+-\d+$").expect("valid regex"));

/// Checks the issue-key shape: uppercase project prefix, hyphen, digits.
pub fn is_task_key(s: &str) -> bool {
    TASK_KEY_RE.is_match(s)
}

/// One unit of loggable work.
///
/// `task` is `None` until reconciliation fills it; `date` is the empty
/// string inside stored templates (a run date is chosen at use time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorklogEntry {
    pub task: Option<String>,
    pub activity: String,
    pub hours: f64,
    pub date: String,
}

/// Where a logged entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Ai,
    Template,
    Manual,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Template => "template",
            Self::Manual => "manual",
        }
    }
}

impl std::str::FromStr for EntrySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(Self::Ai),
            "template" => Ok(Self::Template),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown entry source '{other}'")),
        }
    }
}

/// A submitted entry as recorded in local history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub entry: WorklogEntry,
    pub source: EntrySource,
}

/// Persisted phrase-to-task shortcut. `keyword` is unique across the set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    pub keyword: String,
    pub task: String,
    pub description: Option<String>,
    #[serde(default)]
    pub usage_count: u32,
    pub last_used_at: Option<String>,
    pub created_at: Option<String>,
}

/// A named, persisted batch of entries for repeated reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub entries: Vec<WorklogEntry>,
    #[serde(default)]
    pub usage_count: u32,
    pub last_used_at: Option<String>,
    pub created_at: Option<String>,
}

impl Template {
    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.hours).sum()
    }
}

/// Read-only snapshot handed to prompt construction, assembled fresh per run.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub project_key: String,
    pub aliases: Vec<Alias>,
    pub recent_tasks: Vec<String>,
}

/// Issue metadata returned by tracker validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedIssue {
    pub key: String,
    pub summary: String,
    pub assignee: Option<String>,
    pub status: String,
}

/// A valid key owned by someone other than the current user.
#[derive(Debug, Clone)]
pub struct NotAssigned {
    pub key: String,
    pub assignee: String,
}

/// Partition of a batch's task keys after one tracker round-trip.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: Vec<TrackedIssue>,
    pub invalid: Vec<String>,
    pub not_assigned: Vec<NotAssigned>,
}

/// Per-entry submission outcome for one batch.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: Vec<WorklogEntry>,
    pub failed: Vec<FailedEntry>,
}

#[derive(Debug)]
pub struct FailedEntry {
    pub entry: WorklogEntry,
    pub error: String,
}

/// AI completion backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Anthropic,
    OpenAi,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-haiku-4-5",
            Self::OpenAi => "gpt-5-mini",
        }
    }
}

impl std::str::FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!(
                "invalid AI provider '{other}'. Valid values: anthropic, openai"
            )),
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interface language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    En,
}

impl Default for Lang {
    fn default() -> Self {
        Self::Ru
    }
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}

/// Persisted tool configuration, written by `wl setup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub jira_url: String,
    pub jira_username: String,
    pub jira_password: String,
    pub project_key: String,
    pub ai_provider: AiProvider,
    pub ai_api_key: String,
    pub ai_model: Option<String>,
    #[serde(default)]
    pub lang: Lang,
}

impl Config {
    /// Model to use, falling back to the provider default.
    pub fn model(&self) -> &str {
        self.ai_model
            .as_deref()
            .unwrap_or_else(|| self.ai_provider.default_model())
    }
}
