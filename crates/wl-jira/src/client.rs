use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use wl_core::{Config, NotAssigned, TrackedIssue, ValidationResult, WorklogEntry};

use crate::error::{Result, TrackerError};

/// Worklogs are pinned to 10:00 of the entry date; Jira Server only cares
/// about the day, but the field is mandatory.
const WORKLOG_START_HOUR: &str = "10:00:00";

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub project_key: String,
}

impl From<&Config> for JiraConfig {
    fn from(config: &Config) -> Self {
        Self {
            url: config.jira_url.clone(),
            username: config.jira_username.clone(),
            password: config.jira_password.clone(),
            project_key: config.project_key.clone(),
        }
    }
}

/// The slice of tracker behavior the submission coordinator depends on.
/// Tests substitute a recording fake.
#[async_trait]
pub trait Tracker: Send + Sync {
    async fn validate_tasks(&self, keys: &[String]) -> Result<ValidationResult>;
    async fn submit_worklog(&self, entry: &WorklogEntry) -> Result<()>;
    /// Fails soft: any error degrades to an empty list.
    async fn recent_tasks(&self, limit: usize) -> Vec<String>;
}

#[derive(Deserialize)]
struct MyselfPayload {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Deserialize)]
struct IssuePayload {
    key: String,
    fields: IssueFields,
}

#[derive(Deserialize)]
struct IssueFields {
    summary: Option<String>,
    assignee: Option<AssigneePayload>,
    status: Option<StatusPayload>,
}

#[derive(Deserialize)]
struct AssigneePayload {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Deserialize)]
struct StatusPayload {
    name: String,
}

#[derive(Deserialize)]
struct SearchPayload {
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Deserialize)]
struct SearchIssue {
    key: String,
}

pub struct JiraClient {
    http: reqwest::Client,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        // On-premise instances routinely run with self-signed certificates.
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| TrackerError::Other(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/rest/api/2/{}",
            self.config.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url_for(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    /// Verifies credentials and reachability; used as the setup gate.
    pub async fn test_connection(&self) -> Result<String> {
        let me = self.current_user().await?;
        Ok(me)
    }

    async fn current_user(&self) -> Result<String> {
        let response = self.get("myself").send().await?;
        match response.status().as_u16() {
            200 => {
                let me: MyselfPayload = response.json().await?;
                Ok(me.display_name)
            }
            401 => Err(TrackerError::Auth),
            status => Err(TrackerError::Http {
                status,
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetches one issue; `Ok(None)` when the key does not exist.
    pub async fn get_issue(&self, key: &str) -> Result<Option<TrackedIssue>> {
        let response = self
            .get(&format!("issue/{key}"))
            .query(&[("fields", "summary,assignee,status")])
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let issue: IssuePayload = response.json().await?;
                Ok(Some(TrackedIssue {
                    key: issue.key,
                    summary: issue.fields.summary.unwrap_or_default(),
                    assignee: issue.fields.assignee.map(|a| a.display_name),
                    status: issue.fields.status.map(|s| s.name).unwrap_or_default(),
                }))
            }
            404 => Ok(None),
            401 => Err(TrackerError::Auth),
            status => Err(TrackerError::Http {
                status,
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl Tracker for JiraClient {
    /// One round-trip per distinct key, partitioned against the current user.
    async fn validate_tasks(&self, keys: &[String]) -> Result<ValidationResult> {
        let mut unique: Vec<&String> = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        let current_user = self.current_user().await?;
        let mut result = ValidationResult::default();

        for key in unique {
            match self.get_issue(key).await? {
                None => result.invalid.push(key.clone()),
                Some(issue) => {
                    if issue.assignee.as_deref() != Some(current_user.as_str()) {
                        result.not_assigned.push(NotAssigned {
                            key: key.clone(),
                            assignee: issue
                                .assignee
                                .clone()
                                .unwrap_or_else(|| "Unassigned".to_string()),
                        });
                    }
                    result.valid.push(issue);
                }
            }
        }

        Ok(result)
    }

    async fn submit_worklog(&self, entry: &WorklogEntry) -> Result<()> {
        let task = entry
            .task
            .as_deref()
            .ok_or_else(|| TrackerError::InvalidEntry("entry has no task key".into()))?;
        let started = started_timestamp(&entry.date)?;

        let response = self
            .http
            .post(self.url_for(&format!("issue/{task}/worklog")))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&json!({
                "comment": entry.activity,
                "timeSpent": time_spent(entry.hours),
                "started": started,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        match status.as_u16() {
            401 => Err(TrackerError::Auth),
            code => Err(TrackerError::Http {
                status: code,
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn recent_tasks(&self, limit: usize) -> Vec<String> {
        let jql = format!(
            "project = {} AND assignee = currentUser() ORDER BY updated DESC",
            self.config.project_key
        );
        let response = self
            .get("search")
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", &limit.to_string()),
                ("fields", "key"),
            ])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<SearchPayload>().await {
                Ok(payload) => payload.issues.into_iter().map(|i| i.key).collect(),
                Err(err) => {
                    debug!("recent task search decode failed: {err}");
                    Vec::new()
                }
            },
            Ok(resp) => {
                debug!("recent task search returned status {}", resp.status());
                Vec::new()
            }
            Err(err) => {
                debug!("recent task search failed: {err}");
                Vec::new()
            }
        }
    }
}

/// Renders fractional hours as Jira's `3h 30m` duration syntax.
/// Entries too small to round to a minute still log `1m`.
pub fn time_spent(hours: f64) -> String {
    let mut whole_hours = hours.floor() as u32;
    let mut minutes = ((hours - whole_hours as f64) * 60.0).round() as u32;
    // Rounding can land on a full hour; carry instead of emitting "60m".
    if minutes == 60 {
        whole_hours += 1;
        minutes = 0;
    }

    let mut parts = Vec::new();
    if whole_hours > 0 {
        parts.push(format!("{whole_hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if parts.is_empty() {
        return "1m".to_string();
    }
    parts.join(" ")
}

fn started_timestamp(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidEntry(format!("bad entry date '{date}'")))?;
    Ok(format!(
        "{}T{WORKLOG_START_HOUR}.000+0000",
        parsed.format("%Y-%m-%d")
    ))
}
