use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;
use wl_core::{Alias, Config, HistoryEntry, Template, WorklogEntry};

const DATA_DIR: &str = ".wl";
const DB_FILE: &str = "data.db";

/// Single-connection store over the local database. Config holds
/// credentials, so the directory is 0700 and the file 0600.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            restrict_permissions(dir, 0o700)?;
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database {}", db_path.display()))?;
        restrict_permissions(db_path, 0o600)?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path()?)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                jira_url TEXT NOT NULL,
                jira_username TEXT NOT NULL,
                jira_password TEXT NOT NULL,
                project_key TEXT NOT NULL,
                ai_provider TEXT NOT NULL CHECK (ai_provider IN ('anthropic', 'openai')),
                ai_api_key TEXT NOT NULL,
                ai_model TEXT,
                lang TEXT NOT NULL DEFAULT 'ru',
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS aliases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                keyword TEXT UNIQUE NOT NULL,
                task TEXT NOT NULL,
                description TEXT,
                usage_count INTEGER DEFAULT 0,
                last_used_at TEXT,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_aliases_keyword ON aliases(keyword);

            CREATE TABLE IF NOT EXISTS templates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                entries TEXT NOT NULL,
                usage_count INTEGER DEFAULT 0,
                last_used_at TEXT,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                activity TEXT NOT NULL,
                hours REAL NOT NULL,
                date TEXT NOT NULL,
                logged_at TEXT DEFAULT CURRENT_TIMESTAMP,
                source TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_history_date ON history(date);
            CREATE INDEX IF NOT EXISTS idx_history_task ON history(task);",
        )?;
        Ok(())
    }

    // -- config --

    pub fn get_config(&self) -> Result<Option<Config>> {
        self.conn
            .query_row(
                "SELECT jira_url, jira_username, jira_password, project_key,
                        ai_provider, ai_api_key, ai_model, lang
                 FROM config WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, Option<String>>(6)?,
                        row.get::<_, String>(7)?,
                    ))
                },
            )
            .optional()?
            .map(|(url, user, pass, project, provider, api_key, model, lang)| {
                Ok(Config {
                    jira_url: url,
                    jira_username: user,
                    jira_password: pass,
                    project_key: project,
                    ai_provider: provider.parse().map_err(|e: String| anyhow!(e))?,
                    ai_api_key: api_key,
                    ai_model: model,
                    lang: lang.parse().map_err(|e: String| anyhow!(e))?,
                })
            })
            .transpose()
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (
                id, jira_url, jira_username, jira_password, project_key,
                ai_provider, ai_api_key, ai_model, lang, updated_at
            ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, CURRENT_TIMESTAMP)",
            params![
                config.jira_url,
                config.jira_username,
                config.jira_password,
                config.project_key,
                config.ai_provider.as_str(),
                config.ai_api_key,
                config.ai_model,
                config.lang.as_str(),
            ],
        )?;
        Ok(())
    }

    // -- aliases --

    pub fn aliases(&self) -> Result<Vec<Alias>> {
        let mut stmt = self.conn.prepare(
            "SELECT keyword, task, description, usage_count, last_used_at, created_at
             FROM aliases ORDER BY usage_count DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Alias {
                keyword: row.get(0)?,
                task: row.get(1)?,
                description: row.get(2)?,
                usage_count: row.get(3)?,
                last_used_at: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn find_alias(&self, keyword: &str) -> Result<Option<Alias>> {
        let alias = self
            .conn
            .query_row(
                "SELECT keyword, task, description, usage_count, last_used_at, created_at
                 FROM aliases WHERE keyword = ?1",
                params![keyword],
                |row| {
                    Ok(Alias {
                        keyword: row.get(0)?,
                        task: row.get(1)?,
                        description: row.get(2)?,
                        usage_count: row.get(3)?,
                        last_used_at: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(alias)
    }

    pub fn save_alias(&self, keyword: &str, task: &str, description: Option<&str>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO aliases (keyword, task, description)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(keyword) DO UPDATE SET
                task = excluded.task,
                description = excluded.description",
            params![keyword, task, description],
        )?;
        Ok(())
    }

    pub fn delete_alias(&self, keyword: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM aliases WHERE keyword = ?1", params![keyword])?;
        Ok(changed > 0)
    }

    pub fn touch_alias(&self, keyword: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE aliases
             SET usage_count = usage_count + 1, last_used_at = CURRENT_TIMESTAMP
             WHERE keyword = ?1",
            params![keyword],
        )?;
        Ok(())
    }

    // -- templates --

    pub fn templates(&self) -> Result<Vec<Template>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, entries, usage_count, last_used_at, created_at
             FROM templates ORDER BY usage_count DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;
        let mut templates = Vec::new();
        for row in rows {
            let (name, entries_json, usage_count, last_used_at, created_at) = row?;
            templates.push(Template {
                entries: decode_template_entries(&name, &entries_json),
                name,
                usage_count,
                last_used_at,
                created_at,
            });
        }
        Ok(templates)
    }

    pub fn get_template(&self, name: &str) -> Result<Option<Template>> {
        let row = self
            .conn
            .query_row(
                "SELECT entries, usage_count, last_used_at, created_at
                 FROM templates WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()?;
        Ok(row.map(|(entries_json, usage_count, last_used_at, created_at)| Template {
            name: name.to_string(),
            entries: decode_template_entries(name, &entries_json),
            usage_count,
            last_used_at,
            created_at,
        }))
    }

    /// Persists a template. Dates are cleared on save: a template is a shape
    /// of a day, and the run date is chosen at use time.
    pub fn save_template(&self, name: &str, entries: &[WorklogEntry]) -> Result<()> {
        let cleared: Vec<WorklogEntry> = entries
            .iter()
            .map(|e| WorklogEntry {
                date: String::new(),
                ..e.clone()
            })
            .collect();
        let entries_json = serde_json::to_string(&cleared)?;
        self.conn.execute(
            "INSERT INTO templates (name, entries)
             VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET entries = excluded.entries",
            params![name, entries_json],
        )?;
        Ok(())
    }

    pub fn delete_template(&self, name: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM templates WHERE name = ?1", params![name])?;
        Ok(changed > 0)
    }

    pub fn touch_template(&self, name: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE templates
             SET usage_count = usage_count + 1, last_used_at = CURRENT_TIMESTAMP
             WHERE name = ?1",
            params![name],
        )?;
        Ok(())
    }

    // -- history --

    pub fn save_history(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO history (task, activity, hours, date, source)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for history in entries {
                stmt.execute(params![
                    history.entry.task,
                    history.entry.activity,
                    history.entry.hours,
                    history.entry.date,
                    history.source.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Distinct task keys, most recently logged first.
    pub fn recent_tasks(&self, limit: usize) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT task FROM history
             GROUP BY task
             ORDER BY MAX(id) DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// Corrupted template payloads degrade to an empty entry list; losing one
/// template must not brick the whole menu.
fn decode_template_entries(name: &str, json: &str) -> Vec<WorklogEntry> {
    match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("corrupted template data for '{name}': {err}");
            Vec::new()
        }
    }
}

fn default_db_path() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("cannot resolve home directory")?;
    Ok(base.home_dir().join(DATA_DIR).join(DB_FILE))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
