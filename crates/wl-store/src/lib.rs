//! Local SQLite persistence: configuration, aliases, templates, history.

mod db;

pub use db::Store;
