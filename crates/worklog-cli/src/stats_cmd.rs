//! `wl stats`: distinct recently logged tasks, newest first.

use anyhow::Result;
use wl_core::Lang;
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, tr};

const RECENT_LIMIT: usize = 10;

pub fn run(store: &Store, lang: Lang) -> Result<()> {
    let recent = store.recent_tasks(RECENT_LIMIT)?;
    if recent.is_empty() {
        display::warning(tr(lang, Msg::NoHistory));
        return Ok(());
    }

    println!("\n{}\n", tr(lang, Msg::RecentTasksHeader));
    for task in recent {
        println!("  {task}");
    }
    println!();
    Ok(())
}
