//! Bare `wl`: first-run welcome, then the looping main menu.

use anyhow::Result;
use wl_core::Lang;
use wl_store::Store;

use crate::i18n::{Msg, tr};
use crate::prompt::{PromptSurface, non_empty};
use crate::{alias_cmd, quick_cmd, setup_cmd, stats_cmd, template_cmd};

pub async fn run(store: &mut Store, prompt: &mut dyn PromptSurface) -> Result<()> {
    let Some(config) = store.get_config()? else {
        let lang = Lang::default();
        println!("\n{}", tr(lang, Msg::Welcome));
        println!("{}\n", tr(lang, Msg::WelcomeSetupNeeded));
        if prompt.confirm(tr(lang, Msg::StartSetupQ), true)? {
            setup_cmd::run(store, prompt, lang).await?;
        } else {
            println!("\n{}\n", tr(lang, Msg::RunSetupLater));
        }
        return Ok(());
    };
    let mut lang = config.lang;

    loop {
        let choices = vec![
            tr(lang, Msg::MenuQuick).to_string(),
            tr(lang, Msg::MenuTemplates).to_string(),
            tr(lang, Msg::MenuAliases).to_string(),
            tr(lang, Msg::MenuStats).to_string(),
            tr(lang, Msg::MenuSetup).to_string(),
            tr(lang, Msg::MenuExit).to_string(),
        ];
        let choice = prompt.select(tr(lang, Msg::WhatToDo), &choices)?;

        // Setup can rewrite anything, reload before acting.
        let config = quick_cmd::require_config(store)?;
        lang = config.lang;

        match choice {
            0 => {
                let input = prompt.input(tr(lang, Msg::EnterTextQ), None, &non_empty)?;
                quick_cmd::run(store, &config, &input, prompt).await?;
            }
            1 => template_cmd::run(store, &config, prompt).await?,
            2 => alias_cmd::run(store, prompt, lang)?,
            3 => stats_cmd::run(store, lang)?,
            4 => setup_cmd::run(store, prompt, lang).await?,
            _ => {
                println!("\n{}\n", tr(lang, Msg::Goodbye));
                return Ok(());
            }
        }
    }
}
