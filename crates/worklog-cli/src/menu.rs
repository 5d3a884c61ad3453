//! Shared list-manage flow for templates and aliases: pick an item (or
//! create), then pick an action on it. Returns a decision instead of taking
//! callbacks so async callers can act on it themselves.

use wl_core::Lang;

use crate::i18n::{Msg, tr};
use crate::prompt::{PromptError, PromptSurface};

#[derive(Debug, PartialEq, Eq)]
pub enum MenuAction {
    Create,
    Use(usize),
    Edit(usize),
    Delete(usize),
    Back,
}

/// Runs one round of the manage menu over `labels`.
///
/// An empty list short-circuits to `Create` after printing `empty_message`.
/// `with_use` adds a "use" action ahead of edit/delete (templates are
/// runnable, aliases are not).
pub fn manage(
    title: &str,
    labels: &[String],
    empty_message: &str,
    with_use: bool,
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<MenuAction, PromptError> {
    if labels.is_empty() {
        println!("\n{empty_message}\n");
        return Ok(MenuAction::Create);
    }

    let mut choices: Vec<String> = labels.to_vec();
    choices.push(tr(lang, Msg::ActionCreate).to_string());

    let picked = prompt.select(title, &choices)?;
    if picked == labels.len() {
        return Ok(MenuAction::Create);
    }

    let mut actions = Vec::with_capacity(4);
    if with_use {
        actions.push(tr(lang, Msg::ActionUse).to_string());
    }
    actions.push(tr(lang, Msg::ActionEdit).to_string());
    actions.push(tr(lang, Msg::ActionDelete).to_string());
    actions.push(tr(lang, Msg::ActionBack).to_string());

    let action = prompt.select(&labels[picked], &actions)?;
    let offset = if with_use { 1 } else { 0 };

    if with_use && action == 0 {
        return Ok(MenuAction::Use(picked));
    }
    Ok(match action - offset {
        0 => MenuAction::Edit(picked),
        1 => MenuAction::Delete(picked),
        _ => MenuAction::Back,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::script::{Answer, ScriptedPrompt};

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item {i}")).collect()
    }

    #[test]
    fn test_empty_list_goes_straight_to_create() {
        let mut prompt = ScriptedPrompt::new(vec![]);
        let action = manage("T", &[], "empty", false, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(action, MenuAction::Create);
        assert!(prompt.select_calls.is_empty());
    }

    #[test]
    fn test_create_entry_is_last_choice() {
        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(2)]);
        let action = manage("T", &labels(2), "empty", false, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(action, MenuAction::Create);
    }

    #[test]
    fn test_edit_and_delete_without_use() {
        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(1), Answer::Select(0)]);
        let action = manage("T", &labels(3), "empty", false, &mut prompt, Lang::En).unwrap();
        assert_eq!(action, MenuAction::Edit(1));

        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(0), Answer::Select(1)]);
        let action = manage("T", &labels(3), "empty", false, &mut prompt, Lang::En).unwrap();
        assert_eq!(action, MenuAction::Delete(0));
    }

    #[test]
    fn test_use_action_shifts_the_rest() {
        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(0), Answer::Select(0)]);
        let action = manage("T", &labels(1), "empty", true, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(action, MenuAction::Use(0));

        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(0), Answer::Select(1)]);
        let action = manage("T", &labels(1), "empty", true, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(action, MenuAction::Edit(0));

        let mut prompt = ScriptedPrompt::new(vec![Answer::Select(0), Answer::Select(3)]);
        let action = manage("T", &labels(1), "empty", true, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(action, MenuAction::Back);
    }
}
