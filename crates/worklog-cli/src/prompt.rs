use std::io::{self, BufRead, Write};

/// Failure modes of the interactive surface. `Cancelled` (EOF or interrupt
/// mid-prompt) unwinds to a silent, successful exit at the top level.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Cancelled")]
    Cancelled,

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// The interactive surface commands depend on: present choices, get one
/// selection; present a question, get validated text or a boolean. Nothing
/// about rendering leaks past this trait, and tests script it.
pub trait PromptSurface {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize, PromptError>;
    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, PromptError>;
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
    fn password(&mut self, message: &str) -> Result<String, PromptError>;
}

pub fn no_validation(_: &str) -> Result<(), String> {
    Ok(())
}

pub fn non_empty(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        Err("required".to_string())
    } else {
        Ok(())
    }
}

/// Numbered-list prompt over stdin/stdout.
#[derive(Default)]
pub struct StdPrompt;

impl StdPrompt {
    fn read_line(&self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Cancelled);
        }
        Ok(line.trim().to_string())
    }
}

impl PromptSurface for StdPrompt {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize, PromptError> {
        println!("\n{title}");
        for (i, item) in items.iter().enumerate() {
            println!("  {}) {item}", i + 1);
        }
        loop {
            print!("> ");
            io::stdout().flush()?;
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(n) if n >= 1 && n <= items.len() => return Ok(n - 1),
                _ => println!("1-{}", items.len()),
            }
        }
    }

    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, PromptError> {
        loop {
            match default {
                Some(d) if !d.is_empty() => print!("{message} [{d}]: "),
                _ => print!("{message} "),
            }
            io::stdout().flush()?;
            let line = self.read_line()?;
            let value = if line.is_empty() {
                default.unwrap_or_default().to_string()
            } else {
                line
            };
            match validate(&value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{reason}"),
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            print!("{message} {suffix} ");
            io::stdout().flush()?;
            let line = self.read_line()?.to_lowercase();
            match line.as_str() {
                "" => return Ok(default),
                "y" | "yes" | "д" | "да" => return Ok(true),
                "n" | "no" | "н" | "нет" => return Ok(false),
                _ => {}
            }
        }
    }

    fn password(&mut self, message: &str) -> Result<String, PromptError> {
        print!("{message} ");
        io::stdout().flush()?;
        let echo_off = EchoGuard::disable();
        let result = self.read_line();
        drop(echo_off);
        println!();
        result
    }
}

/// Turns terminal echo off for the lifetime of the guard. Best effort: when
/// stdin is not a tty (pipes, tests) the password is read in the clear.
struct EchoGuard {
    #[cfg(unix)]
    saved: Option<libc::termios>,
}

impl EchoGuard {
    #[cfg(unix)]
    fn disable() -> Self {
        // Safety: plain termios calls on fd 0; restored on drop.
        unsafe {
            let mut term: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &mut term) != 0 {
                return Self { saved: None };
            }
            let saved = term;
            term.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &term) != 0 {
                return Self { saved: None };
            }
            Self { saved: Some(saved) }
        }
    }

    #[cfg(not(unix))]
    fn disable() -> Self {
        Self {}
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved {
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod script {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted prompt surface for tests. Every call pops the next queued
    /// answer; validation failures pull further answers, mirroring the
    /// re-ask loop of the real surface.
    #[derive(Default)]
    pub(crate) struct ScriptedPrompt {
        answers: VecDeque<Answer>,
        pub select_calls: Vec<String>,
        pub input_calls: Vec<String>,
        pub confirm_calls: Vec<String>,
    }

    pub(crate) enum Answer {
        Select(usize),
        Input(String),
        Confirm(bool),
        Password(String),
    }

    impl ScriptedPrompt {
        pub fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
                ..Default::default()
            }
        }

        fn next(&mut self) -> Answer {
            self.answers.pop_front().expect("script exhausted")
        }
    }

    impl PromptSurface for ScriptedPrompt {
        fn select(&mut self, title: &str, items: &[String]) -> Result<usize, PromptError> {
            self.select_calls.push(title.to_string());
            match self.next() {
                Answer::Select(i) => {
                    assert!(i < items.len(), "scripted selection out of range");
                    Ok(i)
                }
                _ => panic!("expected scripted select answer for '{title}'"),
            }
        }

        fn input(
            &mut self,
            message: &str,
            default: Option<&str>,
            validate: Validator<'_>,
        ) -> Result<String, PromptError> {
            self.input_calls.push(message.to_string());
            loop {
                match self.next() {
                    Answer::Input(value) => {
                        let value = if value.is_empty() {
                            default.unwrap_or_default().to_string()
                        } else {
                            value
                        };
                        if validate(&value).is_ok() {
                            return Ok(value);
                        }
                    }
                    _ => panic!("expected scripted input answer for '{message}'"),
                }
            }
        }

        fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PromptError> {
            self.confirm_calls.push(message.to_string());
            match self.next() {
                Answer::Confirm(value) => Ok(value),
                _ => panic!("expected scripted confirm answer for '{message}'"),
            }
        }

        fn password(&mut self, _message: &str) -> Result<String, PromptError> {
            match self.next() {
                Answer::Password(value) => Ok(value),
                _ => panic!("expected scripted password answer"),
            }
        }
    }
}
