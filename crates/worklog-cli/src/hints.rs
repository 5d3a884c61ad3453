//! Outermost error boundary: turn failures into short actionable messages
//! instead of a debug dump. Matches on error type first, message text second.

use anyhow::Error;
use wl_ai::ParseError;
use wl_core::{AppError, Lang};
use wl_jira::TrackerError;

use crate::i18n::{Msg, fill, tr};
use crate::prompt::PromptError;

/// A user backing out (Ctrl-D, declined menu) is not a failure.
pub fn is_cancellation(err: &Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<AppError>(), Some(AppError::Cancelled))
            || matches!(cause.downcast_ref::<PromptError>(), Some(PromptError::Cancelled))
    })
}

/// Prints the diagnosis for `err` to stderr and returns the exit code.
pub fn report(err: &Error, lang: Lang) -> i32 {
    if is_cancellation(err) {
        return 0;
    }

    let lines = diagnose(err, lang);
    eprintln!();
    for line in lines {
        eprintln!("{line}");
    }
    eprintln!();
    1
}

fn diagnose(err: &Error, lang: Lang) -> Vec<String> {
    for cause in err.chain() {
        if let Some(app_err) = cause.downcast_ref::<AppError>() {
            match app_err {
                AppError::ConfigMissing => {
                    return vec![
                        format!("❌ {}", tr(lang, Msg::ConfigMissing)),
                        tr(lang, Msg::RunSetup).to_string(),
                    ];
                }
                AppError::TasksNotFound(_) => {
                    return vec![
                        format!("❌ {}", tr(lang, Msg::TaskMissing)),
                        tr(lang, Msg::CheckTaskKey).to_string(),
                    ];
                }
                AppError::Cancelled => {}
            }
        }

        if let Some(tracker_err) = cause.downcast_ref::<TrackerError>() {
            match tracker_err {
                TrackerError::Network(_) => {
                    let mut lines = vec![format!("❌ {}", tr(lang, Msg::CantConnect))];
                    lines.extend(footer(lang));
                    return lines;
                }
                TrackerError::Auth => {
                    return vec![
                        format!("❌ {}", tr(lang, Msg::BadCredentials)),
                        tr(lang, Msg::FixWithSetup).to_string(),
                    ];
                }
                _ => {}
            }
        }

        if let Some(parse_err) = cause.downcast_ref::<ParseError>() {
            if let ParseError::Transport { status, .. } = parse_err {
                match status {
                    Some(401) | Some(403) => {
                        return vec![
                            format!("❌ {}", tr(lang, Msg::BadApiKey)),
                            tr(lang, Msg::GetKeyHeader).to_string(),
                            tr(lang, Msg::GetKeyAnthropic).to_string(),
                            tr(lang, Msg::GetKeyOpenAi).to_string(),
                            tr(lang, Msg::ConfigureSetup).to_string(),
                        ];
                    }
                    Some(429) => {
                        return vec![
                            format!("❌ {}", tr(lang, Msg::RateLimited)),
                            tr(lang, Msg::RateLimitHint).to_string(),
                        ];
                    }
                    _ => {}
                }
            }
        }
    }

    let mut lines = vec![format!(
        "❌ {}",
        fill(tr(lang, Msg::GenericError), &[("msg", &root_message(err))])
    )];
    lines.extend(footer(lang));
    lines
}

fn footer(lang: Lang) -> Vec<String> {
    vec![
        String::new(),
        tr(lang, Msg::FooterHeader).to_string(),
        tr(lang, Msg::FooterVpn).to_string(),
        tr(lang, Msg::FooterBrowser).to_string(),
        tr(lang, Msg::FooterSetup).to_string(),
    ]
}

fn root_message(err: &Error) -> String {
    let text = err.to_string();
    if text.is_empty() {
        // tr always has both languages, so this never depends on config
        tr(Lang::En, Msg::UnknownError).to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_cancellation_is_silent_success() {
        let err: Error = AppError::Cancelled.into();
        assert!(is_cancellation(&err));
        assert_eq!(report(&err, Lang::Ru), 0);

        let wrapped = anyhow!(PromptError::Cancelled).context("reading menu choice");
        assert!(is_cancellation(&wrapped));
    }

    #[test]
    fn test_config_missing_points_at_setup() {
        let err: Error = AppError::ConfigMissing.into();
        let lines = diagnose(&err, Lang::En);
        assert!(lines[0].contains("Configuration not found"));
        assert!(lines[1].contains("wl setup"));
    }

    #[test]
    fn test_auth_error_through_context_chain() {
        let err = anyhow!(TrackerError::Auth).context("validating tasks");
        let lines = diagnose(&err, Lang::En);
        assert!(lines[0].contains("Invalid username or password"));
    }

    #[test]
    fn test_ai_401_lists_key_consoles() {
        let err: Error = ParseError::Transport {
            status: Some(401),
            message: "unauthorized".into(),
        }
        .into();
        let lines = diagnose(&err, Lang::Ru);
        assert!(lines.iter().any(|l| l.contains("console.anthropic.com")));
        assert!(lines.iter().any(|l| l.contains("platform.openai.com")));
    }

    #[test]
    fn test_rate_limit_suggests_templates() {
        let err: Error = ParseError::Transport {
            status: Some(429),
            message: "too many requests".into(),
        }
        .into();
        let lines = diagnose(&err, Lang::En);
        assert!(lines[1].contains("wl t"));
    }

    #[test]
    fn test_network_error_gets_troubleshooting_footer() {
        let err: Error = TrackerError::Network("connection refused".into()).into();
        let lines = diagnose(&err, Lang::En);
        assert!(lines[0].contains("Cannot connect"));
        assert!(lines.iter().any(|l| l.contains("VPN")));
    }

    #[test]
    fn test_unknown_error_falls_back_to_generic() {
        let err = anyhow!("disk full");
        let lines = diagnose(&err, Lang::En);
        assert!(lines[0].contains("disk full"));
        assert!(lines.iter().any(|l| l.contains("wl setup")));
    }
}
