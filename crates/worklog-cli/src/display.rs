use std::io::Write;

use wl_core::{Alias, BatchResult, Lang, Template, WorklogEntry};

use crate::i18n::{Msg, fill, tr};

const MONTHS_RU: [&str; 12] = [
    "янв", "фев", "мар", "апр", "май", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Aligned preview of the batch: date, task, activity, hours, plus a summed
/// footer. Shown before the final confirmation.
pub fn preview(entries: &[WorklogEntry], lang: Lang) {
    println!("\n{}\n", tr(lang, Msg::Preview));

    let task_width = entries
        .iter()
        .map(|e| e.task.as_deref().unwrap_or("???").chars().count())
        .max()
        .unwrap_or(3);
    let activity_width = entries
        .iter()
        .map(|e| e.activity.chars().count())
        .max()
        .unwrap_or(0)
        .max(20);

    for entry in entries {
        let task = entry.task.as_deref().unwrap_or("???");
        println!(
            "  {}  {}  {}  {}{}",
            format_date(&entry.date, lang),
            pad(task, task_width),
            pad(&entry.activity, activity_width),
            trim_hours(entry.hours),
            hours_unit(lang),
        );
    }

    let total: f64 = entries.iter().map(|e| e.hours).sum();
    println!(
        "\n  {}: {}{}\n",
        tr(lang, Msg::Total),
        trim_hours(total),
        hours_unit(lang)
    );
}

// char-count padding; format! pads by bytes, which misaligns Cyrillic text.
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}

fn hours_unit(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "ч",
        Lang::En => "h",
    }
}

fn trim_hours(hours: f64) -> String {
    if (hours.fract()).abs() < f64::EPSILON {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

/// `2025-06-06` → `6 июн 2025` (ru) / `6 Jun 2025` (en). Dates reaching
/// display have already passed validation; fall back to the raw string
/// defensively anyway.
pub fn format_date(iso_date: &str, lang: Lang) -> String {
    let mut parts = iso_date.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return iso_date.to_string();
    };
    let (Ok(month_num), Ok(day_num)) = (month.parse::<usize>(), day.parse::<u32>()) else {
        return iso_date.to_string();
    };
    if !(1..=12).contains(&month_num) {
        return iso_date.to_string();
    }
    let months = match lang {
        Lang::Ru => &MONTHS_RU,
        Lang::En => &MONTHS_EN,
    };
    format!("{day_num} {} {year}", months[month_num - 1])
}

pub fn success(count: usize, lang: Lang) {
    let line = match lang {
        Lang::Ru => format!(
            "✓ Залогировано {count} {}",
            pluralize_ru(count, "запись", "записи", "записей")
        ),
        Lang::En => format!(
            "✓ Logged {count} {}",
            if count == 1 { "entry" } else { "entries" }
        ),
    };
    println!("\n{line}\n");
}

pub fn warning(message: &str) {
    println!("\n⚠️  {message}\n");
}

pub fn error(message: &str) {
    eprintln!("\n❌ {message}\n");
}

/// Russian three-form plural: 1 запись, 2 записи, 5 записей.
pub fn pluralize_ru(n: usize, one: &'static str, few: &'static str, many: &'static str) -> &'static str {
    if n % 10 == 1 && n % 100 != 11 {
        one
    } else if (2..=4).contains(&(n % 10)) && !(10..20).contains(&(n % 100)) {
        few
    } else {
        many
    }
}

/// Menu line for one template: name, entry count, summed hours.
pub fn template_label(template: &Template, lang: Lang) -> String {
    let n = template.entries.len();
    let count = match lang {
        Lang::Ru => format!("{n} {}", pluralize_ru(n, "запись", "записи", "записей")),
        Lang::En => format!("{n} {}", if n == 1 { "entry" } else { "entries" }),
    };
    format!(
        "{} — {count}, {}{}",
        template.name,
        trim_hours(template.total_hours()),
        hours_unit(lang)
    )
}

/// Menu line for one alias: keyword, target, optional description.
pub fn alias_label(alias: &Alias) -> String {
    match &alias.description {
        Some(description) => format!("{} → {} ({description})", alias.keyword, alias.task),
        None => format!("{} → {}", alias.keyword, alias.task),
    }
}

pub fn progress(current: usize, total: usize, item: &str) {
    print!("  [{current}/{total}] {item}... ");
    let _ = std::io::stdout().flush();
}

pub fn progress_result(success: bool) {
    println!("{}", if success { "✓" } else { "✗" });
}

pub fn batch_result(result: &BatchResult, lang: Lang) {
    if !result.success.is_empty() {
        success(result.success.len(), lang);
    }
    if !result.failed.is_empty() {
        eprintln!(
            "{}\n",
            fill(
                tr(lang, Msg::FailedN),
                &[("n", &result.failed.len().to_string())]
            )
        );
        for failed in &result.failed {
            eprintln!(
                "  {}: {}",
                failed.entry.task.as_deref().unwrap_or("???"),
                failed.error
            );
        }
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_ru_and_en() {
        assert_eq!(format_date("2025-06-06", Lang::Ru), "6 июн 2025");
        assert_eq!(format_date("2025-12-31", Lang::En), "31 Dec 2025");
        assert_eq!(format_date("2025-01-09", Lang::Ru), "9 янв 2025");
    }

    #[test]
    fn test_format_date_falls_back_on_garbage() {
        assert_eq!(format_date("garbage", Lang::Ru), "garbage");
        assert_eq!(format_date("2025-13-01", Lang::Ru), "2025-13-01");
    }

    #[test]
    fn test_pluralize_ru_forms() {
        assert_eq!(pluralize_ru(1, "запись", "записи", "записей"), "запись");
        assert_eq!(pluralize_ru(3, "запись", "записи", "записей"), "записи");
        assert_eq!(pluralize_ru(5, "запись", "записи", "записей"), "записей");
        assert_eq!(pluralize_ru(11, "запись", "записи", "записей"), "записей");
        assert_eq!(pluralize_ru(21, "запись", "записи", "записей"), "запись");
        assert_eq!(pluralize_ru(104, "запись", "записи", "записей"), "записи");
    }

    #[test]
    fn test_trim_hours() {
        assert_eq!(trim_hours(3.0), "3");
        assert_eq!(trim_hours(1.5), "1.5");
        assert_eq!(trim_hours(0.25), "0.25");
    }

    #[test]
    fn test_labels() {
        let template = Template {
            name: "дейлики".into(),
            entries: vec![
                WorklogEntry {
                    task: Some("PROJ-1".into()),
                    activity: "созвон".into(),
                    hours: 0.5,
                    date: String::new(),
                },
                WorklogEntry {
                    task: Some("PROJ-2".into()),
                    activity: "ревью".into(),
                    hours: 1.5,
                    date: String::new(),
                },
            ],
            usage_count: 0,
            last_used_at: None,
            created_at: None,
        };
        assert_eq!(template_label(&template, Lang::Ru), "дейлики — 2 записи, 2ч");
        assert_eq!(template_label(&template, Lang::En), "дейлики — 2 entries, 2h");

        let alias = Alias {
            keyword: "созвоны".into(),
            task: "PROJ-42".into(),
            description: None,
            usage_count: 0,
            last_used_at: None,
            created_at: None,
        };
        assert_eq!(alias_label(&alias), "созвоны → PROJ-42");
    }

    #[test]
    fn test_pad_counts_chars_not_bytes() {
        // "созвоны" is 7 chars but 14 bytes.
        assert_eq!(pad("созвоны", 9).chars().count(), 9);
    }
}
