use chrono::NaiveDate;
use wl_core::ParseContext;

/// Builds the extraction prompt for one invocation.
///
/// Pure: the anchor date is a parameter so relative-date behavior is
/// reproducible under test. The output contract restricts the model to a
/// single JSON array, and the period-expansion rule is anchored by a worked
/// example so spans like "last week" come back as one entry per workday.
pub fn build_prompt(input: &str, context: &ParseContext, today: NaiveDate) -> String {
    let aliases_text = if context.aliases.is_empty() {
        "  (no aliases defined yet)".to_string()
    } else {
        context
            .aliases
            .iter()
            .map(|a| {
                let desc = a
                    .description
                    .as_deref()
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default();
                format!("  - \"{}\" -> {}{desc}", a.keyword, a.task)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let recent_tasks_text = if context.recent_tasks.is_empty() {
        "none".to_string()
    } else {
        context.recent_tasks.join(", ")
    };

    let project = &context.project_key;
    let today_iso = today.format("%Y-%m-%d").to_string();
    let day_name = today.format("%A").to_string();

    format!(
        r#"You are a worklog parser for Jira time tracking.

Project key: {project}

Available task aliases (match by SEMANTIC MEANING, not exact text):
{aliases_text}

Recent tasks: {recent_tasks_text}

Rules:
1. Match activities to aliases by meaning (e.g., "созванивался" -> "созвоны")
2. If user specifies explicit task key ({project}-XXX), use it
3. If activity matches alias semantically, substitute task key directly
4. If unsure which task to use, leave task as null
5. Parse dates: support Russian/English, relative dates (вчера, yesterday, сегодня, today)
6. Parse time: hours (ч, h, часа, hours), minutes (м, m, минут, min)
7. Date format in response: YYYY-MM-DD
8. Activity should be descriptive (what was done)
9. PERIODS: If user specifies a period (неделю, последние N дней, etc):
   - Create separate entries for each WORKDAY (Mon-Fri) in the period
   - Distribute hours equally across workdays, or use the per-day amount if one is stated
   - "неделю" = last 5 workdays (Mon-Fri)
   - "последние 3 дня" = last 3 workdays
   - Skip weekends (Sat, Sun)

Current date: {today_iso} ({day_name}). Calculate all relative dates from this.

User input: "{input}"

Return ONLY valid JSON array, no other text or markdown:
[
  {{
    "activity": "description of work",
    "task": "{project}-XXX or null",
    "hours": number,
    "date": "YYYY-MM-DD"
  }}
]

Examples:
Input: "вчера {project}-123 разработка 3ч"
Output: [{{"activity":"разработка","task":"{project}-123","hours":3,"date":"{today_iso} minus 1 day"}}]
-> Use the actual calculated date, not the text above

Input: "сегодня митинг 1ч"
Output: [{{"activity":"митинг","task":null,"hours":1,"date":"{today_iso}"}}]

Input: "неделю созвоны каждый день по 1.5 часа"
-> Create 5 entries, one per workday (Mon-Fri) of LAST week, 1.5 hours each. Calculate each date from the current date.

Input: "последние 3 дня ревью по 2 часа"
-> Create 3 entries for the last 3 workdays (skip weekends). Calculate from the current date.

Input: "с 20 числа три дня подряд ревью 2ч"
-> Create 3 entries: 20th, 21st, 22nd of the current month (skip weekends if any)."#
    )
}
