//! Text normalization shared by the rule-based scorer.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Job;

/// Fragments shorter than this are too generic to match on ("a", "of", "or").
const MIN_FRAGMENT_LEN: usize = 3;

/// "3 years", "3+ years", "2 yrs"
static YEARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b") {
        Ok(regex) => regex,
        Err(err) => panic!("Years regex is invalid: {err}"),
    });

/// Lowercase fragments of a skill or certification, e.g.
/// "Forklift (Class II) / Pallet-Jack" → ["forklift", "class", "pallet", "jack"].
pub fn skill_fragments(skill: &str) -> Vec<String> {
    skill
        .to_lowercase()
        .replace(['(', ')'], " ")
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '-'))
        .filter(|frag| frag.chars().count() >= MIN_FRAGMENT_LEN)
        .map(str::to_string)
        .collect()
}

/// Splits a free-text list ("forklift, customer service; cash") into trimmed items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle)
}

/// Exact or substring match in either direction, case-insensitive and trimmed.
pub fn schedule_matches(preferred: &str, offered: &str) -> bool {
    let preferred = preferred.trim().to_lowercase();
    let offered = offered.trim().to_lowercase();
    if preferred.is_empty() || offered.is_empty() {
        return false;
    }
    preferred == offered || preferred.contains(&offered) || offered.contains(&preferred)
}

/// Description plus requirements, lowercased. The text skills are matched against.
pub fn job_text(job: &Job) -> String {
    let mut text = job.description.clone().unwrap_or_default();
    text.push(' ');
    text.push_str(&job.requirements.joined());
    text.to_lowercase()
}

/// Years of experience a job asks for ("3+ years", "2 yrs"). First mention wins.
pub fn required_years(text: &str) -> Option<i32> {
    YEARS_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
}

/// The schedule a job offers: `job_type` when present, otherwise `schedule`.
pub fn offered_schedule(job: &Job) -> Option<&str> {
    job.job_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .or(job.schedule.as_deref())
        .filter(|s| !s.trim().is_empty())
}
