//! Deterministic preference scoring.
//!
//! Pure and synchronous. Scores a set of candidate preferences against one job
//! out of 100 across six criteria. A missing preference or job field contributes
//! nothing; it is never an error.
//!
//! | criterion  | max |
//! |------------|-----|
//! | schedule   | 30  |
//! | pay        | 25  |
//! | location   | 20  |
//! | field      | 15  |
//! | skills     | 30  |
//! | experience | 10  |
//!
//! The maxima add up to 130, so the sum is capped once at 100.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::normalize::{
    contains_ci, job_text, offered_schedule, required_years, schedule_matches, skill_fragments,
    split_list,
};
use crate::models::Job;

const SCHEDULE_POINTS: i32 = 30;
const PAY_IN_RANGE_POINTS: i32 = 25;
const PAY_ABOVE_MIN_POINTS: i32 = 15;
const LOCATION_POINTS: i32 = 20;
const FIELD_POINTS: i32 = 15;
const POINTS_PER_SKILL: i32 = 5;
const SKILLS_CAP: i32 = 30;
const EXPERIENCE_FULL_POINTS: i32 = 10;
const EXPERIENCE_PARTIAL_POINTS: i32 = 5;
/// Applied when the job states no number of years.
const EXPERIENCE_FLAT_POINTS: i32 = 5;
const EXPERIENCE_FLAT_MIN_YEARS: i32 = 2;
const MAX_SCORE: i32 = 100;

/// Reasons shown to a caller alongside a score.
pub const REASON_PREVIEW_LEN: usize = 3;

/// What a job seeker is looking for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePreferences {
    pub schedule: Option<String>,
    pub min_pay: Option<Decimal>,
    pub max_pay: Option<Decimal>,
    pub location: Option<String>,
    pub preferred_field: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub certifications: Vec<String>,
    pub experience_years: Option<i32>,
}

/// Accepts `"forklift, cash handling"` as well as `["forklift", "cash handling"]`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        Some(StringOrList::Text(text)) => split_list(&text),
        Some(StringOrList::List(items)) => items
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    })
}

/// Points earned per criterion before the overall cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub schedule: i32,
    pub pay: i32,
    pub location: i32,
    pub field: i32,
    pub skills: i32,
    pub experience: i32,
}

impl ScoreBreakdown {
    fn total(&self) -> i32 {
        self.schedule + self.pay + self.location + self.field + self.skills + self.experience
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleScore {
    pub score: i32,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl RuleScore {
    pub fn preview(&self) -> Vec<String> {
        self.reasons.iter().take(REASON_PREVIEW_LEN).cloned().collect()
    }
}

/// Scores one job against a set of preferences.
pub fn score_deterministic(prefs: &CandidatePreferences, job: &Job) -> RuleScore {
    let mut reasons = Vec::new();
    let breakdown = ScoreBreakdown {
        schedule: schedule_points(prefs, job, &mut reasons),
        pay: pay_points(prefs, job, &mut reasons),
        location: location_points(prefs, job, &mut reasons),
        field: field_points(prefs, job, &mut reasons),
        skills: skill_points(prefs, job, &mut reasons),
        experience: experience_points(prefs, job, &mut reasons),
    };

    RuleScore {
        score: breakdown.total().min(MAX_SCORE),
        reasons,
        breakdown,
    }
}

fn schedule_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let (Some(preferred), Some(offered)) = (prefs.schedule.as_deref(), offered_schedule(job)) else {
        return 0;
    };
    if schedule_matches(preferred, offered) {
        reasons.push(format!("Schedule: {offered} matches your {preferred} preference"));
        SCHEDULE_POINTS
    } else {
        0
    }
}

fn pay_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let (Some(pay), Some(min)) = (job.pay, prefs.min_pay) else {
        return 0;
    };
    match prefs.max_pay {
        Some(max) if pay >= min && pay <= max => {
            reasons.push(format!("Pay: ${pay}/hr is within your ${min}-${max} range"));
            PAY_IN_RANGE_POINTS
        }
        None if pay >= min => {
            reasons.push(format!("Pay: ${pay}/hr meets your minimum of ${min}"));
            PAY_ABOVE_MIN_POINTS
        }
        _ => 0,
    }
}

fn location_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let (Some(preferred), Some(location)) = (prefs.location.as_deref(), job.location.as_deref())
    else {
        return 0;
    };
    if contains_ci(location, preferred) {
        reasons.push(format!("Location: {location} matches your preference"));
        LOCATION_POINTS
    } else {
        0
    }
}

fn field_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let Some(field) = prefs.preferred_field.as_deref() else {
        return 0;
    };
    let description = job.description.as_deref().unwrap_or_default();
    if contains_ci(&job.title, field) || contains_ci(description, field) {
        reasons.push(format!("Field: matches your preferred field ({})", field.trim()));
        FIELD_POINTS
    } else {
        0
    }
}

fn skill_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let text = job_text(job);

    let mut seen: Vec<String> = Vec::new();
    let mut matched = 0;
    for skill in &prefs.skills {
        let key = skill.trim().to_lowercase();
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        if skill_fragments(skill).iter().any(|frag| text.contains(frag.as_str())) {
            matched += 1;
            reasons.push(format!("Skill match: {}", skill.trim()));
        }
    }

    let fragments: Vec<String> = prefs
        .skills
        .iter()
        .chain(prefs.certifications.iter())
        .flat_map(|s| skill_fragments(s))
        .collect();
    for line in job.requirements.lines() {
        let lowered = line.to_lowercase();
        if fragments.iter().any(|frag| lowered.contains(frag.as_str())) {
            reasons.push(format!("Meets requirement: {line}"));
        }
    }

    (matched * POINTS_PER_SKILL).min(SKILLS_CAP)
}

fn experience_points(prefs: &CandidatePreferences, job: &Job, reasons: &mut Vec<String>) -> i32 {
    let Some(years) = prefs.experience_years else {
        return 0;
    };
    match required_years(&job_text(job)) {
        Some(required) if years >= required => {
            reasons.push(format!("Experience: {years} years meets the {required}-year requirement"));
            EXPERIENCE_FULL_POINTS
        }
        Some(required) if years >= required - 1 => {
            reasons.push(format!("Experience: {years} years is close to the {required}-year requirement"));
            EXPERIENCE_PARTIAL_POINTS
        }
        Some(_) => 0,
        None if years >= EXPERIENCE_FLAT_MIN_YEARS => {
            reasons.push(format!("Experience: {years} years of work experience"));
            EXPERIENCE_FLAT_POINTS
        }
        None => 0,
    }
}

/// One job in a deterministic search result.
#[derive(Debug, Clone, Serialize)]
pub struct RuleMatch {
    pub job: Job,
    pub score: i32,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Scores every job, drops the ones that earned nothing and sorts by score
/// descending. Ties keep their input order.
pub fn rank_jobs(prefs: &CandidatePreferences, jobs: Vec<Job>) -> Vec<RuleMatch> {
    let mut ranked: Vec<RuleMatch> = jobs
        .into_iter()
        .filter_map(|job| {
            let result = score_deterministic(prefs, &job);
            (result.score > 0).then(|| RuleMatch {
                reasons: result.preview(),
                score: result.score,
                breakdown: result.breakdown,
                job,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Requirements;
    use crate::testing::make_job;

    fn prefs() -> CandidatePreferences {
        CandidatePreferences::default()
    }

    #[test]
    fn test_two_matching_skills_earn_ten_points() {
        let mut job = make_job("Warehouse Associate");
        job.requirements = Requirements::Text(
            "Must be forklift certified and provide excellent customer service".to_string(),
        );
        let p = CandidatePreferences {
            skills: vec!["forklift".to_string(), "customer service".to_string()],
            ..prefs()
        };

        let result = score_deterministic(&p, &job);
        assert_eq!(result.breakdown.skills, 10);
        assert!(result.reasons.iter().any(|r| r.contains("forklift")));
        assert!(result.reasons.iter().any(|r| r.contains("customer service")));
    }

    #[test]
    fn test_schedule_mismatch_earns_nothing() {
        let mut job = make_job("Cashier");
        job.job_type = Some("Full-time".to_string());
        let p = CandidatePreferences {
            schedule: Some("Part-time".to_string()),
            ..prefs()
        };
        assert_eq!(score_deterministic(&p, &job).breakdown.schedule, 0);

        let p = CandidatePreferences {
            schedule: Some("full-time".to_string()),
            ..prefs()
        };
        assert_eq!(score_deterministic(&p, &job).breakdown.schedule, 30);
    }

    #[test]
    fn test_pay_inside_and_above_range() {
        let p = CandidatePreferences {
            min_pay: Some(Decimal::from(15)),
            max_pay: Some(Decimal::from(25)),
            ..prefs()
        };
        let mut job = make_job("Picker");

        job.pay = Some(Decimal::from(18));
        assert_eq!(score_deterministic(&p, &job).breakdown.pay, 25);

        job.pay = Some(Decimal::from(30));
        assert_eq!(score_deterministic(&p, &job).breakdown.pay, 0);

        job.pay = Some(Decimal::from(25));
        assert_eq!(score_deterministic(&p, &job).breakdown.pay, 25);
    }

    #[test]
    fn test_pay_with_only_minimum() {
        let mut job = make_job("Picker");
        job.pay = Some(Decimal::new(205, 1));

        let min_only = CandidatePreferences {
            min_pay: Some(Decimal::from(18)),
            ..prefs()
        };
        assert_eq!(score_deterministic(&min_only, &job).breakdown.pay, 15);

        let max_only = CandidatePreferences {
            max_pay: Some(Decimal::from(25)),
            ..prefs()
        };
        assert_eq!(score_deterministic(&max_only, &job).breakdown.pay, 0);
    }

    #[test]
    fn test_skills_are_capped_and_monotone() {
        let mut job = make_job("Generalist");
        job.description = Some(
            "forklift pallet inventory shipping receiving packing scanning loading".to_string(),
        );
        let all = [
            "forklift", "pallet", "inventory", "shipping", "receiving", "packing", "scanning",
            "loading",
        ];

        let mut last = 0;
        for n in 0..=all.len() {
            let p = CandidatePreferences {
                skills: all[..n].iter().map(|s| s.to_string()).collect(),
                ..prefs()
            };
            let result = score_deterministic(&p, &job);
            assert!(result.score >= last, "score dropped when adding skill #{n}");
            assert!(result.breakdown.skills <= 30);
            last = result.score;
        }
        assert_eq!(last, 30);
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let mut job = make_job("Forklift Operator");
        job.description = Some("Warehouse forklift work, 2 years required".to_string());
        job.requirements = Requirements::List(vec![
            "forklift".to_string(),
            "pallet".to_string(),
            "inventory".to_string(),
            "shipping".to_string(),
            "receiving".to_string(),
            "packing".to_string(),
        ]);
        job.pay = Some(Decimal::from(20));
        job.location = Some("Dallas, TX".to_string());
        job.job_type = Some("Full-time".to_string());

        let p = CandidatePreferences {
            schedule: Some("Full-time".to_string()),
            min_pay: Some(Decimal::from(15)),
            max_pay: Some(Decimal::from(25)),
            location: Some("dallas".to_string()),
            preferred_field: Some("forklift".to_string()),
            skills: ["forklift", "pallet", "inventory", "shipping", "receiving", "packing"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            certifications: vec![],
            experience_years: Some(3),
        };

        let result = score_deterministic(&p, &job);
        assert_eq!(result.breakdown.total(), 130);
        assert_eq!(result.score, 100);
        assert_eq!(result.preview().len(), REASON_PREVIEW_LEN);
    }

    #[test]
    fn test_experience_against_stated_years() {
        let mut job = make_job("Lead");
        job.description = Some("Requires 3+ years of experience".to_string());
        let with = |years| CandidatePreferences {
            experience_years: Some(years),
            ..prefs()
        };

        assert_eq!(score_deterministic(&with(3), &job).breakdown.experience, 10);
        assert_eq!(score_deterministic(&with(2), &job).breakdown.experience, 5);
        assert_eq!(score_deterministic(&with(1), &job).breakdown.experience, 0);

        job.description = Some("No number stated".to_string());
        assert_eq!(score_deterministic(&with(2), &job).breakdown.experience, 5);
        assert_eq!(score_deterministic(&with(1), &job).breakdown.experience, 0);
    }

    #[test]
    fn test_rank_jobs_drops_zero_and_keeps_tie_order() {
        let mut a = make_job("Forklift Driver A");
        a.location = Some("Austin".to_string());
        let mut b = make_job("Cashier");
        b.location = Some("Boston".to_string());
        let mut c = make_job("Forklift Driver C");
        c.location = Some("Austin".to_string());

        let p = CandidatePreferences {
            location: Some("austin".to_string()),
            ..prefs()
        };
        let ranked = rank_jobs(&p, vec![a.clone(), b, c.clone()]);
        let ids: Vec<_> = ranked.iter().map(|m| m.job.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_preferences_accept_comma_separated_skills() {
        let p: CandidatePreferences =
            serde_json::from_str(r#"{"skills": "forklift, cash handling", "min_pay": 15}"#).unwrap();
        assert_eq!(p.skills, vec!["forklift", "cash handling"]);
        assert_eq!(p.min_pay, Some(Decimal::from(15)));
        assert!(p.certifications.is_empty());
    }
}
