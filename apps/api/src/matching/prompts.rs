// LLM prompt constants for match assessment.

/// System prompt for candidate/job assessment. Forces a JSON-only reply.
pub const MATCH_SYSTEM: &str = "You are an expert hiring assistant for a staffing platform \
    that connects hourly workers with jobs. You assess how well a candidate fits a job. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Assessment prompt template. Replace every `{placeholder}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Assess how well this candidate fits this job.

CANDIDATE
- Skills: {skills}
- Experience: {experience_years} years
- Certifications: {certifications}
- Education: {education}
- Preferred language: {language}

JOB
- Title: {title}
- Company: {company}
- Pay: {pay}
- Location: {location}
- Schedule: {schedule}
- Description: {description}
- Requirements: {requirements}

SCORING RUBRIC (total 100):
- Skills match: 40 points
- Experience level: 25 points
- Certifications (especially safety certifications such as forklift): 15 points
- Location / schedule fit: 10 points
- Education / language compatibility: 10 points

CALIBRATION:
- Reward partial and keyword overlap generously. A candidate with some related skills is a
  reasonable match, not a poor one.
- Only score below 50 when there is NO skill overlap at all or a clear disqualifier
  (missing a mandatory certification, cannot communicate in the job's language).
- 70 or higher means a good match worth interviewing.

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 0,
  "reasoning": "One or two sentences explaining the score",
  "strengths": ["strength relevant to this role"],
  "red_flags": ["concern, or an empty array if none"],
  "recommendation": "proceed_to_interview"
}

"match_score" is an integer from 0 to 100.
"recommendation" is exactly one of: "proceed_to_interview", "maybe", "not_a_fit"."#;
