//! Wire types shared with the scoring backend.
//!
//! Field names mirror the backend's JSON verbatim so serde needs no rename
//! attributes. `tfidf_score` is the 0–100 relevance score between the resume
//! and the role's job description; the skill match itself is computed by the
//! backend and only projected here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub job_role: String,
    pub skill_match: SkillMatch,
    /// TF-IDF relevance score, 0–100.
    pub tfidf_score: f64,
    #[serde(default)]
    pub detected_skills: Vec<String>,
    pub recommendation: String,
    /// Recommendation category tag. Caller-controlled string data; parsed
    /// into [`crate::render::RecommendationLevel`] before presentation.
    pub level: String,
    pub contact: ContactInfo,
    /// Learning resources keyed by missing skill name.
    pub resources: BTreeMap<String, LearningResource>,
}

impl AnalysisResult {
    /// Internal consistency check applied after parsing. A payload that
    /// claims more matched skills than the role requires is malformed.
    pub fn check_consistency(&self) -> Result<(), String> {
        let m = &self.skill_match;
        if m.matched_count > m.required_count {
            return Err(format!(
                "matched_count {} exceeds required_count {}",
                m.matched_count, m.required_count
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub matched_count: u32,
    pub required_count: u32,
    /// 0–100.
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub courses: Vec<String>,
    pub websites: Vec<String>,
    pub duration: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill test
// ────────────────────────────────────────────────────────────────────────────

/// `GET /skill-test/{skill}` response. Correct answers never reach the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillTest {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// `POST /check-answers` request body. `answers` holds selected option
/// indices aligned with question order.
#[derive(Debug, Serialize)]
pub struct CheckAnswersRequest<'a> {
    pub skill: &'a str,
    pub answers: &'a [usize],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradedResult {
    /// 0–100.
    pub score: f64,
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
    pub results: Vec<QuestionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionOutcome {
    pub question: String,
    pub user_answer: String,
    pub is_correct: bool,
    /// Only rendered for incorrect answers.
    pub correct_answer: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// History
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub analysis: AnalysisSummary,
}

/// Compact view of a past analysis. Deserializes only what the history list
/// shows; any extra fields the backend stores are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSummary {
    pub job_role: String,
    pub tfidf_score: f64,
    pub skill_match: MatchSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchSummary {
    pub match_percentage: f64,
}
