//! Skill-test sub-flow: `closed → listing → loading → answering → grading →
//! graded → closed`.
//!
//! The flow owns the single active [`QuizSession`]; starting a new test tears
//! the previous one down, and an incomplete answer sheet is a first-class
//! [`QuizSubmit::Incomplete`] outcome, never an error and never a request.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::http::Backend;
use crate::models::{CheckAnswersRequest, GradedResult, QuizQuestion, SkillTest};

/// Skills for which a graded assessment exists. Only skills in this list are
/// ever offered as clickable test candidates.
pub const TESTABLE_SKILLS: &[&str] = &[
    "Python",
    "SQL",
    "JavaScript",
    "React",
    "Git",
    "Excel",
    "HTML",
    "CSS",
    "Pandas",
    "NumPy",
];

pub const NO_TEST_NOTICE: &str = "No test available for this skill";
pub const CHECK_FAILED_NOTICE: &str = "Error checking answers";

/// Detected skills that have an assessment, in detection order.
pub fn testable_skills(detected: &[String]) -> Vec<String> {
    detected
        .iter()
        .filter(|skill| TESTABLE_SKILLS.contains(&skill.as_str()))
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

/// One quiz attempt. Answers accumulate per question as the user interacts;
/// the session is destroyed on close or once grading succeeds.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub skill: String,
    pub questions: Vec<QuizQuestion>,
    selected: HashMap<usize, usize>,
}

impl QuizSession {
    fn new(skill: String, questions: Vec<QuizQuestion>) -> Self {
        QuizSession {
            skill,
            questions,
            selected: HashMap::new(),
        }
    }

    /// Records a single-choice answer; reselecting overwrites. Returns false
    /// for an out-of-range question or option index.
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        let Some(q) = self.questions.get(question) else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }
        self.selected.insert(question, option);
        true
    }

    pub fn answer_for(&self, question: usize) -> Option<usize> {
        self.selected.get(&question).copied()
    }

    /// Question indices still waiting for an answer, in question order.
    pub fn unanswered(&self) -> Vec<usize> {
        (0..self.questions.len())
            .filter(|i| !self.selected.contains_key(i))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unanswered().is_empty()
    }

    /// Selected option indices aligned with question order. `None` until the
    /// sheet is complete.
    pub fn answers_in_order(&self) -> Option<Vec<usize>> {
        (0..self.questions.len())
            .map(|i| self.selected.get(&i).copied())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub enum QuizState {
    #[default]
    Closed,
    /// Candidate skills are shown; nothing fetched yet.
    Listing,
    Loading {
        skill: String,
    },
    Answering(QuizSession),
    Graded(GradedResult),
}

/// Outcome of a submit attempt that did not fail outright.
#[derive(Debug, PartialEq, Eq)]
pub enum QuizSubmit {
    /// Grading succeeded; the flow is now `Graded`.
    Graded,
    /// Unanswered question indices. Detected locally; no request was made.
    Incomplete(Vec<usize>),
}

#[derive(Debug, Default)]
pub struct QuizFlow {
    state: QuizState,
    /// Testable skills from the current analysis. Retained across quiz
    /// open/close so the badges stay clickable.
    candidates: Vec<String>,
    notice: Option<String>,
}

impl QuizFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// User-facing notice from the last failed transition, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Feeds the detected skills from a fresh analysis. With no testable
    /// skill the section stays hidden and the machine stays `Closed`.
    pub fn open(&mut self, detected_skills: &[String]) -> &QuizState {
        self.candidates = testable_skills(detected_skills);
        self.notice = None;
        self.state = if self.candidates.is_empty() {
            QuizState::Closed
        } else {
            QuizState::Listing
        };
        &self.state
    }

    /// Fetches the quiz for `skill` and moves to `Answering`. Any open
    /// session or graded view is torn down first. On fetch failure the
    /// machine returns to `Listing` with a notice and no residual quiz state.
    pub async fn start(&mut self, backend: &Backend, skill: &str) -> &QuizState {
        if !self.candidates.iter().any(|s| s == skill) {
            debug!("start refused: {skill} is not a listed candidate");
            self.notice = Some(NO_TEST_NOTICE.to_string());
            return &self.state;
        }

        self.notice = None;
        self.state = QuizState::Loading {
            skill: skill.to_string(),
        };

        self.state = match fetch_test(backend, skill).await {
            Ok(test) => QuizState::Answering(QuizSession::new(skill.to_string(), test.questions)),
            Err(err) => {
                warn!("skill test fetch failed: {err:?}");
                self.notice = Some(NO_TEST_NOTICE.to_string());
                QuizState::Listing
            }
        };
        &self.state
    }

    /// Records an answer on the active session. No-op outside `Answering`.
    pub fn select_answer(&mut self, question: usize, option: usize) -> bool {
        match &mut self.state {
            QuizState::Answering(session) => session.select(question, option),
            _ => false,
        }
    }

    /// Submits the active sheet for grading.
    ///
    /// An incomplete sheet is reported as `Ok(QuizSubmit::Incomplete)` before
    /// any network activity; this is routine interaction, not an error, so it
    /// is logged at debug level only. A transport or server failure returns
    /// the machine to `Answering` with every selection intact.
    pub async fn submit_answers(&mut self, backend: &Backend) -> Result<QuizSubmit, ClientError> {
        let QuizState::Answering(session) = &self.state else {
            return Err(ClientError::Server("No quiz in progress".to_string()));
        };

        let Some(answers) = session.answers_in_order() else {
            let unanswered = session.unanswered();
            debug!("quiz submit blocked: {} unanswered", unanswered.len());
            return Ok(QuizSubmit::Incomplete(unanswered));
        };

        // Grading leaves the session recoverable on failure.
        let skill = session.skill.clone();
        let outcome = grade(backend, &skill, &answers).await;
        match outcome {
            Ok(graded) => {
                self.state = QuizState::Graded(graded);
                self.notice = None;
                Ok(QuizSubmit::Graded)
            }
            Err(err) => {
                warn!("answer check failed: {err:?}");
                self.notice = Some(CHECK_FAILED_NOTICE.to_string());
                Err(err)
            }
        }
    }

    pub fn graded(&self) -> Option<&GradedResult> {
        match &self.state {
            QuizState::Graded(result) => Some(result),
            _ => None,
        }
    }

    /// Discards the active session and any graded result. The candidate list
    /// survives so another test can be started.
    pub fn close(&mut self) {
        self.state = if self.candidates.is_empty() {
            QuizState::Closed
        } else {
            QuizState::Listing
        };
        self.notice = None;
    }
}

/// `GET /skill-test/{skill}`.
async fn fetch_test(backend: &Backend, skill: &str) -> Result<SkillTest, ClientError> {
    let response = backend
        .http()
        .get(backend.url(&format!("/skill-test/{skill}")))
        .send()
        .await?;
    backend.read_json(response).await
}

/// `POST /check-answers`.
async fn grade(
    backend: &Backend,
    skill: &str,
    answers: &[usize],
) -> Result<GradedResult, ClientError> {
    let response = backend
        .http()
        .post(backend.url("/check-answers"))
        .json(&CheckAnswersRequest { skill, answers })
        .send()
        .await?;
    backend.read_json(response).await
}

// ────────────────────────────────────────────────────────────────────────────
// Graded view projection
// ────────────────────────────────────────────────────────────────────────────

/// One row of the per-question breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub question: String,
    pub user_answer: String,
    pub is_correct: bool,
    /// Populated only when the answer was wrong.
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradedView {
    pub score: f64,
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
    pub banner: &'static str,
    pub breakdown: Vec<BreakdownRow>,
}

/// Pure projection of a graded result for display.
pub fn render_graded(result: &GradedResult) -> GradedView {
    GradedView {
        score: result.score,
        correct: result.correct,
        total: result.total,
        passed: result.passed,
        banner: if result.passed {
            "Passed!"
        } else {
            "Needs Improvement"
        },
        breakdown: result
            .results
            .iter()
            .map(|r| BreakdownRow {
                question: r.question.clone(),
                user_answer: r.user_answer.clone(),
                is_correct: r.is_correct,
                correct_answer: if r.is_correct {
                    None
                } else {
                    r.correct_answer.clone()
                },
            })
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionOutcome;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                question: "What keyword is used to create a function in Python?".to_string(),
                options: vec![
                    "def".to_string(),
                    "function".to_string(),
                    "func".to_string(),
                    "define".to_string(),
                ],
            },
            QuizQuestion {
                question: "Which of these is a mutable data type in Python?".to_string(),
                options: vec![
                    "tuple".to_string(),
                    "string".to_string(),
                    "list".to_string(),
                    "frozenset".to_string(),
                ],
            },
        ]
    }

    fn session() -> QuizSession {
        QuizSession::new("Python".to_string(), questions())
    }

    #[test]
    fn intersects_with_the_allow_list_in_detection_order() {
        let detected = vec![
            "Tableau".to_string(),
            "SQL".to_string(),
            "Python".to_string(),
            "Communication".to_string(),
        ];
        assert_eq!(testable_skills(&detected), vec!["SQL", "Python"]);
    }

    #[test]
    fn no_testable_skills_keeps_the_flow_closed() {
        let mut flow = QuizFlow::new();
        flow.open(&["Tableau".to_string(), "Power BI".to_string()]);
        assert!(matches!(flow.state(), QuizState::Closed));
        assert!(flow.candidates().is_empty());
    }

    #[test]
    fn detected_testable_skills_open_the_listing() {
        let mut flow = QuizFlow::new();
        flow.open(&["Python".to_string()]);
        assert!(matches!(flow.state(), QuizState::Listing));
        assert_eq!(flow.candidates(), ["Python"]);
    }

    #[test]
    fn single_choice_selection_overwrites() {
        let mut s = session();
        assert!(s.select(0, 1));
        assert!(s.select(0, 0));
        assert_eq!(s.answer_for(0), Some(0));
    }

    #[test]
    fn out_of_range_selection_is_refused() {
        let mut s = session();
        assert!(!s.select(5, 0));
        assert!(!s.select(0, 9));
        assert!(s.unanswered().contains(&0));
    }

    #[test]
    fn unanswered_tracks_completion() {
        let mut s = session();
        assert_eq!(s.unanswered(), vec![0, 1]);
        s.select(1, 2);
        assert_eq!(s.unanswered(), vec![0]);
        assert!(s.answers_in_order().is_none());
        s.select(0, 0);
        assert!(s.is_complete());
        assert_eq!(s.answers_in_order(), Some(vec![0, 2]));
    }

    #[tokio::test]
    async fn incomplete_submission_is_rejected_identically_every_time() {
        // backend pointing at nothing: any network attempt would error, so a
        // clean Incomplete proves no request was made
        let backend = Backend::new(&crate::config::Config {
            backend_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
            rust_log: "info".to_string(),
        })
        .unwrap();

        let mut flow = QuizFlow::new();
        flow.open(&["Python".to_string()]);
        flow.state = QuizState::Answering(session());
        flow.select_answer(0, 1);

        for _ in 0..2 {
            let outcome = flow.submit_answers(&backend).await.unwrap();
            assert_eq!(outcome, QuizSubmit::Incomplete(vec![1]));
            // selections are intact and the machine stays in Answering
            match flow.state() {
                QuizState::Answering(s) => assert_eq!(s.answer_for(0), Some(1)),
                other => panic!("expected Answering, got {other:?}"),
            }
        }
    }

    #[test]
    fn close_returns_to_listing_and_drops_the_session() {
        let mut flow = QuizFlow::new();
        flow.open(&["Python".to_string()]);
        flow.state = QuizState::Answering(session());
        flow.close();
        assert!(matches!(flow.state(), QuizState::Listing));
        assert!(flow.notice().is_none());
    }

    #[test]
    fn graded_breakdown_shows_correct_answer_only_when_wrong() {
        let graded = GradedResult {
            score: 50.0,
            correct: 1,
            total: 2,
            passed: false,
            results: vec![
                QuestionOutcome {
                    question: "Q1".to_string(),
                    user_answer: "def".to_string(),
                    is_correct: true,
                    correct_answer: Some("def".to_string()),
                },
                QuestionOutcome {
                    question: "Q2".to_string(),
                    user_answer: "tuple".to_string(),
                    is_correct: false,
                    correct_answer: Some("list".to_string()),
                },
            ],
        };
        let view = render_graded(&graded);
        assert_eq!(view.banner, "Needs Improvement");
        assert!(view.breakdown[0].correct_answer.is_none());
        assert_eq!(view.breakdown[1].correct_answer.as_deref(), Some("list"));
    }
}
