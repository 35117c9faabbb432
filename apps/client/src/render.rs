//! Results renderer: a pure projection of an [`AnalysisResult`] into a
//! [`RenderedView`]. No network access, no interface handles; the binding
//! layer walks the view and paints it.

use crate::models::AnalysisResult;

// ────────────────────────────────────────────────────────────────────────────
// View model
// ────────────────────────────────────────────────────────────────────────────

pub const NO_SKILLS_PLACEHOLDER: &str = "No skills found";
pub const NO_RESOURCES_PLACEHOLDER: &str = "No missing skills to learn!";
pub const NOT_PROVIDED: &str = "Not provided";

/// Tips are shown unless both thresholds are met.
const TFIDF_TIPS_THRESHOLD: f64 = 80.0;
const MATCH_TIPS_THRESHOLD: f64 = 75.0;

/// Courses shown per resource card.
const COURSES_PER_CARD: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub job_role: String,
    /// "72%"-style headline plus "4/12 skills" detail.
    pub match_percentage: f64,
    pub match_detail: String,
    /// TF-IDF relevance, rounded for display.
    pub relevance_score: u32,
    pub recommendation: Recommendation,
    pub matched_skills: BadgeList,
    pub missing_skills: BadgeList,
    pub resources: ResourceView,
    /// `None` hides the section entirely (both contact fields absent).
    pub contact: Option<ContactView>,
    /// `None` hides the section (both score thresholds met).
    pub tips: Option<TipsView>,
}

/// A badge strip is never rendered empty: an empty skill set becomes an
/// explicit placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BadgeList {
    Badges(Vec<String>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceView {
    Cards(Vec<ResourceCard>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCard {
    pub skill: String,
    /// First two courses at most.
    pub courses: Vec<String>,
    /// First website, if any.
    pub website: Option<String>,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactView {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TipsView {
    pub tips: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub text: String,
    pub level: RecommendationLevel,
}

/// Presentation tag derived from the backend's `level` string. The raw value
/// is caller-controlled data and is never passed through to the presentation
/// layer; unrecognized values collapse to `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationLevel {
    Excellent,
    Good,
    Moderate,
    Weak,
    Neutral,
}

impl RecommendationLevel {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "excellent" => RecommendationLevel::Excellent,
            "good" => RecommendationLevel::Good,
            "moderate" => RecommendationLevel::Moderate,
            "weak" => RecommendationLevel::Weak,
            _ => RecommendationLevel::Neutral,
        }
    }

    /// Style class for the recommendation box.
    pub fn as_class(self) -> &'static str {
        match self {
            RecommendationLevel::Excellent => "excellent",
            RecommendationLevel::Good => "good",
            RecommendationLevel::Moderate => "moderate",
            RecommendationLevel::Weak => "weak",
            RecommendationLevel::Neutral => "neutral",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static presentation data
// ────────────────────────────────────────────────────────────────────────────

/// Fixed, ordered improvement tips. Not derived from result content.
pub const IMPROVEMENT_TIPS: &[&str] = &[
    "Add specific keywords from the job description to your resume",
    "Use the same terminology and phrases found in the job posting",
    "Include relevant job titles and role-specific terms",
    "Highlight projects and achievements using industry keywords",
    "Add technical skills and tools mentioned in the job description",
    "Use action verbs that match the job requirements (led, developed, designed, etc.)",
    "Mention metrics and results using similar language to the posting",
    "Include any certifications or qualifications mentioned in the role",
    "Ensure your professional summary contains relevant keywords",
    "Focus on outcomes that directly relate to the job role",
];

/// Fallback role for unknown job roles; the keyword strip is never empty.
pub const DEFAULT_KEYWORD_ROLE: &str = "Data Analyst";

const DATA_ANALYST_KEYWORDS: &[&str] = &[
    "Data visualization",
    "SQL queries",
    "Python analysis",
    "Statistical analysis",
    "Business intelligence",
    "Dashboard creation",
    "Data extraction",
    "Report generation",
    "Data cleaning",
    "Trend analysis",
    "Excel pivot tables",
    "Data modeling",
];

const WEB_DEVELOPER_KEYWORDS: &[&str] = &[
    "Responsive design",
    "Frontend development",
    "Backend integration",
    "API development",
    "Database design",
    "Version control",
    "Code optimization",
    "Bug fixes",
    "User interface",
    "Full-stack development",
    "Testing and debugging",
    "Performance optimization",
];

const ML_ENGINEER_KEYWORDS: &[&str] = &[
    "Model training",
    "Neural networks",
    "Data preprocessing",
    "Feature engineering",
    "Deep learning",
    "Algorithm development",
    "Model evaluation",
    "Production deployment",
    "Data pipeline",
    "Optimization techniques",
    "Computer vision",
    "NLP implementation",
];

/// Keyword suggestions for a role; unrecognized roles fall back to the
/// [`DEFAULT_KEYWORD_ROLE`] set.
pub fn keywords_for_role(job_role: &str) -> &'static [&'static str] {
    match job_role {
        "Data Analyst" => DATA_ANALYST_KEYWORDS,
        "Web Developer" => WEB_DEVELOPER_KEYWORDS,
        "ML Engineer" => ML_ENGINEER_KEYWORDS,
        _ => DATA_ANALYST_KEYWORDS,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Projects an analysis result into everything the results screen shows.
pub fn render(result: &AnalysisResult) -> RenderedView {
    RenderedView {
        job_role: result.job_role.clone(),
        match_percentage: result.skill_match.match_percentage,
        match_detail: format!(
            "{}/{} skills",
            result.skill_match.matched_count, result.skill_match.required_count
        ),
        relevance_score: result.tfidf_score.round() as u32,
        recommendation: Recommendation {
            text: result.recommendation.clone(),
            level: RecommendationLevel::from_tag(&result.level),
        },
        matched_skills: badge_list(&result.skill_match.matched),
        missing_skills: badge_list(&result.skill_match.missing),
        resources: resource_view(result),
        contact: contact_view(result),
        tips: tips_view(
            result.tfidf_score,
            result.skill_match.match_percentage,
            &result.job_role,
        ),
    }
}

fn badge_list(skills: &[String]) -> BadgeList {
    if skills.is_empty() {
        BadgeList::Placeholder(NO_SKILLS_PLACEHOLDER)
    } else {
        BadgeList::Badges(skills.to_vec())
    }
}

fn resource_view(result: &AnalysisResult) -> ResourceView {
    if result.resources.is_empty() {
        return ResourceView::Placeholder(NO_RESOURCES_PLACEHOLDER);
    }
    let cards = result
        .resources
        .iter()
        .map(|(skill, resource)| ResourceCard {
            skill: skill.clone(),
            courses: resource.courses.iter().take(COURSES_PER_CARD).cloned().collect(),
            website: resource.websites.first().cloned(),
            duration: resource.duration.clone(),
        })
        .collect();
    ResourceView::Cards(cards)
}

fn contact_view(result: &AnalysisResult) -> Option<ContactView> {
    let contact = &result.contact;
    if contact.email.is_none() && contact.phone.is_none() {
        return None;
    }
    Some(ContactView {
        email: contact.email.clone().unwrap_or_else(|| NOT_PROVIDED.to_string()),
        phone: contact.phone.clone().unwrap_or_else(|| NOT_PROVIDED.to_string()),
    })
}

fn tips_view(tfidf_score: f64, match_percentage: f64, job_role: &str) -> Option<TipsView> {
    if tfidf_score >= TFIDF_TIPS_THRESHOLD && match_percentage >= MATCH_TIPS_THRESHOLD {
        return None;
    }
    Some(TipsView {
        tips: IMPROVEMENT_TIPS,
        keywords: keywords_for_role(job_role),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, ContactInfo, LearningResource, SkillMatch};
    use std::collections::BTreeMap;

    fn result_with(
        tfidf_score: f64,
        match_percentage: f64,
        job_role: &str,
    ) -> AnalysisResult {
        AnalysisResult {
            job_role: job_role.to_string(),
            skill_match: SkillMatch {
                matched: vec!["Python".to_string(), "SQL".to_string()],
                missing: vec!["Tableau".to_string()],
                matched_count: 2,
                required_count: 3,
                match_percentage,
            },
            tfidf_score,
            detected_skills: vec!["Python".to_string(), "SQL".to_string()],
            recommendation: "Good match!".to_string(),
            level: "good".to_string(),
            contact: ContactInfo {
                email: Some("a@b.com".to_string()),
                phone: None,
            },
            resources: BTreeMap::from([(
                "Tableau".to_string(),
                LearningResource {
                    courses: vec![
                        "Tableau Desktop Specialist (Udemy)".to_string(),
                        "Tableau Public (LinkedIn)".to_string(),
                        "A third course that is never shown".to_string(),
                    ],
                    websites: vec![
                        "tableau.com/public".to_string(),
                        "tableautraining.com".to_string(),
                    ],
                    duration: "4-6 weeks".to_string(),
                },
            )]),
        }
    }

    #[test]
    fn projects_scores_and_badges() {
        let view = render(&result_with(72.4, 66.7, "Data Analyst"));
        assert_eq!(view.relevance_score, 72);
        assert_eq!(view.match_detail, "2/3 skills");
        assert_eq!(
            view.matched_skills,
            BadgeList::Badges(vec!["Python".to_string(), "SQL".to_string()])
        );
        assert_eq!(view.recommendation.level, RecommendationLevel::Good);
    }

    #[test]
    fn empty_missing_skills_renders_the_resource_placeholder() {
        let mut result = result_with(90.0, 100.0, "Data Analyst");
        result.skill_match.missing.clear();
        result.resources.clear();
        let view = render(&result);
        assert_eq!(
            view.missing_skills,
            BadgeList::Placeholder(NO_SKILLS_PLACEHOLDER)
        );
        assert_eq!(
            view.resources,
            ResourceView::Placeholder(NO_RESOURCES_PLACEHOLDER)
        );
    }

    #[test]
    fn resource_cards_cap_courses_and_take_first_website() {
        let view = render(&result_with(60.0, 50.0, "Data Analyst"));
        let ResourceView::Cards(cards) = view.resources else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].courses.len(), 2);
        assert_eq!(cards[0].website.as_deref(), Some("tableau.com/public"));
        assert_eq!(cards[0].duration, "4-6 weeks");
    }

    #[test]
    fn contact_section_substitutes_not_provided() {
        let view = render(&result_with(60.0, 50.0, "Data Analyst"));
        let contact = view.contact.expect("email present, section shown");
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.phone, NOT_PROVIDED);
    }

    #[test]
    fn contact_section_hidden_when_both_absent() {
        let mut result = result_with(60.0, 50.0, "Data Analyst");
        result.contact = ContactInfo::default();
        assert!(render(&result).contact.is_none());
    }

    #[test]
    fn tips_hidden_when_both_thresholds_met() {
        // 85 / 80: both at or above threshold, section hidden
        assert!(render(&result_with(85.0, 80.0, "Data Analyst")).tips.is_none());
        // boundary: exactly 80 / 75 still hides
        assert!(render(&result_with(80.0, 75.0, "Data Analyst")).tips.is_none());
    }

    #[test]
    fn tips_shown_when_either_score_is_low() {
        let view = render(&result_with(60.0, 50.0, "Data Analyst"));
        let tips = view.tips.expect("tips shown");
        assert_eq!(tips.tips.len(), 10);
        assert_eq!(tips.keywords, keywords_for_role("Data Analyst"));

        // one low score is enough
        assert!(render(&result_with(90.0, 50.0, "Data Analyst")).tips.is_some());
        assert!(render(&result_with(60.0, 90.0, "Data Analyst")).tips.is_some());
    }

    #[test]
    fn unknown_role_falls_back_to_the_default_keyword_set() {
        let view = render(&result_with(60.0, 50.0, "Astronaut"));
        let tips = view.tips.expect("tips shown");
        assert_eq!(tips.keywords, keywords_for_role(DEFAULT_KEYWORD_ROLE));
        assert!(!tips.keywords.is_empty());
    }

    #[test]
    fn unknown_level_collapses_to_neutral() {
        let mut result = result_with(60.0, 50.0, "Data Analyst");
        result.level = "<script>alert(1)</script>".to_string();
        let view = render(&result);
        assert_eq!(view.recommendation.level, RecommendationLevel::Neutral);
        assert_eq!(view.recommendation.level.as_class(), "neutral");
    }
}
