//! End-to-end driver: validates a PDF from disk, submits it for analysis,
//! prints the rendered view, and runs one quiz round when the detected
//! skills include a testable one.
//!
//! Usage: `demo <resume.pdf> <job role>` with `BACKEND_URL` set.

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::quiz::{render_graded, QuizFlow, QuizState, QuizSubmit};
use client::render::{render, BadgeList, RenderedView, ResourceView};
use client::upload::{UploadCandidate, UploadForm, ALLOWED_MIME};
use client::{AnalysisFlow, AnalysisState, Backend, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(job_role)) = (args.next(), args.next()) else {
        bail!("usage: demo <resume.pdf> <job role>");
    };

    let backend = Backend::new(&config)?;
    info!("submitting {path} for role {job_role}");

    let mut form = UploadForm::new();
    form.select_file(UploadCandidate {
        file_name: path.clone(),
        declared_type: ALLOWED_MIME.to_string(),
        bytes: Bytes::from(std::fs::read(&path).with_context(|| format!("reading {path}"))?),
    })?;
    form.select_role(job_role);
    let valid = form.take_validated()?;

    let mut flow = AnalysisFlow::new();
    flow.submit(&backend, valid).await;

    let result = match flow.state() {
        AnalysisState::Success(result) => result,
        AnalysisState::Error(message) => bail!("analysis failed: {message}"),
        other => bail!("unexpected state: {other:?}"),
    };

    let view = render(result);
    print_view(&view);

    // one quiz round against the first testable skill, answering option 0
    // everywhere — enough to exercise the full sub-flow
    let mut quiz = QuizFlow::new();
    quiz.open(&result.detected_skills);
    let Some(skill) = quiz.candidates().first().cloned() else {
        info!("no testable skills detected");
        return Ok(());
    };

    println!("\n── {skill} assessment ──");
    quiz.start(&backend, &skill).await;
    let total = match quiz.state() {
        QuizState::Answering(session) => session.questions.len(),
        _ => bail!(
            "{}",
            quiz.notice().unwrap_or("could not start the skill test")
        ),
    };
    for question in 0..total {
        quiz.select_answer(question, 0);
    }

    match quiz.submit_answers(&backend).await? {
        QuizSubmit::Incomplete(unanswered) => bail!("unanswered questions: {unanswered:?}"),
        QuizSubmit::Graded => {}
    }
    let graded = quiz.graded().context("graded state expected")?;
    let graded_view = render_graded(graded);
    println!(
        "{}% — {} out of {} correct — {}",
        graded_view.score, graded_view.correct, graded_view.total, graded_view.banner
    );

    Ok(())
}

fn print_view(view: &RenderedView) {
    println!("Role:            {}", view.job_role);
    println!(
        "Skill match:     {}% ({})",
        view.match_percentage, view.match_detail
    );
    println!("Relevance score: {}%", view.relevance_score);
    println!(
        "Recommendation:  {} [{}]",
        view.recommendation.text,
        view.recommendation.level.as_class()
    );

    print_badges("Matched", &view.matched_skills);
    print_badges("Missing", &view.missing_skills);

    match &view.resources {
        ResourceView::Placeholder(text) => println!("Resources:       {text}"),
        ResourceView::Cards(cards) => {
            for card in cards {
                println!(
                    "Learn {}: {} ({})",
                    card.skill,
                    card.courses.join("; "),
                    card.duration
                );
            }
        }
    }

    if let Some(contact) = &view.contact {
        println!("Contact:         {} / {}", contact.email, contact.phone);
    }

    if let Some(tips) = &view.tips {
        println!("Improvement tips:");
        for tip in tips.tips {
            println!("  - {tip}");
        }
        println!("Suggested keywords: {}", tips.keywords.join(", "));
    }
}

fn print_badges(label: &str, badges: &BadgeList) {
    match badges {
        BadgeList::Badges(skills) => println!("{label}:         {}", skills.join(", ")),
        BadgeList::Placeholder(text) => println!("{label}:         {text}"),
    }
}
