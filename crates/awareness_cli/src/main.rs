//! CLI smoke and driver entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `awareness_core` linkage.
//! - Drive a scripted quiz run against the on-disk history store.
//! - Submit a contact form through the simulated transport.
//! - Keep output deterministic for quick local sanity checks.

use awareness_core::content::quiz_questions;
use awareness_core::{
    init_logging, open_db, ArticlesPage, ArticlesView, ContactField, ContactPage, CoreConfig,
    MockArticleSource, NotificationPortal, OverlayHost, QuizHistoryLog, SimulatedTransport,
    SqliteKeyValueStore, SubmitStatus, SystemClock, Transition,
};
use log::warn;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "usage: awareness_cli [quiz <answers> | history | articles [term] [category] | contact <name> <email> <category> <subject> <message>]";

const CONTACT_FIELDS: [ContactField; 5] = [
    ContactField::Name,
    ContactField::Email,
    ContactField::Category,
    ContactField::Subject,
    ContactField::Message,
];

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match args.first().map(String::as_str) {
        None => {
            println!("awareness_core ping={}", awareness_core::ping());
            println!("awareness_core version={}", awareness_core::core_version());
            Ok(())
        }
        Some("quiz") => {
            let answers = parse_answers(args.get(1).map(String::as_str).unwrap_or_default())?;
            run_quiz(&config, &answers)
        }
        Some("history") => print_history(&config),
        Some("articles") => {
            print_articles(
                &config,
                args.get(1).map(String::as_str),
                args.get(2).map(String::as_str),
            );
            Ok(())
        }
        Some("contact") => {
            let page = submit_contact(&config, &args[1..]);
            print_contact(&page)
        }
        Some(other) => Err(format!("unknown command `{other}`\n{USAGE}").into()),
    }
}

fn parse_answers(raw: &str) -> Result<Vec<usize>, Box<dyn Error>> {
    if raw.trim().is_empty() {
        return Err(format!("missing answers\n{USAGE}").into());
    }
    let mut answers = Vec::new();
    for part in raw.split(',') {
        let answer = part
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid answer `{part}`: {err}"))?;
        answers.push(answer);
    }
    Ok(answers)
}

fn run_quiz(config: &CoreConfig, answers: &[usize]) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let host = OverlayHost::new();
    let mut portal = NotificationPortal::mount(
        &host,
        config.overlay_position,
        quiz_questions(),
        store,
        Arc::new(SystemClock),
    )?;
    portal.set_quiz_visible(true);

    let mut completed = false;
    for &answer in answers {
        let selected = portal.select_answer(answer);
        if selected.is_rejected() {
            warn!("event=cli_quiz module=cli status=rejected answer={answer}");
            return Err(format!("answer {answer} rejected: {selected:?}").into());
        }
        if let Transition::Completed(outcome) = portal.advance() {
            println!(
                "quiz completed score={} total={} percentage={}",
                outcome.score,
                outcome.total,
                outcome.percentage()
            );
            completed = true;
            break;
        }
    }

    if !completed {
        println!("quiz not completed: {} answers given", answers.len());
    }
    for notification in portal.notifications() {
        println!(
            "[{}] {}: {}",
            notification.kind.as_str(),
            notification.title,
            notification.message
        );
    }
    Ok(())
}

fn print_history(config: &CoreConfig) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let entries = QuizHistoryLog::new(store).load();
    if entries.is_empty() {
        println!("no quiz history");
    }
    for entry in entries {
        println!("{} {}/{}", entry.date, entry.score, entry.total);
    }
    Ok(())
}

fn print_articles(config: &CoreConfig, term: Option<&str>, category: Option<&str>) {
    let mut page = ArticlesPage::new();
    page.load(&MockArticleSource::new(config.article_latency));
    if let Some(term) = term {
        page.set_search_term(term);
    }
    if let Some(category) = category {
        page.select_category(category);
    }

    match page.view() {
        ArticlesView::Loading => println!("loading"),
        ArticlesView::Empty => println!("no articles"),
        ArticlesView::NoMatches => println!("no articles match the filter"),
        ArticlesView::List(articles) => {
            for article in articles {
                println!(
                    "{} | {} | {} | {}",
                    article.formatted_publish_date(),
                    article.category,
                    article.title,
                    article.read_time_label()
                );
            }
        }
    }
}

fn submit_contact(config: &CoreConfig, values: &[String]) -> ContactPage {
    let mut page = ContactPage::new();
    for (field, value) in CONTACT_FIELDS.into_iter().zip(values) {
        page.set_field(field, value.as_str());
    }
    page.submit(&SimulatedTransport::new(config.submit_latency));
    page
}

fn print_contact(page: &ContactPage) -> Result<(), Box<dyn Error>> {
    for (field, message) in page.errors() {
        println!("{field:?}: {message}");
    }
    if let Some(banner) = page.status().banner() {
        println!("{banner}");
    }
    match page.status() {
        SubmitStatus::Success => Ok(()),
        SubmitStatus::Error => Err("contact submission failed".into()),
        SubmitStatus::Idle => Err(format!("contact form is invalid\n{USAGE}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_answers, submit_contact};
    use awareness_core::{ContactField, CoreConfig, SubmitStatus};
    use std::time::{Duration, Instant};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn parse_answers_accepts_comma_separated_indices() {
        assert_eq!(parse_answers(" 0, 1,2 ").expect("answers should parse"), vec![0, 1, 2]);
        assert!(parse_answers("").is_err());
        assert!(parse_answers("0,x").is_err());
    }

    #[test]
    fn contact_submit_waits_for_configured_latency() {
        let config = CoreConfig {
            submit_latency: Duration::from_millis(30),
            ..CoreConfig::default()
        };
        let started = Instant::now();
        let page = submit_contact(
            &config,
            &args(&[
                "Олена",
                "olena@example.com",
                "feedback",
                "Про квіз",
                "Дуже корисні питання!",
            ]),
        );

        assert_eq!(page.status(), SubmitStatus::Success);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn contact_with_missing_fields_reports_errors() {
        let config = CoreConfig {
            submit_latency: Duration::ZERO,
            ..CoreConfig::default()
        };
        let page = submit_contact(&config, &args(&["Олена", "not-an-email"]));

        assert_eq!(page.status(), SubmitStatus::Idle);
        assert!(page.field_error(ContactField::Email).is_some());
        assert!(page.field_error(ContactField::Message).is_some());
        assert!(page.field_error(ContactField::Name).is_none());
    }
}
