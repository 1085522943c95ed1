use colored::Colorize;

use crate::errors::RefreshError;
use crate::faq_data::FaqSnapshot;
use crate::refresh::RefreshOutcome;

const CATEGORY_WIDTH: usize = 18;
const QUESTION_WIDTH: usize = 40;
const ANSWER_WIDTH: usize = 50;

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn row(category: &str, question: &str, answer: &str) -> String {
    format!(
        "{:<cw$}  {:<qw$}  {}",
        truncate(category, CATEGORY_WIDTH),
        truncate(question, QUESTION_WIDTH),
        truncate(answer, ANSWER_WIDTH),
        cw = CATEGORY_WIDTH,
        qw = QUESTION_WIDTH,
    )
}

/// Text table with the first `limit` records of the snapshot.
pub fn render_preview(snapshot: &FaqSnapshot, limit: usize) -> String {
    let mut lines = vec![row("Category", "Question", "Answer").bold().to_string()];
    lines.extend(
        snapshot
            .records
            .iter()
            .take(limit)
            .map(|r| row(&r.category, &r.question, &r.answer)),
    );

    let hidden = snapshot.records.len().saturating_sub(limit);
    if hidden > 0 {
        lines.push(format!("… and {} more", hidden).dimmed().to_string());
    }
    lines.join("\n")
}

pub fn user_message(error: &RefreshError) -> &'static str {
    match error {
        RefreshError::Network(_) => "Fetching the FAQ failed. Please try again later.",
        RefreshError::NoData => "No FAQ data found. The site structure may have changed.",
        RefreshError::Cache(_) => "The FAQ was fetched but could not be saved locally.",
    }
}

/// Prints the last update time and a preview of the current snapshot.
pub fn print_status(snapshot: Option<&FaqSnapshot>, limit: usize) {
    match snapshot {
        Some(snapshot) => {
            println!(
                "{} {} ({} items)",
                "Last update:".cyan(),
                snapshot.captured_at_display(),
                snapshot.records.len()
            );
            println!("{}", render_preview(snapshot, limit));
        }
        None => println!("{}", "No FAQ data available yet.".yellow()),
    }
}

pub fn print_refresh_result(outcome: &RefreshOutcome) {
    match &outcome.result {
        Ok(count) => println!("{}", format!("FAQ data updated: {} items.", count).green()),
        Err(e) => eprintln!("{}", user_message(e).red()),
    }
}
