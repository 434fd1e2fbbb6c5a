//! Terminal and JSON rendering of analysis results.

use std::fmt::Write;

use crossterm::style::{style, Color, Stylize};

use crate::history::AnalysisRecord;
use crate::scoring::MatchResult;
use crate::tier::Tier;

const BAR_WIDTH: usize = 20;
const NONE_FOUND: &str = "None found";

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Low => Color::Red,
        Tier::Medium => Color::Yellow,
        Tier::High => Color::Green,
    }
}

fn paint(text: String, tier: Tier, color: bool) -> String {
    if color {
        style(text).with(tier_color(tier)).to_string()
    } else {
        text
    }
}

fn bar(score: u8) -> String {
    let filled = usize::from(score) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn tags(keywords: &[String]) -> String {
    if keywords.is_empty() {
        NONE_FOUND.to_string()
    } else {
        keywords.join(", ")
    }
}

/// Human-readable report: overall gauge, one bar per metric, keyword tags.
pub fn render_text(result: &MatchResult, color: bool) -> String {
    let mut out = String::new();
    let overall = result.tier();

    let headline = format!("Match score: {}% ({})", result.score, overall);
    let headline = if color {
        style(headline).with(tier_color(overall)).bold().to_string()
    } else {
        headline
    };
    let _ = writeln!(out, "{headline}\n");

    let metrics = [
        ("Skills", result.skill_score),
        ("Format", result.format_score),
        ("Experience", result.experience_score),
        ("Density", result.density_score),
        ("Keywords", result.keyword_score),
    ];
    for (label, score) in metrics {
        let tier = Tier::of(score);
        let line = format!("[{}] {:>3}%", bar(score), score);
        let _ = writeln!(out, "  {:<11}{}", label, paint(line, tier, color));
    }

    let _ = writeln!(out, "\nMatched keywords: {}", tags(&result.matched));
    let _ = writeln!(out, "Missing keywords: {}", tags(&result.missing));
    out
}

pub fn render_json(result: &MatchResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// One line per stored analysis, newest first as given.
pub fn render_history(records: &[AnalysisRecord], color: bool) -> String {
    if records.is_empty() {
        return "No recent scans found.\n".to_string();
    }
    let mut out = String::new();
    for record in records {
        let score = paint(format!("{:>3}%", record.result.score), record.tier(), color);
        let _ = writeln!(
            out,
            "{}  {:<30}  {:<24}  {}",
            record.created_at.format("%Y-%m-%d"),
            record.resume_name,
            record.job_title,
            score
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchResult {
        MatchResult {
            score: 72,
            keyword_score: 60,
            skill_score: 100,
            experience_score: 90,
            density_score: 45,
            format_score: 95,
            matched: vec!["python".into(), "aws".into()],
            missing: vec!["docker".into()],
        }
    }

    #[test]
    fn text_report_lists_metrics_and_tags() {
        let text = render_text(&sample(), false);
        assert!(text.starts_with("Match score: 72% (medium)"));
        assert!(text.contains("Skills"));
        assert!(text.contains(&format!("[{}] 100%", "█".repeat(20))));
        assert!(text.contains("Matched keywords: python, aws"));
        assert!(text.contains("Missing keywords: docker"));
    }

    #[test]
    fn empty_tags_say_none_found() {
        let text = render_text(&MatchResult::empty(), false);
        assert!(text.contains("Matched keywords: None found"));
        assert!(text.contains("Missing keywords: None found"));
    }

    #[test]
    fn bars_scale_with_score() {
        assert_eq!(bar(0), "░".repeat(20));
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(bar(100).chars().count(), 20);
    }

    #[test]
    fn colored_output_carries_escape_codes() {
        let text = render_text(&sample(), true);
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let json = render_json(&sample()).unwrap();
        assert!(json.contains("\"skillScore\": 100"));
        assert!(json.contains("\"missing\": ["));
    }

    #[test]
    fn empty_history_message() {
        assert_eq!(render_history(&[], false), "No recent scans found.\n");
    }
}
