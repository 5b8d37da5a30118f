//! Console output formatter for comparison runs

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use multillm_application::ComparisonRun;
use std::time::Duration;

/// Formats comparison runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run
    pub fn format(run: &ComparisonRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("multillm {}", run.protocol)));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Prompt:".cyan().bold(), run.prompt));
        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            run.candidates
                .iter()
                .map(|c| c.model.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        output.push_str(&Self::section_header("Trail"));
        for line in &run.trail {
            output.push_str(&Self::trail_line(line));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(run: &ComparisonRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the agreed answer only
    ///
    /// Protocols that do not compare print every answer instead.
    pub fn format_answer_only(run: &ComparisonRun) -> String {
        if let Some(winner) = &run.winner {
            return format!("{}\n", winner);
        }
        if !run.protocol.adjudicates() {
            return run
                .candidates
                .iter()
                .map(|c| format!("{}\n{}\n", format!("── {} ──", c.model).yellow().bold(), c.text))
                .collect();
        }
        format!("{}\n", "FAIL comparison".red().bold())
    }

    /// `Time taken: 1.23 seconds`
    pub fn format_elapsed(elapsed: Duration) -> String {
        format!("Time taken: {:.2} seconds", elapsed.as_secs_f64())
    }

    fn trail_line(line: &str) -> String {
        if line == "PASS compared response" {
            line.green().bold().to_string()
        } else if line == "FAIL comparison" {
            line.red().bold().to_string()
        } else if line.starts_with("model ") || line.starts_with("Compare") {
            line.yellow().to_string()
        } else if line.starts_with("**") || line.starts_with("unknown compare action") {
            line.bold().to_string()
        } else {
            line.to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, run: &ComparisonRun) -> String {
        Self::format(run)
    }

    fn format_json(&self, run: &ComparisonRun) -> String {
        Self::format_json(run)
    }

    fn format_answer_only(&self, run: &ComparisonRun) -> String {
        Self::format_answer_only(run)
    }
}
