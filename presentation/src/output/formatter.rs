//! Output formatter trait

use multillm_application::ComparisonRun;
use multillm_domain::OutputFormat;

/// Trait for formatting comparison runs
pub trait OutputFormatter {
    /// Format the complete run: trail and verdict
    fn format(&self, run: &ComparisonRun) -> String;

    /// Format as JSON
    fn format_json(&self, run: &ComparisonRun) -> String;

    /// Format the agreed answer only (concise output)
    fn format_answer_only(&self, run: &ComparisonRun) -> String;

    /// Dispatch on a configured format
    fn render(&self, run: &ComparisonRun, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(run),
            OutputFormat::Answer => self.format_answer_only(run),
            OutputFormat::Json => self.format_json(run),
        }
    }
}
