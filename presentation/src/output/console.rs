//! Console output formatter for predictions and batch summaries

use colored::Colorize;
use tally_application::BatchReport;
use tally_domain::Prediction;

/// Formats predictions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a single-question result
    pub fn format_single(question: &str, prediction: &Prediction) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Q:".cyan().bold(), question));

        if prediction.resolved {
            output.push_str(&format!(
                "{} {}  {}\n",
                "A:".green().bold(),
                prediction.answer.bold(),
                format!(
                    "({}/{} samples agree)",
                    (prediction.agreement * prediction.candidates.len() as f64).round() as usize,
                    prediction.candidates.len()
                )
                .dimmed()
            ));
        } else {
            output.push_str(&format!(
                "{} {}\n",
                "A:".red().bold(),
                "no answer (all samples failed)".red()
            ));
        }

        output
    }

    /// Format the end-of-batch summary
    pub fn format_summary(report: &BatchReport) -> String {
        let stats = &report.stats;
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=== Batch Summary ===".cyan().bold()));
        output.push_str(&format!(
            "  Problems:  {}\n  Resolved:  {} ({:.1}% coverage)\n",
            stats.total,
            stats.resolved,
            stats.coverage() * 100.0
        ));
        if stats.unresolved > 0 {
            output.push_str(&format!(
                "  {}  {}\n",
                "Unresolved:".yellow(),
                stats.unresolved
            ));
        }
        match stats.accuracy() {
            Some(accuracy) => {
                output.push_str(&format!(
                    "  Accuracy:  {} ({}/{} scored)\n",
                    format!("{:.1}%", accuracy * 100.0).green().bold(),
                    stats.correct,
                    stats.scored
                ));
            }
            None => {
                output.push_str(&format!(
                    "  Accuracy:  {}\n",
                    "n/a (no gold answers)".dimmed()
                ));
            }
        }

        output
    }

    /// Format a prediction as JSON (for machine consumption)
    pub fn format_json(prediction: &Prediction) -> String {
        serde_json::to_string_pretty(prediction).unwrap_or_else(|_| "{}".to_string())
    }
}
