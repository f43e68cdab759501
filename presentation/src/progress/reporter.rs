//! Progress reporting for batch execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tally_application::ProgressNotifier;

/// Reports progress during batch execution with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, total_problems: usize) {
        let pb = ProgressBar::new(total_problems as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Solving");
        pb.set_message("Starting...");

        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_problem_start(&self, problem_id: usize, samples: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(format!("problem {} ({} samples)", problem_id, samples));
        }
    }

    fn on_sample_complete(&self, _problem_id: usize, _sample_index: usize, _success: bool) {}

    fn on_problem_complete(&self, problem_id: usize, resolved: bool) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let status = if resolved {
                format!("{} problem {}", "v".green(), problem_id)
            } else {
                format!("{} problem {}", "x".red(), problem_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, total_problems: usize) {
        println!(
            "{} Solving {} problems",
            "->".cyan(),
            total_problems.to_string().bold()
        );
    }

    fn on_problem_start(&self, _problem_id: usize, _samples: usize) {}

    fn on_sample_complete(&self, _problem_id: usize, _sample_index: usize, _success: bool) {}

    fn on_problem_complete(&self, problem_id: usize, resolved: bool) {
        if resolved {
            println!("  {} problem {}", "v".green(), problem_id);
        } else {
            println!("  {} problem {} (no answer)", "x".red(), problem_id);
        }
    }

    fn on_batch_complete(&self) {
        println!();
    }
}
