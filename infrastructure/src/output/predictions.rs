//! CSV prediction writer.
//!
//! Writes one row per input problem, in input order, so the output file
//! lines up with the dataset it was produced from. Unresolved problems
//! keep their row with an empty answer and zero agreement.

use std::path::Path;
use tally_domain::{Prediction, Problem};
use thiserror::Error;
use tracing::info;

/// Errors from prediction writing
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write predictions: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("prediction count {predictions} does not match problem count {problems}")]
    LengthMismatch { problems: usize, predictions: usize },
}

/// Write predictions next to their problems as CSV.
///
/// Columns: `id,question,answer,agreement`. The `correct` column is
/// appended only when at least one prediction was scored.
pub fn write_predictions(
    path: impl AsRef<Path>,
    problems: &[Problem],
    predictions: &[Prediction],
) -> Result<(), OutputError> {
    if problems.len() != predictions.len() {
        return Err(OutputError::LengthMismatch {
            problems: problems.len(),
            predictions: predictions.len(),
        });
    }

    let path = path.as_ref();

    // The batch has already been sampled by the time we get here; a missing
    // output directory must not cost the run.
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let scored = predictions.iter().any(|p| p.correct.is_some());
    let mut writer = csv::Writer::from_path(path)?;

    if scored {
        writer.write_record(["id", "question", "answer", "agreement", "correct"])?;
    } else {
        writer.write_record(["id", "question", "answer", "agreement"])?;
    }

    for (problem, prediction) in problems.iter().zip(predictions) {
        let id = problem.id().to_string();
        let agreement = format!("{:.4}", prediction.agreement);
        if scored {
            let correct = match prediction.correct {
                Some(true) => "true",
                Some(false) => "false",
                None => "",
            };
            writer.write_record([
                id.as_str(),
                problem.question(),
                prediction.answer.as_str(),
                agreement.as_str(),
                correct,
            ])?;
        } else {
            writer.write_record([
                id.as_str(),
                problem.question(),
                prediction.answer.as_str(),
                agreement.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    info!(
        "Wrote {} predictions to {}",
        predictions.len(),
        path.display()
    );
    Ok(())
}
