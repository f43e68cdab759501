//! CSV loaders for the test and training splits.
//!
//! Both splits share one shape: a `question` column, plus an optional
//! `answer` column carrying a worked solution whose final line is
//! `#### <gold>`. Problem ids are the zero-based row index, which keeps
//! them stable across loader and writer.

use std::path::Path;
use tally_domain::Problem;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from dataset loading
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("dataset contains no usable rows")]
    Empty,
}

/// One worked example from the training split
#[derive(Debug, Clone)]
pub struct TrainingExample {
    /// Question text
    pub question: String,
    /// Full worked solution, including the `#### <gold>` marker line
    pub answer: String,
}

/// Pull the gold answer out of a worked solution.
///
/// The gold value is the text after the last `####` marker; solutions
/// without a marker are taken verbatim (already-bare answers).
pub fn extract_gold(answer: &str) -> String {
    for line in answer.lines().rev() {
        if let Some(rest) = line.trim().strip_prefix("####") {
            return rest.trim().to_string();
        }
    }
    answer.trim().to_string()
}

/// Load the problems to solve from a CSV file.
///
/// Requires a `question` column. When an `answer` column is present its
/// gold value is attached for verification. Blank questions are skipped
/// with a warning; ids are assigned by kept-row order.
pub fn load_problems(path: impl AsRef<Path>) -> Result<Vec<Problem>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let (question_col, answer_col) = column_indices(&mut reader)?;

    let mut problems = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let question = record.get(question_col).unwrap_or("").trim();
        if question.is_empty() {
            warn!("Skipping row {} with empty question", row);
            continue;
        }

        let mut problem = Problem::new(problems.len(), question);
        if let Some(col) = answer_col {
            let answer = record.get(col).unwrap_or("").trim();
            if !answer.is_empty() {
                problem = problem.with_gold(extract_gold(answer));
            }
        }
        problems.push(problem);
    }

    if problems.is_empty() {
        return Err(DatasetError::Empty);
    }

    debug!("Loaded {} problems from {}", problems.len(), path.display());
    Ok(problems)
}

/// Load the training split used for few-shot retrieval.
///
/// Requires both `question` and `answer` columns; rows missing either
/// are skipped.
pub fn load_training(path: impl AsRef<Path>) -> Result<Vec<TrainingExample>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let (question_col, answer_col) = column_indices(&mut reader)?;
    let answer_col = answer_col.ok_or(DatasetError::MissingColumn("answer"))?;

    let mut examples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let question = record.get(question_col).unwrap_or("").trim();
        let answer = record.get(answer_col).unwrap_or("").trim();
        if question.is_empty() || answer.is_empty() {
            continue;
        }
        examples.push(TrainingExample {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    if examples.is_empty() {
        return Err(DatasetError::Empty);
    }

    debug!(
        "Loaded {} training examples from {}",
        examples.len(),
        path.display()
    );
    Ok(examples)
}

fn column_indices(
    reader: &mut csv::Reader<std::fs::File>,
) -> Result<(usize, Option<usize>), DatasetError> {
    let headers = reader.headers()?;
    let question_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("question"))
        .ok_or(DatasetError::MissingColumn("question"))?;
    let answer_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("answer"));
    Ok((question_col, answer_col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_extract_gold_from_marker() {
        let answer = "First add 2 and 3 to get 5.\nThen double it.\n#### 10";
        assert_eq!(extract_gold(answer), "10");
    }

    #[test]
    fn test_extract_gold_uses_last_marker() {
        let answer = "#### 3 is wrong\nRecomputing.\n#### 7";
        assert_eq!(extract_gold(answer), "7");
    }

    #[test]
    fn test_extract_gold_without_marker() {
        assert_eq!(extract_gold("  42 \n"), "42");
    }

    #[test]
    fn test_load_problems_with_gold() {
        let file = write_csv(
            "question,answer\n\
             What is 2+2?,\"Add them.\n#### 4\"\n\
             What is 3*3?,#### 9\n",
        );
        let problems = load_problems(file.path()).unwrap();

        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].id(), 0);
        assert_eq!(problems[0].question(), "What is 2+2?");
        assert_eq!(problems[0].gold(), Some("4"));
        assert_eq!(problems[1].gold(), Some("9"));
    }

    #[test]
    fn test_load_problems_without_answer_column() {
        let file = write_csv("question\nWhat is 2+2?\n");
        let problems = load_problems(file.path()).unwrap();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].gold(), None);
    }

    #[test]
    fn test_load_problems_skips_blank_rows() {
        let file = write_csv("question,answer\nreal question,#### 1\n   ,#### 2\n");
        let problems = load_problems(file.path()).unwrap();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].question(), "real question");
    }

    #[test]
    fn test_load_problems_missing_question_column() {
        let file = write_csv("prompt,answer\nhello,#### 1\n");
        let err = load_problems(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("question")));
    }

    #[test]
    fn test_load_problems_empty_file() {
        let file = write_csv("question,answer\n");
        let err = load_problems(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_load_training() {
        let file = write_csv(
            "question,answer\n\
             q1,\"work\n#### 5\"\n\
             q2,\n\
             q3,#### 6\n",
        );
        let examples = load_training(file.path()).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].question, "q1");
        assert!(examples[0].answer.contains("#### 5"));
        assert_eq!(examples[1].question, "q3");
    }

    #[test]
    fn test_load_training_requires_answer_column() {
        let file = write_csv("question\nq1\n");
        let err = load_training(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("answer")));
    }
}
