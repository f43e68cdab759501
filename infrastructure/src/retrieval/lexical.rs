//! Token-overlap few-shot retriever.
//!
//! Scores each training example by Jaccard similarity between its
//! question tokens and the query tokens. Lexical overlap is a crude
//! signal, but it is fast, dependency-free, and deterministic, so the
//! same question always yields the same prompt.

use crate::dataset::TrainingExample;
use tally_application::ExampleRetriever;
use tally_domain::PromptTemplate;
use tracing::debug;

/// Retriever backed by the training split, scored by token overlap
pub struct LexicalRetriever {
    entries: Vec<Entry>,
}

struct Entry {
    tokens: Vec<String>,
    rendered: String,
}

impl LexicalRetriever {
    /// Index the training split. Tokenization happens once, up front.
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        let entries = examples
            .into_iter()
            .map(|example| Entry {
                tokens: tokenize(&example.question),
                rendered: PromptTemplate::format_example(&example.question, &example.answer),
            })
            .collect::<Vec<_>>();
        debug!("Indexed {} training examples for retrieval", entries.len());
        Self { entries }
    }

    /// Number of indexed examples
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExampleRetriever for LexicalRetriever {
    fn retrieve(&self, question: &str, k: usize) -> Vec<String> {
        if k == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        let query = tokenize(question);
        let mut scored: Vec<(f64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (jaccard(&query, &entry.tokens), index))
            .collect();

        // Descending score; ties broken by index so retrieval is stable
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        scored
            .into_iter()
            .take(k)
            .map(|(_, index)| self.entries[index].rendered.clone())
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

/// Jaccard similarity over two sorted, deduplicated token lists
fn jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let mut intersection = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                intersection += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
