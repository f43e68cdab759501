//! Few-shot example retrieval port

/// Selects worked examples from the training split for a prompt.
///
/// Retrieval must be deterministic for a given question so that repeated
/// runs build identical prompts. Examples come back pre-rendered in prompt
/// form ("Question: ...\nAnswer: ...").
pub trait ExampleRetriever: Send + Sync {
    /// Return up to `k` examples most relevant to `question`
    fn retrieve(&self, question: &str, k: usize) -> Vec<String>;
}

/// Retriever that supplies no examples (zero-shot prompting)
pub struct NoExamples;

impl ExampleRetriever for NoExamples {
    fn retrieve(&self, _question: &str, _k: usize) -> Vec<String> {
        Vec::new()
    }
}
