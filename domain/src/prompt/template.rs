//! Prompt templates for the solver strategies

use crate::strategy::Strategy;

/// Templates for generating prompts per strategy
///
/// How many worked examples the caller passes in is the retriever's
/// decision (the configured k); the template embeds them all.
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for chain-of-thought sampling
    pub fn cot_system() -> &'static str {
        r#"You are a mathematical reasoning assistant that solves problems step by step.

CRITICAL: Always end your solution with a line in this exact format:
#### [final_answer]

Where [final_answer] is just the numeric or text answer.

Example:
Problem: John has 5 apples and buys 3 more. How many total?

Solution:
Starting apples: 5
Apples bought: 3
Total = 5 + 3 = 8

#### 8"#
    }

    /// User prompt for chain-of-thought sampling
    pub fn cot_query(question: &str, few_shots: &[String]) -> String {
        format!(
            r#"{}Problem: {}

Solve this step by step. Show all your work. End with: #### [answer]"#,
            Self::few_shot_block(few_shots),
            question
        )
    }

    /// System prompt for program-aided sampling
    ///
    /// The code is read, not run: the final line must carry the computed
    /// number as a literal, and the example demonstrates exactly that.
    pub fn pal_system() -> &'static str {
        r#"You are a Python code generator for solving math problems.

RULES:
1. Output ONLY executable Python code
2. Do NOT use markdown code blocks (no ```)
3. Use only built-in Python (no imports)
4. Use descriptive variable names for intermediate steps
5. The LAST line must be `answer = <number>` where <number> is the
   final numeric result written out as a plain literal (not a variable
   or expression)

Example:
distance_ab = 100
distance_bc = distance_ab + 50
total_distance = distance_ab + distance_bc
answer = 250"#
    }

    /// User prompt for program-aided sampling
    pub fn pal_query(question: &str, few_shots: &[String]) -> String {
        format!(
            r#"{}Problem: {}

Write Python code that solves this step-by-step. Output ONLY the code.
End with: answer = <number>"#,
            Self::few_shot_block(few_shots),
            question
        )
    }

    /// System prompt for the given strategy
    pub fn system_for(strategy: Strategy) -> &'static str {
        match strategy {
            Strategy::Cot => Self::cot_system(),
            Strategy::Pal => Self::pal_system(),
        }
    }

    /// User prompt for the given strategy
    pub fn query_for(strategy: Strategy, question: &str, few_shots: &[String]) -> String {
        match strategy {
            Strategy::Cot => Self::cot_query(question, few_shots),
            Strategy::Pal => Self::pal_query(question, few_shots),
        }
    }

    /// Render a worked example as it appears inside a prompt
    pub fn format_example(question: &str, answer: &str) -> String {
        format!("Question: {}\nAnswer: {}", question, answer)
    }

    fn few_shot_block(few_shots: &[String]) -> String {
        if few_shots.is_empty() {
            return String::new();
        }
        let mut block = few_shots.join("\n\n");
        block.push_str("\n\n");
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cot_query_contains_question_and_marker() {
        let prompt = PromptTemplate::cot_query("If 3x+2=11, what is x?", &[]);
        assert!(prompt.contains("If 3x+2=11, what is x?"));
        assert!(prompt.contains("#### [answer]"));
    }

    #[test]
    fn test_every_supplied_few_shot_is_embedded() {
        let shots = vec![
            "Question: 1+1?\nAnswer: #### 2".to_string(),
            "Question: 2+2?\nAnswer: #### 4".to_string(),
            "Question: 3+3?\nAnswer: #### 6".to_string(),
        ];
        let prompt = PromptTemplate::cot_query("4+4?", &shots);
        // The configured k decides the count upstream; nothing is dropped here
        assert!(prompt.contains("1+1?"));
        assert!(prompt.contains("2+2?"));
        assert!(prompt.contains("3+3?"));
    }

    #[test]
    fn test_pal_query_demands_code() {
        let prompt = PromptTemplate::pal_query("2+2?", &[]);
        assert!(prompt.contains("Output ONLY the code"));
        assert!(prompt.contains("answer = <number>"));
    }

    #[test]
    fn test_pal_prompt_example_survives_static_extraction() {
        // The worked example in the system prompt must itself end in a
        // literal assignment, or models imitating it produce samples the
        // extractor has to throw away.
        let example_tail = "answer = 250";
        assert!(PromptTemplate::pal_system().ends_with(example_tail));
        assert_eq!(
            crate::answer::extract::extract_code_answer(PromptTemplate::pal_system()),
            Some("250".to_string())
        );
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(
            PromptTemplate::system_for(Strategy::Cot),
            PromptTemplate::cot_system()
        );
        let q = PromptTemplate::query_for(Strategy::Pal, "2+2?", &[]);
        assert!(q.contains("Write Python code"));
    }

    #[test]
    fn test_format_example() {
        let e = PromptTemplate::format_example("2+2?", "4");
        assert_eq!(e, "Question: 2+2?\nAnswer: 4");
    }
}
