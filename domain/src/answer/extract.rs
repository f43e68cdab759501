//! Answer extraction from raw model responses
//!
//! These functions pull a final-answer string out of free-form LLM output.
//! They are pure domain logic — no I/O, just text pattern matching — and
//! best-effort by design: an unextractable response yields `None` and simply
//! contributes no candidate to the vote.
//!
//! | Function | Use Case | Marker |
//! |----------|----------|--------|
//! | [`extract_final_answer`] | Chain-of-thought traces | `#### <answer>` |
//! | [`extract_code_answer`] | Program-aided responses | `answer = <number>` |

/// Extract the final answer from a chain-of-thought reasoning trace.
///
/// Looks for a `#### <answer>` line first (the format the CoT prompt
/// demands), then falls back to `answer:` / `final answer:` phrasing.
///
/// # Examples
///
/// ```
/// use tally_domain::extract_final_answer;
///
/// let trace = "Total = 5 + 3 = 8\n\n#### 8";
/// assert_eq!(extract_final_answer(trace), Some("8".to_string()));
///
/// assert_eq!(
///     extract_final_answer("So the final answer: 42"),
///     Some("42".to_string())
/// );
/// assert_eq!(extract_final_answer("no conclusion here"), None);
/// ```
pub fn extract_final_answer(trace: &str) -> Option<String> {
    // Preferred: the last "#### <answer>" line
    for line in trace.lines().rev() {
        if let Some(rest) = line.trim_start().strip_prefix("####") {
            let answer = strip_artifacts(rest);
            if !answer.is_empty() {
                return Some(answer);
            }
        }
    }

    // Fallback: "answer: <value>" / "final answer: <value>" phrasing.
    // Byte offsets from the lowered copy are only valid on ASCII lines.
    for line in trace.lines().rev().filter(|l| l.is_ascii()) {
        let lowered = line.to_lowercase();
        if let Some(pos) = lowered.find("answer") {
            let tail = &line[pos + "answer".len()..];
            let tail = tail.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
            let answer = strip_artifacts(tail);
            if !answer.is_empty() {
                return Some(answer);
            }
        }
    }

    None
}

/// Extract the final answer from a program-aided (code) response.
///
/// Strips markdown fences, then reads the right-hand side of the last
/// top-level `answer = <literal>` assignment. The code is never executed,
/// so only a numeric literal RHS is trustworthy: a variable name or an
/// expression (`answer = total`, `answer = x * 2`) would tally as a wrong
/// key if taken at face value, so such samples yield `None` and contribute
/// no candidate.
///
/// # Examples
///
/// ```
/// use tally_domain::extract_code_answer;
///
/// let code = "```python\ntotal = 5 + 3\nanswer = 8\n```";
/// assert_eq!(extract_code_answer(code), Some("8".to_string()));
/// assert_eq!(extract_code_answer("answer = total"), None);
/// assert_eq!(extract_code_answer("print('hello')"), None);
/// ```
pub fn extract_code_answer(response: &str) -> Option<String> {
    let code = strip_code_fences(response);

    code.lines()
        .rev()
        .find_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix("answer")?.trim_start();
            // Assignment, not comparison
            let rhs = rest.strip_prefix('=')?;
            if rhs.starts_with('=') {
                return None;
            }
            let rhs = rhs.split('#').next().unwrap_or("").trim();
            // Literal values only: never evaluate, never guess
            if rhs.parse::<f64>().is_ok() {
                Some(rhs.to_string())
            } else {
                None
            }
        })
}

/// Remove markdown code fences and language tags from a code response.
fn strip_code_fences(response: &str) -> String {
    response
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim whitespace and common markdown artifacts around an answer.
fn strip_artifacts(s: &str) -> String {
    let mut out = s.to_string();
    out.retain(|c| !matches!(c, '*' | '`' | '[' | ']'));
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hash_marker() {
        let trace = "Starting apples: 5\nApples bought: 3\nTotal = 5 + 3 = 8\n\n#### 8";
        assert_eq!(extract_final_answer(trace), Some("8".to_string()));
    }

    #[test]
    fn test_extract_hash_marker_with_artifacts() {
        assert_eq!(
            extract_final_answer("#### **42**"),
            Some("42".to_string())
        );
        assert_eq!(extract_final_answer("  #### [3]"), Some("3".to_string()));
    }

    #[test]
    fn test_extract_last_hash_line_wins() {
        let trace = "#### 5\nwait, recompute\n#### 7";
        assert_eq!(extract_final_answer(trace), Some("7".to_string()));
    }

    #[test]
    fn test_extract_answer_phrase_fallback() {
        assert_eq!(
            extract_final_answer("The final answer: 42"),
            Some("42".to_string())
        );
        assert_eq!(
            extract_final_answer("Answer: 3000 dollars"),
            Some("3000 dollars".to_string())
        );
    }

    #[test]
    fn test_extract_none_when_no_marker() {
        assert_eq!(extract_final_answer("just some reasoning"), None);
        assert_eq!(extract_final_answer(""), None);
    }

    #[test]
    fn test_extract_code_answer_plain() {
        let code = "distance = 100\ntotal = distance * 2\nanswer = total\nanswer = 200";
        assert_eq!(extract_code_answer(code), Some("200".to_string()));
    }

    #[test]
    fn test_extract_code_answer_fenced() {
        let code = "```python\nx = 3\nanswer = 6\n```";
        assert_eq!(extract_code_answer(code), Some("6".to_string()));
    }

    #[test]
    fn test_extract_code_answer_rejects_variable_rhs() {
        // A bare variable name must not become a text-key vote
        assert_eq!(extract_code_answer("total = 250\nanswer = total"), None);
        assert_eq!(
            extract_code_answer("total_distance = 250\nanswer = total_distance"),
            None
        );
    }

    #[test]
    fn test_extract_code_answer_rejects_expression_rhs() {
        // "x * 2" would normalize to its trailing literal, a wrong answer
        assert_eq!(extract_code_answer("x = 21\nanswer = x * 2"), None);
        assert_eq!(extract_code_answer("answer = 5 + 3"), None);
    }

    #[test]
    fn test_extract_code_answer_accepts_signed_and_float_literals() {
        assert_eq!(extract_code_answer("answer = -3.5"), Some("-3.5".to_string()));
        assert_eq!(extract_code_answer("answer = 0.25"), Some("0.25".to_string()));
    }

    #[test]
    fn test_extract_code_answer_strips_comment() {
        let code = "answer = 42  # the result";
        assert_eq!(extract_code_answer(code), Some("42".to_string()));
    }

    #[test]
    fn test_extract_code_answer_ignores_comparison() {
        assert_eq!(extract_code_answer("if answer == 3:\n    pass"), None);
    }

    #[test]
    fn test_extract_code_answer_missing() {
        assert_eq!(extract_code_answer("result = 9"), None);
        assert_eq!(extract_code_answer(""), None);
    }
}
