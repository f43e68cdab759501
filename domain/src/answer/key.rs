//! Normalized answer keys
//!
//! [`AnswerKey::parse`] maps a free-form answer string to a canonical
//! comparable value. It is total: parsing never fails, because voting must
//! still work on noisy model output. Numeric answers canonicalize to one
//! decimal representation (`"3"`, `"3.0"`, `"03"`, `"$3,000"` all share a
//! key with their numeric equals); everything else falls back to a
//! lower-cased, punctuation-stripped text key.

use serde::{Deserialize, Serialize};

/// A normalized answer key (Value Object)
///
/// The tagged variant makes "equal" unambiguous: numeric keys compare as
/// numbers, text keys as canonical strings, and the two never mix.
///
/// # Example
///
/// ```
/// use tally_domain::AnswerKey;
///
/// assert_eq!(AnswerKey::parse("3"), AnswerKey::parse(" $3.00 "));
/// assert_eq!(AnswerKey::parse("The answer is 3"), AnswerKey::parse("x = 3"));
/// assert_eq!(AnswerKey::parse("Paris!"), AnswerKey::Text("paris".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AnswerKey {
    /// Canonical decimal representation: no trailing zeros, no leading
    /// zeros, no unnecessary sign (`-0` becomes `0`)
    Numeric(String),
    /// Lower-cased, punctuation-stripped, whitespace-collapsed string
    Text(String),
}

impl AnswerKey {
    /// Normalize a raw answer string into a key. Never fails.
    pub fn parse(raw: &str) -> Self {
        let cleaned = cleanup(raw);

        if let Some(v) = parse_numeric(&cleaned) {
            return AnswerKey::Numeric(canonical_decimal(v));
        }

        AnswerKey::Text(text_key(&cleaned))
    }

    /// The canonical string form of the key
    pub fn as_str(&self) -> &str {
        match self {
            AnswerKey::Numeric(s) | AnswerKey::Text(s) => s,
        }
    }

    /// Check if this is a numeric key
    pub fn is_numeric(&self) -> bool {
        matches!(self, AnswerKey::Numeric(_))
    }

    /// Numeric value of the key, if it has one
    pub fn value(&self) -> Option<f64> {
        match self {
            AnswerKey::Numeric(s) => s.parse().ok(),
            AnswerKey::Text(_) => None,
        }
    }
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strip markdown artifacts, `####` markers, and trailing punctuation.
fn cleanup(raw: &str) -> String {
    let mut s = raw.replace("####", " ");
    s = s.replace("<<", "").replace(">>", "");
    s.retain(|c| !matches!(c, '*' | '`' | '[' | ']'));
    s.trim()
        .trim_end_matches(['.', ',', ';', ':', '!', '?'])
        .trim()
        .to_string()
}

/// Best-effort numeric parse of cleaned answer text.
///
/// Tries, in order: the whole string, the segment after the last `=`, and
/// finally individual tokens scanned right-to-left ("The answer is 3").
fn parse_numeric(cleaned: &str) -> Option<f64> {
    if let Some(v) = parse_number_token(cleaned) {
        return Some(v);
    }

    if let Some((_, tail)) = cleaned.rsplit_once('=')
        && let Some(v) = parse_number_token(tail)
    {
        return Some(v);
    }

    cleaned
        .split_whitespace()
        .rev()
        .find_map(parse_number_token)
}

/// Parse one token as a number after stripping currency symbols,
/// thousands separators, and percent signs.
fn parse_number_token(token: &str) -> Option<f64> {
    let stripped: String = token
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',' | '%'))
        .collect();

    if stripped.is_empty() {
        return None;
    }

    // Reject alphabetic parses like "inf" or "nan" — those are words, not
    // answers we can compare numerically.
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical decimal form: integers render without fraction or sign noise,
/// non-integers use the shortest round-trip float form (no trailing zeros).
fn canonical_decimal(v: f64) -> String {
    // Fold -0.0 into 0
    let v = if v == 0.0 { 0.0 } else { v };

    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Lower-cased, punctuation-stripped, whitespace-collapsed text key.
fn text_key(cleaned: &str) -> String {
    let lowered = cleaned.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
