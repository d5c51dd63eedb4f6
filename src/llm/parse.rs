//! Parsing of the model's free-form answer into a [`Motivation`].
//!
//! The generation prompt asks for a bare JSON object, but the model may
//! wrap it in a Markdown code fence or return something unusable.  The
//! service never fails a request over that: [`parse_motivation`] always
//! yields a usable pair, substituting a fixed fallback when the answer
//! cannot be used as-is.  The outcome is typed ([`QuoteOutcome`]) so
//! callers and tests can tell *which* fallback path fired instead of
//! inferring it from string equality.

use serde_json::Value;

// ---------------------------------------------------------------------------
// Motivation
// ---------------------------------------------------------------------------

/// A quote and the role model it is attributed to.
///
/// Produced by [`parse_motivation`]; both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motivation {
    /// One-liner motivational quote.  This exact string is sent to the
    /// speech synthesizer and echoed in the `X-Quote` response header.
    pub quote: String,
    /// Person the quote is attributed to, echoed in `X-RoleModel`.
    pub role_model: String,
}

// ---------------------------------------------------------------------------
// Fallback pairs
// ---------------------------------------------------------------------------

/// Substituted when the model's answer is not valid JSON at all.
fn parse_failure_fallback() -> Motivation {
    Motivation {
        quote: "Believe you can and you're halfway there.".into(),
        role_model: "Theodore Roosevelt".into(),
    }
}

/// Substituted when the JSON parses but lacks a usable `quote`/`roleModel`.
fn structure_fallback() -> Motivation {
    Motivation {
        quote: "The journey of a thousand miles begins with a single step.".into(),
        role_model: "Lao Tzu".into(),
    }
}

// ---------------------------------------------------------------------------
// QuoteOutcome
// ---------------------------------------------------------------------------

/// Why a fallback pair was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The answer was not valid JSON after fence stripping.
    InvalidJson,
    /// The JSON parsed but `quote` or `roleModel` was absent, not a
    /// string, or empty.
    MissingFields,
}

/// Result of probing the model's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// The answer carried a usable quote/role-model pair.
    Parsed(Motivation),
    /// The answer was unusable; `motivation` is the fixed substitute.
    Fallback {
        motivation: Motivation,
        reason: FallbackReason,
    },
}

impl QuoteOutcome {
    /// Consume the outcome and return the pair to proceed with.
    pub fn into_motivation(self) -> Motivation {
        match self {
            QuoteOutcome::Parsed(m) => m,
            QuoteOutcome::Fallback { motivation, .. } => motivation,
        }
    }

    /// The fallback reason, if a substitution happened.
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            QuoteOutcome::Parsed(_) => None,
            QuoteOutcome::Fallback { reason, .. } => Some(*reason),
        }
    }
}

// ---------------------------------------------------------------------------
// parse_motivation
// ---------------------------------------------------------------------------

/// Probe the model's raw answer for a `{quote, roleModel}` object.
///
/// Never fails: unusable answers yield a [`QuoteOutcome::Fallback`] so the
/// synthesis step downstream always receives valid text.
pub fn parse_motivation(raw: &str) -> QuoteOutcome {
    let cleaned = strip_code_fence(raw);

    let value: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(_) => {
            return QuoteOutcome::Fallback {
                motivation: parse_failure_fallback(),
                reason: FallbackReason::InvalidJson,
            }
        }
    };

    let quote = value.get("quote").and_then(Value::as_str).map(str::trim);
    let role_model = value.get("roleModel").and_then(Value::as_str).map(str::trim);

    match (quote, role_model) {
        (Some(quote), Some(role_model)) if !quote.is_empty() && !role_model.is_empty() => {
            QuoteOutcome::Parsed(Motivation {
                quote: quote.to_string(),
                role_model: role_model.to_string(),
            })
        }
        _ => QuoteOutcome::Fallback {
            motivation: structure_fallback(),
            reason: FallbackReason::MissingFields,
        },
    }
}

/// Remove one optional surrounding Markdown code fence.
///
/// Handles both the tagged (```` ```json ````) and bare (```` ``` ````)
/// opening marker.
fn strip_code_fence(raw: &str) -> &str {
    let s = raw.trim();
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    let s = s.strip_suffix("```").unwrap_or(s);
    s.trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- happy paths ---

    #[test]
    fn bare_json_object_parses() {
        let outcome = parse_motivation(r#"{"quote": "Keep going.", "roleModel": "Marie Curie"}"#);

        match outcome {
            QuoteOutcome::Parsed(m) => {
                assert_eq!(m.quote, "Keep going.");
                assert_eq!(m.role_model, "Marie Curie");
            }
            other => panic!("expected Parsed, got {other:?}"),
        }
    }

    #[test]
    fn tagged_fence_is_stripped() {
        let raw = "```json\n{\"quote\": \"Q\", \"roleModel\": \"R\"}\n```";
        assert!(parse_motivation(raw).fallback_reason().is_none());
    }

    #[test]
    fn bare_fence_is_stripped() {
        let raw = "```\n{\"quote\": \"Q\", \"roleModel\": \"R\"}\n```";
        assert!(parse_motivation(raw).fallback_reason().is_none());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let raw = "  \n```json\n  {\"quote\": \"Q\", \"roleModel\": \"R\"}  \n```  \n";
        assert!(parse_motivation(raw).fallback_reason().is_none());
    }

    #[test]
    fn field_values_are_trimmed() {
        let outcome = parse_motivation(r#"{"quote": "  Q  ", "roleModel": " R "}"#);
        let m = outcome.into_motivation();
        assert_eq!(m.quote, "Q");
        assert_eq!(m.role_model, "R");
    }

    // --- invalid JSON → parse-failure fallback ---

    #[test]
    fn non_json_text_falls_back_with_invalid_json_reason() {
        let outcome = parse_motivation("Here is a nice quote for you!");

        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::InvalidJson));
        let m = outcome.into_motivation();
        assert_eq!(m.quote, "Believe you can and you're halfway there.");
        assert_eq!(m.role_model, "Theodore Roosevelt");
    }

    #[test]
    fn truncated_json_falls_back_with_invalid_json_reason() {
        let outcome = parse_motivation(r#"{"quote": "Keep go"#);
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::InvalidJson));
    }

    // --- structural mismatch → structure fallback ---

    #[test]
    fn missing_role_model_falls_back_with_missing_fields_reason() {
        let outcome = parse_motivation(r#"{"quote": "Keep going."}"#);

        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::MissingFields)
        );
        let m = outcome.into_motivation();
        assert_eq!(
            m.quote,
            "The journey of a thousand miles begins with a single step."
        );
        assert_eq!(m.role_model, "Lao Tzu");
    }

    #[test]
    fn missing_quote_falls_back_with_missing_fields_reason() {
        let outcome = parse_motivation(r#"{"roleModel": "Marie Curie"}"#);
        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::MissingFields)
        );
    }

    #[test]
    fn empty_quote_counts_as_missing() {
        let outcome = parse_motivation(r#"{"quote": "", "roleModel": "Marie Curie"}"#);
        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::MissingFields)
        );
    }

    #[test]
    fn non_string_quote_counts_as_missing() {
        let outcome = parse_motivation(r#"{"quote": 42, "roleModel": "Marie Curie"}"#);
        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::MissingFields)
        );
    }

    #[test]
    fn valid_json_non_object_counts_as_missing() {
        // A quoted string is valid JSON but has no fields to extract.
        let outcome = parse_motivation(r#""just a string""#);
        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::MissingFields)
        );
    }

    // --- fallback pairs always usable ---

    #[test]
    fn fallback_pairs_are_non_empty() {
        for outcome in [parse_motivation("not json"), parse_motivation("{}")] {
            let m = outcome.into_motivation();
            assert!(!m.quote.is_empty());
            assert!(!m.role_model.is_empty());
        }
    }

    // --- strip_code_fence ---

    #[test]
    fn strip_fence_leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("plain text"), "plain text");
    }

    #[test]
    fn strip_fence_removes_tagged_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
    }

    #[test]
    fn strip_fence_does_not_eat_inner_backticks() {
        assert_eq!(strip_code_fence("a ``` b"), "a ``` b");
    }
}
