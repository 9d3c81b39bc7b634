//! Log sanitization for clinical inputs and key material.
//!
//! Form values are never logged on purpose, but formatted errors and debug
//! output can still carry them (a `{:?}` of a feature vector, for example).
//! Every formatted log line passes through [`SanitizingMakeWriter`], which
//! redacts:
//! - Numeric feature vectors (`[2.0, 120.0, ...]`)
//! - `key=value` pairs naming a form field value
//! - Signing seeds / public keys (long hex or base64 next to a secret-ish name)
//! - PEM private key blocks
//!
//! Inputs larger than `RISKDESK_SANITIZE_MAX_BYTES` (default 16 KiB) are
//! truncated before scanning.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

const RULES: [(&str, &str); 5] = [
    // Two or more numbers in brackets: a feature vector.
    (
        r"\[\s*-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)+\s*,?\s*\]",
        "[REDACTED-FEATURES]",
    ),
    // Field values written as name=value / name: value.
    (
        r"(?i)\b(?:value|values|feature|features|input)\b\s*[:=]\s*-?\d+(?:\.\d+)?",
        "[REDACTED-VALUE]",
    ),
    (
        r"(?i)\b(?:seed|secret|private[_-]?key|signing[_-]?key|key)\b\s*[:=]\s*[A-Za-z0-9+/]{32,}={0,2}",
        "[REDACTED-SECRET]",
    ),
    (r"\b[0-9a-fA-F]{32,}\b", "[REDACTED-KEY]"),
    (
        r"-----BEGIN [A-Z ]*PRIVATE KEY-----[A-Za-z0-9+/=\s]{0,8192}-----END [A-Z ]*PRIVATE KEY-----",
        "[REDACTED-PEM-PRIVATE-KEY]",
    ),
];

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        set: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        rules: RULES
            .iter()
            .map(|(p, replacement)| Rule {
                regex: Regex::new(p).expect("Valid regex"),
                replacement,
            })
            .collect(),
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("RISKDESK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact sensitive patterns from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// True if `input` would be altered by [`sanitize`].
#[must_use]
pub fn contains_sensitive(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted line
/// before it reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // Never buffer more than twice the sanitize cap without a newline.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_feature_vector() {
        let input = "scoring [2.0, 120.0, 70, 20, 79, 25.0, 0.5, 30] failed";
        let sanitized = sanitize(input);
        assert!(sanitized.contains("[REDACTED-FEATURES]"));
        assert!(!sanitized.contains("120.0"));
    }

    #[test]
    fn test_sanitize_field_value() {
        let sanitized = sanitize("bad input value=142.5 for Glucose");
        assert!(sanitized.contains("[REDACTED-VALUE]"));
        assert!(!sanitized.contains("142.5"));
    }

    #[test]
    fn test_sanitize_key_material() {
        let sanitized = sanitize("pubkey 0123456789abcdef0123456789abcdef loaded");
        assert!(sanitized.contains("[REDACTED-KEY]"));

        let sanitized = sanitize("seed=QWxhZGRpbjpvcGVuIHNlc2FtZSB3aXRoIGxvbmcgc2VjcmV0");
        assert!(sanitized.contains("[REDACTED-SECRET]"));
    }

    #[test]
    fn test_plain_log_lines_untouched() {
        let line = "Loaded Diabetes model (n_features=8)";
        assert!(!contains_sensitive(line));
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix 0123456789abcdef suffix", 8);
        assert!(sanitized.ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut out,
                buffer: Vec::new(),
            };
            writer.write_all(b"vector [1, 2, 3]\nok\n").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "vector [REDACTED-FEATURES]\nok\n");
    }
}
