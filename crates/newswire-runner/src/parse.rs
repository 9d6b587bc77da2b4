//! Headline extraction from raw LLM output.
//!
//! The model is asked for one headline per line with no numbering and no
//! quotation marks, but its output is still untrusted text. Each line is
//! cleaned of control characters, list markers, and wrapping quotes; empty
//! results are dropped and the total is capped at the requested count.

use tracing::warn;

use crate::error::RunnerError;

/// Split a raw response into at most `limit` cleaned headlines.
///
/// Fewer than `limit` headlines are accepted (with a warning); surplus lines
/// are dropped.
///
/// # Errors
///
/// Returns [`RunnerError::Parse`] if no usable headline remains.
pub fn extract_headlines(raw: &str, limit: usize) -> Result<Vec<String>, RunnerError> {
    let mut headlines: Vec<String> = raw
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect();

    if headlines.is_empty() {
        return Err(RunnerError::Parse(format!(
            "response contained no headlines: {:?}",
            raw.trim()
        )));
    }

    if headlines.len() > limit {
        warn!(
            received = headlines.len(),
            requested = limit,
            "model returned extra lines, dropping surplus"
        );
        headlines.truncate(limit);
    } else if headlines.len() < limit {
        warn!(
            received = headlines.len(),
            requested = limit,
            "model returned fewer headlines than requested"
        );
    }

    Ok(headlines)
}

/// Normalize one response line into headline text (possibly empty).
fn clean_line(line: &str) -> String {
    let visible: String = line
        .chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    let text = strip_list_marker(visible.trim());
    strip_wrapping_quotes(text).trim().to_owned()
}

/// Remove a leading bullet (`-`, `*`, `•`) or ordinal (`3.`, `3)`).
///
/// A marker only counts when followed by whitespace or nothing, so `-40`
/// and `3.5` stay intact.
fn strip_list_marker(text: &str) -> &str {
    for bullet in ['-', '*', '•'] {
        if let Some(rest) = text.strip_prefix(bullet)
            && ends_marker(rest)
        {
            return rest.trim_start();
        }
    }

    let after_digits = text.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() != text.len()
        && let Some(rest) = after_digits
            .strip_prefix('.')
            .or_else(|| after_digits.strip_prefix(')'))
        && ends_marker(rest)
    {
        return rest.trim_start();
    }

    text
}

fn ends_marker(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

/// Remove one pair of matching quotation marks around the whole line.
fn strip_wrapping_quotes(text: &str) -> &str {
    for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}')] {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    text
}
