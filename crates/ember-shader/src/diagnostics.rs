//! Driver info-log handling.
//!
//! Compile logs are always read from the stage object and link logs from the
//! program object. Nothing here prints; callers get the text inside
//! [`crate::ShaderError`].

use crate::error::FailedStep;

/// Normalizes a raw driver info log into a diagnostic message.
///
/// Trailing whitespace and NULs are stripped. With `max_len`, the message is
/// cut at the last character boundary at or below that many bytes. If nothing
/// is left the result is a synthesized message naming `step`, so a failure
/// never carries empty text.
pub(crate) fn diagnostic_message(raw: String, step: FailedStep, max_len: Option<usize>) -> String {
    let mut message = raw;
    let kept = message.trim_end_matches(|c: char| c.is_whitespace() || c == '\0').len();
    message.truncate(kept);

    if let Some(max) = max_len {
        if message.len() > max {
            let mut cut = max;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
    }

    if message.is_empty() {
        return format!("{step} failed without a driver message");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_whitespace_and_nul_removed() {
        let msg = diagnostic_message("0:1(1): error: oops\n\0\0".into(), FailedStep::Vertex, None);
        assert_eq!(msg, "0:1(1): error: oops");
    }

    #[test]
    fn empty_log_gets_synthesized_text() {
        let msg = diagnostic_message(" \n".into(), FailedStep::Link, None);
        assert_eq!(msg, "program link failed without a driver message");
    }

    #[test]
    fn unbounded_keeps_full_message() {
        let long = "e".repeat(2048);
        let msg = diagnostic_message(long.clone(), FailedStep::Fragment, None);
        assert_eq!(msg, long);
    }

    #[test]
    fn bounded_truncates_to_limit() {
        let msg = diagnostic_message("e".repeat(600), FailedStep::Fragment, Some(512));
        assert_eq!(msg.len(), 512);
    }

    #[test]
    fn zero_cap_still_yields_text() {
        let msg = diagnostic_message("0:1(1): error: oops".into(), FailedStep::Vertex, Some(0));
        assert_eq!(msg, "vertex compile failed without a driver message");
    }

    #[test]
    fn cap_inside_first_char_still_yields_text() {
        let msg = diagnostic_message("é driver".into(), FailedStep::Link, Some(1));
        assert_eq!(msg, "program link failed without a driver message");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; a cut at 3 would split the second one.
        let msg = diagnostic_message("éé".into(), FailedStep::Vertex, Some(3));
        assert_eq!(msg, "é");
    }
}
