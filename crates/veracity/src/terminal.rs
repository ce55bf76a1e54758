//! Helpers for plain-text front ends: how entries are laid out as lines,
//! and how typed lines turn into a draft.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use veracity_core::transcript::{Content, Entry};

/// Shown above an empty transcript.
pub const EMPTY_HINT: &str = "💬 Ask me anything to verify it!";

/// Shown under the input.
pub const DISCLAIMER: &str =
    "AI may occasionally be incorrect. Verify from reliable sources.";

/// A line as typed at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineInput<'a> {
    /// The line ended with a backslash: keep composing, this part goes on
    /// its own line in the draft.
    Continue(&'a str),
    /// A plain Enter: this part completes the draft, submit it.
    Submit(&'a str),
}

impl<'a> LineInput<'a> {
    /// Classifies a line read from the terminal, line ending included or
    /// not.
    pub fn parse(line: &'a str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        match line.strip_suffix('\\') {
            Some(part) => LineInput::Continue(part),
            None => LineInput::Submit(line),
        }
    }
}

/// Lays out an entry as display lines, without any styling.
///
/// A verdict becomes a `Verdict:` line, a `Confidence:` line and, if
/// present, a blank line followed by the explanation. Fields the service
/// left out show up empty.
pub fn entry_lines(entry: &Entry) -> Vec<String> {
    match entry.content() {
        Content::Text(text) => text.lines().map(ToOwned::to_owned).collect(),
        Content::Verdict(verdict) => {
            let label = verdict.display_verdict().unwrap_or_default();
            let confidence =
                verdict.display_confidence().unwrap_or_default();
            let mut lines = vec![
                format!("Verdict: {label}"),
                format!("Confidence: {confidence}"),
            ];
            if let Some(explanation) = verdict.display_explanation() {
                lines.push(String::new());
                lines.extend(explanation.lines().map(ToOwned::to_owned));
            }
            lines
        }
    }
}

/// Reads one line, line ending included. Returns `None` at the end of
/// input or on a read error.
///
/// Keep one reader for the whole session: whatever it has buffered beyond
/// this line belongs to the next call.
pub async fn read_line<R>(reader: &mut R) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            tracing::error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use veracity_model::Verdict;

    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(LineInput::parse("hello\n"), LineInput::Submit("hello"));
        assert_eq!(LineInput::parse("hello\r\n"), LineInput::Submit("hello"));
        assert_eq!(
            LineInput::parse("first \\\n"),
            LineInput::Continue("first ")
        );
        assert_eq!(LineInput::parse("\\"), LineInput::Continue(""));
        assert_eq!(LineInput::parse("   "), LineInput::Submit("   "));
    }

    #[tokio::test]
    async fn test_read_pasted_lines() {
        let mut input: &[u8] = b"claim part one \\\npart two\nnext claim\n";

        let mut lines = Vec::new();
        while let Some(line) = read_line(&mut input).await {
            lines.push(line);
        }
        assert_eq!(
            lines,
            ["claim part one \\\n", "part two\n", "next claim\n"]
        );
        assert_eq!(
            LineInput::parse(&lines[0]),
            LineInput::Continue("claim part one ")
        );
        assert_eq!(LineInput::parse(&lines[1]), LineInput::Submit("part two"));
    }

    #[test]
    fn test_verdict_lines() {
        let entry = Entry::verdict(Verdict::new(
            "Likely False",
            "82%",
            "No credible source corroborates this claim.",
        ));
        assert_eq!(
            entry_lines(&entry),
            [
                "Verdict: Likely False",
                "Confidence: 82%",
                "",
                "No credible source corroborates this claim.",
            ]
        );
    }

    #[test]
    fn test_partial_verdict_lines() {
        let entry = Entry::verdict(Verdict {
            verdict: Some("True".into()),
            ..Default::default()
        });
        assert_eq!(entry_lines(&entry), ["Verdict: True", "Confidence: "]);
    }

    #[test]
    fn test_non_text_fields() {
        let entry = Entry::verdict(Verdict::new(true, 82, "Plain."));
        assert_eq!(
            entry_lines(&entry),
            ["Verdict: true", "Confidence: 82", "", "Plain."]
        );
    }

    #[test]
    fn test_text_lines() {
        let entry = Entry::user("line one\nline two");
        assert_eq!(entry_lines(&entry), ["line one", "line two"]);
    }
}
