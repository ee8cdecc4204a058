//! Source rewriting applied before the converter sees a document.
//!
//! With `hard_line_breaks` pandoc collapses runs of blank lines into a single
//! paragraph boundary. Replacing each blank line outside fenced code with an
//! explicit empty OpenXML paragraph keeps the vertical spacing authors typed.

use std::borrow::Cow;

/// Raw block inserted in place of every blank line.
pub const PARAGRAPH_BREAK: &str = "```{=openxml}\n<w:p/>\n```";

/// An open fenced code region.
#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

/// Returns the fence opened by `line`, if any.
fn opening_fence(line: &str) -> Option<Fence> {
    let trimmed = line.trim();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}

/// Whether `line` closes `fence`.
fn closes(fence: Fence, line: &str) -> bool {
    let trimmed = line.trim();
    let len = trimmed.chars().take_while(|c| *c == fence.marker).count();
    len >= fence.len && trimmed[len * fence.marker.len_utf8()..].trim().is_empty()
}

/// Rewrites blank lines outside fenced code into [`PARAGRAPH_BREAK`].
///
/// Returns `Cow::Borrowed` when there is nothing to rewrite. An unterminated
/// fence runs to the end of the input. Whether the input ends with a newline
/// is preserved.
pub fn preserve_blank_lines(text: &str) -> Cow<'_, str> {
    let mut fence: Option<Fence> = None;
    let mut changed = false;
    let mut out: Vec<&str> = Vec::new();

    let body = text.strip_suffix('\n').unwrap_or(text);
    let trailing_newline = body.len() != text.len();

    if body.is_empty() {
        return Cow::Borrowed(text);
    }

    for line in body.split('\n') {
        match fence {
            Some(open) => {
                if closes(open, line) {
                    fence = None;
                }
                out.push(line);
            }
            None => {
                if line.trim().is_empty() {
                    out.push(PARAGRAPH_BREAK);
                    changed = true;
                } else {
                    fence = opening_fence(line);
                    out.push(line);
                }
            }
        }
    }

    if !changed {
        return Cow::Borrowed(text);
    }

    let mut rewritten = out.join("\n");
    if trailing_newline {
        rewritten.push('\n');
    }
    Cow::Owned(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_blank_lines_is_unchanged() {
        let text = "# Title\nline one\nline two\n";
        assert!(matches!(preserve_blank_lines(text), Cow::Borrowed(_)));
        assert!(matches!(preserve_blank_lines(""), Cow::Borrowed(_)));
    }

    #[test]
    fn test_blank_lines_are_rewritten() {
        let got = preserve_blank_lines("a\n\n  \nb\n");
        let expected = format!("a\n{0}\n{0}\nb\n", PARAGRAPH_BREAK);
        assert_eq!(got, expected);
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let got = preserve_blank_lines("a\n\nb");
        assert_eq!(got, format!("a\n{}\nb", PARAGRAPH_BREAK));
        assert!(!got.ends_with('\n'));
    }

    #[test]
    fn test_blank_lines_inside_fences_untouched() {
        let text = "```rust\nfn main() {\n\n}\n```\n\nafter\n";
        let got = preserve_blank_lines(text);
        assert_eq!(
            got,
            format!("```rust\nfn main() {{\n\n}}\n```\n{}\nafter\n", PARAGRAPH_BREAK)
        );
    }

    #[test]
    fn test_tilde_fence_needs_matching_length() {
        // A shorter run does not close the fence.
        let text = "~~~~\ncode\n~~~\n\nstill code\n~~~~\n\nout\n";
        let got = preserve_blank_lines(text);
        assert_eq!(
            got,
            format!("~~~~\ncode\n~~~\n\nstill code\n~~~~\n{}\nout\n", PARAGRAPH_BREAK)
        );
    }

    #[test]
    fn test_backticks_do_not_close_tilde_fence() {
        let text = "~~~\n```\n\n~~~\n";
        assert!(matches!(preserve_blank_lines(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_closing_fence_with_info_string_does_not_close() {
        let text = "```\ncode\n```js\n\n```\n\nx\n";
        let got = preserve_blank_lines(text);
        assert_eq!(
            got,
            format!("```\ncode\n```js\n\n```\n{}\nx\n", PARAGRAPH_BREAK)
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = "intro\n```\ncode\n\nmore\n";
        assert!(matches!(preserve_blank_lines(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let once = preserve_blank_lines("a\n\nb\n").into_owned();
        assert!(matches!(preserve_blank_lines(&once), Cow::Borrowed(_)));
    }
}
