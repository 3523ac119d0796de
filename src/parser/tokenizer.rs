//! `[TAG]Value` line tokenizer.

use super::{Diagnostics, Parsed};

/// One `[TAG]Value` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedLine {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Tag, upper-cased.
    pub tag: String,
    /// Everything after the closing bracket, trimmed.
    pub value: String,
}

/// Split text into tagged lines.
///
/// Blank lines are skipped. Lines that are not `[TAG]Value` are dropped
/// with a warning.
#[must_use]
pub fn tokenize(text: &str) -> Parsed<Vec<TaggedLine>> {
    let mut diag = Diagnostics::default();
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        diag.at_line(number);

        let tagged = line
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .filter(|(tag, _)| !tag.trim().is_empty());
        match tagged {
            Some((tag, value)) => lines.push(TaggedLine {
                number,
                tag: tag.trim().to_ascii_uppercase(),
                value: value.trim().to_string(),
            }),
            None => diag.warn(format!("expected [TAG]Value, found '{}'", line)),
        }
    }

    diag.finish(lines)
}
