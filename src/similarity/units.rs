// Unit extraction — split a document into comparable lines.
//
// A unit is one line of the document, trimmed, kept only when it is long
// enough to carry meaning on its own. Headings, blank lines and short
// fragments fall below the cutoff and never reach the vectorizer.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Lines with this many characters or fewer (after trimming) are discarded.
pub const DEFAULT_MIN_UNIT_CHARS: usize = 20;

/// Every line boundary a plain-text document can use, `\r\n` first so it is
/// consumed as one break instead of two.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C\x1D\x1E\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern is valid")
});

/// One retained line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Position of the source line in the document (0-based)
    pub line: usize,
    /// The trimmed line text
    pub text: String,
}

/// Split a document into units, keeping lines whose trimmed length exceeds
/// `min_chars` characters. Order follows the document.
pub fn extract_units(document: &str, min_chars: usize) -> Vec<Unit> {
    let mut units = Vec::new();

    for (line, raw) in LINE_BREAK.split(document).enumerate() {
        let text = raw.trim();
        // Count characters, not bytes, so accented text isn't favoured
        if text.chars().count() <= min_chars {
            continue;
        }
        units.push(Unit {
            line,
            text: text.to_string(),
        });
    }

    units
}
