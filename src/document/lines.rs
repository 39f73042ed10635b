//! Flat line model of a document.

/// A document split on `\n`.
///
/// A final trailing newline is not treated as an extra empty line; it is
/// remembered and restored on output, so untouched lines round-trip byte
/// for byte.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    lines: Vec<&'a str>,
    trailing_newline: bool,
}

impl<'a> Lines<'a> {
    /// Splits `text` into lines.
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = if trailing_newline {
            &text[..text.len() - 1]
        } else {
            text
        };
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n').collect()
        };

        Self {
            lines,
            trailing_newline,
        }
    }

    /// The lines, without terminators.
    #[must_use]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true for an empty document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the document with `inserted` placed before line `at`.
    ///
    /// `at` is clamped to the document length. Elements of `inserted` may
    /// themselves contain newlines.
    #[must_use]
    pub fn splice<S: AsRef<str>>(&self, at: usize, inserted: &[S]) -> String {
        let at = at.min(self.lines.len());
        let (before, after) = self.lines.split_at(at);
        let joined: Vec<&str> = before
            .iter()
            .copied()
            .chain(inserted.iter().map(AsRef::as_ref))
            .chain(after.iter().copied())
            .collect();
        self.finish(&joined)
    }

    /// Returns the document with line `index` replaced by `line`.
    #[must_use]
    pub fn replace(&self, index: usize, line: &str) -> String {
        let joined: Vec<&str> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, l)| if i == index { line } else { *l })
            .collect();
        self.finish(&joined)
    }

    fn finish(&self, lines: &[&str]) -> String {
        let mut out = lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}
