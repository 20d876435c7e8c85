//! Delimiter-set tokenizer for loosely structured `/proc` lines.
//!
//! `Tokens` walks a line and yields maximal runs of non-delimiter characters.
//! Any run of delimiter characters counts as one separator, so empty tokens
//! never appear. Once exhausted the cursor stays exhausted.

use std::iter::FusedIterator;

/// Cursor over a borrowed line and a set of delimiter characters.
#[derive(Debug, Clone)]
pub struct Tokens<'a, 'd> {
    rest: Option<&'a str>,
    delimiters: &'d str,
}

impl<'a, 'd> Tokens<'a, 'd> {
    /// Starts a cursor at the beginning of `text`.
    ///
    /// Every character of `delimiters` is a separator on its own; the string
    /// is a set, not a sequence.
    pub fn new(text: &'a str, delimiters: &'d str) -> Self {
        Self {
            rest: Some(text),
            delimiters,
        }
    }

    /// Returns the unread text after the delimiter that ended the last token.
    ///
    /// Only the single delimiter directly after the token is consumed, so
    /// the remainder may start with further delimiters. Empty once exhausted.
    pub fn remainder(&self) -> &'a str {
        self.rest.unwrap_or("")
    }

    /// Returns `true` once the cursor can yield no more tokens.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_none()
    }
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let delimiters = self.delimiters;
        let is_delimiter = |c: char| delimiters.contains(c);

        let Some(start) = rest.find(|c: char| !is_delimiter(c)) else {
            self.rest = None;
            return None;
        };
        let body = &rest[start..];

        match body.char_indices().find(|&(_, c)| is_delimiter(c)) {
            Some((end, delimiter)) => {
                self.rest = Some(&body[end + delimiter.len_utf8()..]);
                Some(&body[..end])
            }
            None => {
                self.rest = None;
                Some(body)
            }
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}
