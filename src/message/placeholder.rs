use std::fmt::Display;

/// Token → replacement pairs applied by [`substitute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token`, replacing any earlier value for the same token
    pub fn with(
        mut self,
        token: impl Into<String>,
        value: impl Display,
    ) -> Self {
        let token = token.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest token matching at the start of `text`
    fn match_at(
        &self,
        text: &str,
    ) -> Option<&(String, String)> {
        self.entries
            .iter()
            .filter(|(token, _)| !token.is_empty() && text.starts_with(token.as_str()))
            .max_by_key(|(token, _)| token.len())
    }
}

/// Turns the two-character `\n` and `\t` escapes of catalog texts into real
/// control characters.
pub fn normalize_escapes(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

/// Normalizes escapes, then replaces every token occurrence in a single
/// left-to-right pass.
///
/// Replacement values are never rescanned, so the result does not depend on
/// registration order. Unknown `#...#` markers stay verbatim.
pub fn substitute(
    template: &str,
    placeholders: &Placeholders,
) -> String {
    let text = normalize_escapes(template);
    if placeholders.is_empty() {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();
    while let Some(ch) = rest.chars().next() {
        if let Some((token, value)) = placeholders.match_at(rest) {
            out.push_str(value);
            rest = &rest[token.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}
