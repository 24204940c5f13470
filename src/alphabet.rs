use std::collections::BTreeSet;

/// The set of characters accepted as letters, both in secret words and in guesses.
///
/// Letters are stored lower-cased. Word lists and player input are normalized
/// with [`Alphabet::normalize`] before being checked against the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: BTreeSet<char>,
}

impl Alphabet {
    /// Russian alphabet: `а..=я` plus `ё`, which sits outside that range.
    #[must_use]
    pub fn russian() -> Self {
        Self::from_letters(('а'..='я').chain(std::iter::once('ё')))
    }

    #[must_use]
    pub fn english() -> Self {
        Self::from_letters('a'..='z')
    }

    pub fn from_letters<I: IntoIterator<Item = char>>(letters: I) -> Self {
        Self {
            letters: letters.into_iter().flat_map(char::to_lowercase).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    /// Trim surrounding whitespace and lower-case.
    #[must_use]
    pub fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// One or more alphabet letters and nothing else.
    ///
    /// The check is applied to already normalized text; it does not trim or
    /// change case itself.
    #[must_use]
    pub fn is_valid_word(&self, word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| self.contains(c))
    }

    /// Parse raw player input into a single guess letter.
    ///
    /// Returns `None` unless the normalized input is exactly one character of
    /// this alphabet.
    #[must_use]
    pub fn parse_letter(&self, input: &str) -> Option<char> {
        let normalized = Self::normalize(input);
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if self.contains(letter) => Some(letter),
            _ => None,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::russian()
    }
}
