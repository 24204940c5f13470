//! Round state machine.
//!
//! A [`RoundEngine`] owns the state of one round and processes guesses. Every
//! call to [`RoundEngine::submit_guess`] returns a [`GuessResult`]: what
//! happened to the guess plus a [`RoundSnapshot`] of the state afterwards.
//!
//! # State transitions
//! - `InProgress` → `Won` once the last hidden position is revealed
//! - `InProgress` → `Lost` once wrong attempts reach the configured maximum
//! - terminal states never change again

use crate::alphabet::Alphabet;
use crate::error::ConfigError;
use crate::wordbank::SecretWord;
use thiserror::Error;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_PLACEHOLDER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    alphabet: Alphabet,
    max_attempts: u32,
    placeholder: char,
}

impl RoundConfig {
    pub fn new(
        alphabet: Alphabet,
        max_attempts: u32,
        placeholder: char,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if alphabet.contains(placeholder) {
            return Err(ConfigError::PlaceholderInAlphabet(placeholder));
        }
        Ok(Self {
            alphabet,
            max_attempts,
            placeholder,
        })
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn placeholder(&self) -> char {
        self.placeholder
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::russian(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Why a guess was not applied. The round state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("'{0}' is not a letter of the alphabet")]
    InvalidLetter(char),

    #[error("letter '{0}' was already guessed")]
    RepeatedGuess(char),

    #[error("the round is already over")]
    RoundAlreadyTerminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessSignal {
    /// The letter occurs in the word; `revealed` positions were uncovered.
    Correct { letter: char, revealed: usize },
    Incorrect { letter: char },
    Rejected(GuessRejection),
}

/// Read-only view of a round handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub mask: Vec<char>,
    /// In the order they were guessed.
    pub used_letters: Vec<char>,
    pub wrong_attempts: u32,
    pub max_attempts: u32,
    pub outcome: Outcome,
    /// The secret word, only once the round is over.
    pub solution: Option<String>,
}

impl RoundSnapshot {
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.mask.iter().collect()
    }

    #[must_use]
    pub fn attempts_left(&self) -> u32 {
        self.max_attempts - self.wrong_attempts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub signal: GuessSignal,
    pub snapshot: RoundSnapshot,
}

#[derive(Debug)]
pub struct RoundEngine {
    config: RoundConfig,
    secret: Vec<char>,
    mask: Vec<char>,
    hidden: usize,
    used_letters: Vec<char>,
    wrong_attempts: u32,
    outcome: Outcome,
}

impl RoundEngine {
    /// Start a round.
    ///
    /// `secret` must have been parsed with the same alphabet as `config`,
    /// otherwise some positions could never be revealed.
    #[must_use]
    pub fn new(secret: &SecretWord, config: RoundConfig) -> Self {
        debug_assert!(
            config.alphabet.is_valid_word(secret.as_str()),
            "secret word {secret} is not spelled with the round's alphabet"
        );
        let secret: Vec<char> = secret.chars().collect();
        let mask = vec![config.placeholder; secret.len()];
        Self {
            hidden: secret.len(),
            secret,
            mask,
            used_letters: Vec::new(),
            wrong_attempts: 0,
            outcome: Outcome::InProgress,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            mask: self.mask.clone(),
            used_letters: self.used_letters.clone(),
            wrong_attempts: self.wrong_attempts,
            max_attempts: self.config.max_attempts,
            outcome: self.outcome,
            solution: self
                .outcome
                .is_terminal()
                .then(|| self.secret.iter().collect()),
        }
    }

    /// Apply one guessed letter.
    ///
    /// The letter is expected lower-case, as produced by
    /// [`Alphabet::parse_letter`]; anything outside the alphabet is rejected.
    pub fn submit_guess(&mut self, letter: char) -> GuessResult {
        let signal = match self.apply(letter) {
            Ok(signal) => signal,
            Err(rejection) => {
                log::debug!("Guess '{letter}' rejected: {rejection}");
                GuessSignal::Rejected(rejection)
            }
        };
        GuessResult {
            signal,
            snapshot: self.snapshot(),
        }
    }

    fn apply(&mut self, letter: char) -> Result<GuessSignal, GuessRejection> {
        if self.outcome.is_terminal() {
            return Err(GuessRejection::RoundAlreadyTerminal);
        }
        if !self.config.alphabet.contains(letter) {
            return Err(GuessRejection::InvalidLetter(letter));
        }
        if self.used_letters.contains(&letter) {
            return Err(GuessRejection::RepeatedGuess(letter));
        }
        self.used_letters.push(letter);

        let revealed = self.reveal(letter);
        if revealed > 0 {
            if self.hidden == 0 {
                self.outcome = Outcome::Won;
                log::info!("Round won with {} wrong attempts", self.wrong_attempts);
            }
            Ok(GuessSignal::Correct { letter, revealed })
        } else {
            self.wrong_attempts += 1;
            if self.wrong_attempts >= self.config.max_attempts {
                self.outcome = Outcome::Lost;
                log::info!("Round lost after {} wrong attempts", self.wrong_attempts);
            }
            Ok(GuessSignal::Incorrect { letter })
        }
    }

    /// Uncover every position holding `letter`, not just the first.
    fn reveal(&mut self, letter: char) -> usize {
        let mut revealed = 0;
        for (slot, &actual) in self.mask.iter_mut().zip(&self.secret) {
            if actual == letter && *slot == self.config.placeholder {
                *slot = actual;
                revealed += 1;
            }
        }
        self.hidden -= revealed;
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn word(text: &str) -> SecretWord {
        SecretWord::parse(text, &Alphabet::russian()).unwrap()
    }

    fn engine(text: &str, max_attempts: u32) -> RoundEngine {
        let config = RoundConfig::new(Alphabet::russian(), max_attempts, '_').unwrap();
        RoundEngine::new(&word(text), config)
    }

    #[test]
    fn test_new_round_is_fully_masked() {
        let snapshot = engine("кот", 6).snapshot();
        assert_eq!(snapshot.masked_word(), "___");
        assert!(snapshot.used_letters.is_empty());
        assert_eq!(snapshot.wrong_attempts, 0);
        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.solution, None);
    }

    #[test]
    fn test_guessing_every_letter_wins() {
        let mut round = engine("кот", 6);

        let result = round.submit_guess('к');
        assert_eq!(result.snapshot.masked_word(), "к__");
        assert_eq!(result.snapshot.outcome, Outcome::InProgress);

        let result = round.submit_guess('о');
        assert_eq!(result.snapshot.masked_word(), "ко_");

        let result = round.submit_guess('т');
        assert_eq!(result.snapshot.masked_word(), "кот");
        assert_eq!(result.snapshot.outcome, Outcome::Won);
        assert_eq!(result.snapshot.solution.as_deref(), Some("кот"));
    }

    #[test]
    fn test_running_out_of_attempts_loses() {
        let mut round = engine("кот", 2);

        let result = round.submit_guess('а');
        assert_eq!(result.signal, GuessSignal::Incorrect { letter: 'а' });
        assert_eq!(result.snapshot.wrong_attempts, 1);
        assert_eq!(result.snapshot.outcome, Outcome::InProgress);

        let result = round.submit_guess('б');
        assert_eq!(result.snapshot.wrong_attempts, 2);
        assert_eq!(result.snapshot.outcome, Outcome::Lost);
        assert_eq!(result.snapshot.masked_word(), "___");
        assert_eq!(result.snapshot.attempts_left(), 0);
    }

    #[test]
    fn test_repeated_guess_changes_nothing() {
        let mut round = engine("ёж", 6);

        let first = round.submit_guess('ё');
        assert_eq!(
            first.signal,
            GuessSignal::Correct {
                letter: 'ё',
                revealed: 1
            }
        );

        let second = round.submit_guess('ё');
        assert_eq!(
            second.signal,
            GuessSignal::Rejected(GuessRejection::RepeatedGuess('ё'))
        );
        assert_eq!(second.snapshot, first.snapshot);
        assert_eq!(second.snapshot.masked_word(), "ё_");
    }

    #[test]
    fn test_repeated_wrong_guess_does_not_consume_attempt() {
        let mut round = engine("кот", 6);
        round.submit_guess('я');
        let result = round.submit_guess('я');
        assert_eq!(result.snapshot.wrong_attempts, 1);
        assert_eq!(result.snapshot.used_letters, vec!['я']);
    }

    #[test]
    fn test_repeated_letters_are_all_revealed() {
        let mut round = engine("молоко", 6);
        let result = round.submit_guess('о');
        assert_eq!(
            result.signal,
            GuessSignal::Correct {
                letter: 'о',
                revealed: 3
            }
        );
        assert_eq!(result.snapshot.masked_word(), "_о_о_о");
    }

    #[test]
    fn test_invalid_letter_is_rejected() {
        let mut round = engine("кот", 6);
        for letter in ['k', '1', 'К', ' ', '_'] {
            let result = round.submit_guess(letter);
            assert_eq!(
                result.signal,
                GuessSignal::Rejected(GuessRejection::InvalidLetter(letter))
            );
        }
        let snapshot = round.snapshot();
        assert!(snapshot.used_letters.is_empty());
        assert_eq!(snapshot.wrong_attempts, 0);
    }

    #[test]
    fn test_guess_after_win_is_rejected() {
        let mut round = engine("ёж", 6);
        round.submit_guess('ё');
        round.submit_guess('ж');
        assert_eq!(round.outcome(), Outcome::Won);

        let result = round.submit_guess('а');
        assert_eq!(
            result.signal,
            GuessSignal::Rejected(GuessRejection::RoundAlreadyTerminal)
        );
        assert_eq!(result.snapshot.outcome, Outcome::Won);
        assert_eq!(result.snapshot.wrong_attempts, 0);
    }

    #[test]
    fn test_guess_after_loss_is_rejected() {
        let mut round = engine("кот", 1);
        round.submit_guess('а');
        assert_eq!(round.outcome(), Outcome::Lost);

        let result = round.submit_guess('к');
        assert_eq!(
            result.signal,
            GuessSignal::Rejected(GuessRejection::RoundAlreadyTerminal)
        );
        assert_eq!(result.snapshot.masked_word(), "___");
    }

    #[test]
    fn test_win_on_last_attempt_boundary() {
        // Five misses then the only letter: the round is won, not lost.
        let mut round = engine("аа", 6);
        for letter in ['б', 'в', 'г', 'д', 'е'] {
            round.submit_guess(letter);
        }
        let result = round.submit_guess('а');
        assert_eq!(result.snapshot.outcome, Outcome::Won);
        assert_eq!(result.snapshot.wrong_attempts, 5);
    }

    #[test]
    fn test_custom_placeholder_and_alphabet() {
        let config = RoundConfig::new(Alphabet::english(), 3, '*').unwrap();
        let secret = SecretWord::parse("Cat", &Alphabet::english()).unwrap();
        let mut round = RoundEngine::new(&secret, config);
        let result = round.submit_guess('a');
        assert_eq!(result.snapshot.masked_word(), "*a*");
        assert_eq!(result.snapshot.max_attempts, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not spelled with the round's alphabet")]
    fn test_secret_from_other_alphabet_is_rejected() {
        let secret = SecretWord::parse("cat", &Alphabet::english()).unwrap();
        let _ = RoundEngine::new(&secret, RoundConfig::default());
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            RoundConfig::new(Alphabet::russian(), 0, '_'),
            Err(ConfigError::ZeroAttempts)
        );
        assert_eq!(
            RoundConfig::new(Alphabet::russian(), 6, 'ж'),
            Err(ConfigError::PlaceholderInAlphabet('ж'))
        );
        assert_eq!(
            RoundConfig::new(Alphabet::from_letters([]), 6, '_'),
            Err(ConfigError::EmptyAlphabet)
        );
        assert_eq!(RoundConfig::default().max_attempts(), DEFAULT_MAX_ATTEMPTS);
    }

    fn russian_letter() -> impl Strategy<Value = char> {
        let letters: Vec<char> = Alphabet::russian().letters().collect();
        proptest::sample::select(letters)
    }

    fn secret_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(russian_letter(), 1..12)
            .prop_map(|chars| chars.into_iter().collect())
    }

    fn outcome_rank(outcome: Outcome) -> u8 {
        match outcome {
            Outcome::InProgress => 0,
            Outcome::Won | Outcome::Lost => 1,
        }
    }

    proptest! {
        #[test]
        fn prop_round_invariants_hold(
            secret in secret_text(),
            guesses in proptest::collection::vec(russian_letter(), 0..40),
            max_attempts in 1u32..10,
        ) {
            let mut round = engine(&secret, max_attempts);
            let mut previous = round.snapshot();
            let secret_len = secret.chars().count();

            for letter in guesses {
                let result = round.submit_guess(letter);
                let snapshot = result.snapshot;

                prop_assert_eq!(snapshot.mask.len(), secret_len);
                prop_assert!(snapshot.wrong_attempts >= previous.wrong_attempts);
                prop_assert!(snapshot.wrong_attempts <= max_attempts);
                prop_assert!(outcome_rank(snapshot.outcome) >= outcome_rank(previous.outcome));
                if previous.outcome.is_terminal() {
                    prop_assert_eq!(snapshot.outcome, previous.outcome);
                    prop_assert_eq!(&snapshot, &previous);
                }
                for (shown, actual) in snapshot.mask.iter().zip(secret.chars()) {
                    prop_assert!(*shown == '_' || *shown == actual);
                }
                previous = snapshot;
            }
        }

        #[test]
        fn prop_repeat_guess_is_idempotent(
            secret in secret_text(),
            letter in russian_letter(),
        ) {
            let mut once = engine(&secret, 6);
            let mut twice = engine(&secret, 6);

            let first = once.submit_guess(letter);
            twice.submit_guess(letter);
            let repeat = twice.submit_guess(letter);

            if first.snapshot.outcome.is_terminal() {
                prop_assert_eq!(
                    repeat.signal,
                    GuessSignal::Rejected(GuessRejection::RoundAlreadyTerminal)
                );
            } else {
                prop_assert_eq!(
                    repeat.signal,
                    GuessSignal::Rejected(GuessRejection::RepeatedGuess(letter))
                );
            }
            prop_assert_eq!(repeat.snapshot, first.snapshot);
        }
    }
}
