use crate::alphabet::Alphabet;
use crate::error::{ConfigError, WordbankError};
use crate::gallows;
use crate::game_state::{GameInterface, MenuChoice, UserAction};
use crate::round::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PLACEHOLDER, GuessRejection, GuessResult, GuessSignal, Outcome,
    RoundConfig, RoundSnapshot,
};
use crate::wordbank::{LoadReport, WordSource};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphabetChoice {
    Russian,
    English,
}

impl AlphabetChoice {
    #[must_use]
    pub fn alphabet(self) -> Alphabet {
        match self {
            Self::Russian => Alphabet::russian(),
            Self::English => Alphabet::english(),
        }
    }
}

/// Hangman word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Wrong guesses allowed before the round is lost
    #[arg(
        short = 'a',
        long,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..=32)
    )]
    pub max_attempts: u32,

    /// Letters accepted in words and guesses
    #[arg(long, value_enum, default_value_t = AlphabetChoice::Russian)]
    pub alphabet: AlphabetChoice,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn round_config(&self) -> Result<RoundConfig, ConfigError> {
        RoundConfig::new(
            self.alphabet.alphabet(),
            self.max_attempts,
            DEFAULT_PLACEHOLDER,
        )
    }

    #[must_use]
    pub fn word_source(&self) -> WordSource {
        WordSource::resolve(self.wordbank_path.clone())
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Messages shared by the console and the TUI

#[must_use]
pub fn guess_message(signal: &GuessSignal) -> String {
    match signal {
        GuessSignal::Correct { letter, .. } => format!("Правильно! Буква '{letter}' есть в слове"),
        GuessSignal::Incorrect { letter } => format!("Буквы '{letter}' нет в этом слове"),
        GuessSignal::Rejected(GuessRejection::RepeatedGuess(letter)) => {
            format!("Вы уже вводили эту букву '{letter}'")
        }
        GuessSignal::Rejected(GuessRejection::InvalidLetter(_)) => {
            "Ошибка! Введите букву алфавита!".to_string()
        }
        GuessSignal::Rejected(GuessRejection::RoundAlreadyTerminal) => {
            "Раунд уже завершён".to_string()
        }
    }
}

#[must_use]
pub fn result_message(snapshot: &RoundSnapshot) -> String {
    let solution = snapshot.solution.as_deref().unwrap_or_default();
    match snapshot.outcome {
        Outcome::Won => format!("Поздравляем! Вы отгадали слово: {solution}"),
        Outcome::Lost => format!("Вы проиграли! Загаданное слово: {solution}"),
        Outcome::InProgress => String::new(),
    }
}

#[must_use]
pub fn load_error_message(error: &WordbankError) -> String {
    match error {
        WordbankError::SourceUnavailable { path, source } => {
            format!("Ошибка: не удалось прочитать файл со словами {}: {source}", path.display())
        }
        WordbankError::NoPlayableWords => "Не удалось загрузить слова для игры".to_string(),
    }
}

#[must_use]
pub fn skipped_line_message(line_number: usize, content: &str) -> String {
    format!("Предупреждение: Строка {line_number} содержит некорректные символы: {content}")
}

#[must_use]
pub fn used_letters_line(snapshot: &RoundSnapshot) -> String {
    snapshot
        .used_letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

pub fn read_menu_choice<R: BufRead>(reader: &mut R) -> MenuChoice {
    let Some(input) = read_trimmed_line(reader) else {
        return MenuChoice::Exit;
    };
    match input.as_str() {
        "1" => MenuChoice::NewGame,
        "2" => MenuChoice::Exit,
        _ => MenuChoice::Invalid,
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R, alphabet: &Alphabet) -> UserAction {
    print!("Введите букву: ");
    let _ = io::stdout().flush();
    let Some(input) = read_trimmed_line(reader) else {
        println!();
        return UserAction::Exit;
    };
    match alphabet.parse_letter(&input) {
        Some(letter) => UserAction::Guess(letter),
        None => {
            println!("Ошибка! Введите одну букву алфавита!");
            UserAction::Invalid
        }
    }
}

pub fn display_menu() {
    println!("\n=== ИГРА ВИСЕЛИЦА ===");
    println!("1 - начать новую игру");
    println!("2 - выйти из игры");
    println!("Выберите действие: ");
}

pub fn display_load_report(source: &WordSource, report: &LoadReport) {
    for skipped in &report.skipped {
        println!("{}", skipped_line_message(skipped.line_number, &skipped.content));
    }
    println!("Загружено {} слов ({source})", report.words.len());
}

pub fn display_state(snapshot: &RoundSnapshot) {
    println!("\n=== ВИСЕЛИЦА ===");
    println!("{}", gallows::render(snapshot.wrong_attempts, snapshot.max_attempts));
    println!("================\n");
    println!("Осталось попыток: {}", snapshot.attempts_left());
    println!("Слово: {}", snapshot.masked_word());
    if !snapshot.used_letters.is_empty() {
        println!("Использованные буквы: {}", used_letters_line(snapshot));
    }
}

pub fn display_round_result(snapshot: &RoundSnapshot) {
    println!("{}", result_message(snapshot));
    println!("{}", gallows::render(snapshot.wrong_attempts, snapshot.max_attempts));
}

/// Line-oriented console implementation of [`GameInterface`].
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_menu(&mut self) {
        display_menu();
    }

    fn read_menu_choice(&mut self) -> MenuChoice {
        read_menu_choice(&mut self.reader)
    }

    fn display_invalid_menu_choice(&mut self) {
        println!("Неверный выбор. Пожалуйста, введите '1' или '2'");
    }

    fn display_load_report(&mut self, source: &WordSource, report: &LoadReport) {
        display_load_report(source, report);
    }

    fn display_load_error(&mut self, error: &WordbankError) {
        println!("{}", load_error_message(error));
    }

    fn display_round_start(&mut self, snapshot: &RoundSnapshot) {
        println!("\nИгра началась! У вас {} попыток", snapshot.max_attempts);
    }

    fn display_state(&mut self, snapshot: &RoundSnapshot) {
        display_state(snapshot);
    }

    fn read_guess(&mut self, config: &RoundConfig) -> UserAction {
        read_guess(&mut self.reader, config.alphabet())
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        println!("{}", guess_message(&result.signal));
    }

    fn display_round_result(&mut self, snapshot: &RoundSnapshot) {
        display_round_result(snapshot);
    }

    fn display_exit_message(&mut self) {
        println!("Всего доброго!");
    }
}
