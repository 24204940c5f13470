// Integration tests for the hangman application
// These tests verify that all modules work together correctly

use hangman::cli::CliInterface;
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};
use std::path::PathBuf;

fn word_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

fn play(source: &WordSource, config: &RoundConfig, input: &str) -> SessionStats {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()));
    let mut rng = StdRng::seed_from_u64(2024);
    game_loop(source, config, &mut interface, &mut rng)
}

#[test]
fn test_end_to_end_win() {
    let file = word_file(&["кот"]);
    let source = WordSource::File(file.path().to_path_buf());

    // Menu: new game, guess к о т, then exit from the menu
    let stats = play(&source, &RoundConfig::default(), "1\nк\nо\nт\n2\n");

    assert_eq!(stats.rounds_played, 1);
    assert_eq!(stats.rounds_won, 1);
}

#[test]
fn test_end_to_end_loss_with_fewer_attempts() {
    let file = word_file(&["кот"]);
    let source = WordSource::File(file.path().to_path_buf());
    let config = RoundConfig::new(Alphabet::russian(), 2, '_').unwrap();

    let stats = play(&source, &config, "1\nа\nб\n2\n");

    assert_eq!(stats.rounds_lost, 1);
    assert_eq!(stats.rounds_won, 0);
}

#[test]
fn test_invalid_and_repeated_input_do_not_cost_attempts() {
    let file = word_file(&["кот"]);
    let source = WordSource::File(file.path().to_path_buf());
    let config = RoundConfig::new(Alphabet::russian(), 1, '_').unwrap();

    // Latin letter, digit, two letters, empty line and a repeated hit are all
    // free; the round is still won with a single allowed miss.
    let stats = play(&source, &config, "1\nk\n5\nко\n\nк\nк\nО\nт\n2\n");

    assert_eq!(stats.rounds_won, 1);
    assert_eq!(stats.rounds_lost, 0);
}

#[test]
fn test_multiple_rounds_in_one_session() {
    let file = word_file(&["ёж"]);
    let source = WordSource::File(file.path().to_path_buf());

    let input = "1\nё\nж\n3\n1\nа\nё\nж\n2\n";
    let stats = play(&source, &RoundConfig::default(), input);

    assert_eq!(stats.rounds_played, 2);
    assert_eq!(stats.rounds_won, 2);
}

#[test]
fn test_end_of_input_mid_round_ends_session() {
    let file = word_file(&["кот"]);
    let source = WordSource::File(file.path().to_path_buf());

    let stats = play(&source, &RoundConfig::default(), "1\nк\n");

    assert_eq!(stats.rounds_played, 0);
}

#[test]
fn test_missing_word_file_is_recoverable() {
    let dir = tempfile::tempdir().unwrap();
    let source = WordSource::File(dir.path().join("absent.txt"));

    // Two attempts to start a game both fail, then the player exits normally
    let stats = play(&source, &RoundConfig::default(), "1\n1\n2\n");

    assert_eq!(stats, SessionStats::default());
}

#[test]
fn test_word_file_without_playable_words() {
    let file = word_file(&["123", "hello", "кот пёс"]);
    let source = WordSource::File(file.path().to_path_buf());

    let report = source.load(&Alphabet::russian()).unwrap();
    assert!(report.words.is_empty());
    assert_eq!(report.skipped.len(), 3);

    let stats = play(&source, &RoundConfig::default(), "1\n2\n");
    assert_eq!(stats.rounds_played, 0);
}

#[test]
fn test_word_file_is_reloaded_between_rounds() {
    let file = word_file(&["кот"]);
    let path: PathBuf = file.path().to_path_buf();
    let source = WordSource::File(path.clone());
    let config = RoundConfig::default();

    let first = source.load(config.alphabet()).unwrap();
    assert_eq!(first.words[0].as_str(), "кот");

    std::fs::write(&path, "дом\n").unwrap();
    let second = source.load(config.alphabet()).unwrap();
    assert_eq!(second.words[0].as_str(), "дом");
}

#[test]
fn test_load_report_from_mixed_file() {
    let file = word_file(&["кот", "123", "", "  дом  "]);
    let report = load_wordbank_from_file(file.path(), &Alphabet::russian()).unwrap();

    let words: Vec<&str> = report.words.iter().map(SecretWord::as_str).collect();
    assert_eq!(words, vec!["кот", "дом"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line_number, 2);
    assert_eq!(report.skipped[0].content, "123");
}

#[test]
fn test_embedded_words_play_through() {
    // Pick a word from the built-in list and solve it letter by letter
    let report = WordSource::Embedded.load(&Alphabet::russian()).unwrap();
    let repository = report.into_repository().unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let secret = repository.pick_random(&mut rng);

    let mut engine = RoundEngine::new(&secret, RoundConfig::default());
    let mut last = engine.snapshot();
    for letter in secret.chars() {
        last = engine.submit_guess(letter).snapshot;
    }

    assert_eq!(last.outcome, Outcome::Won);
    assert_eq!(last.wrong_attempts, 0);
    assert_eq!(last.masked_word(), secret.as_str());
    assert_eq!(last.solution.as_deref(), Some(secret.as_str()));
}

#[test]
fn test_english_alphabet_round() {
    let file = word_file(&["Apple", "кот"]);
    let source = WordSource::File(file.path().to_path_buf());
    let config = RoundConfig::new(Alphabet::english(), 6, '_').unwrap();

    let report = source.load(config.alphabet()).unwrap();
    assert_eq!(report.words.len(), 1);
    assert_eq!(report.skipped[0].content, "кот");

    let stats = play(&source, &config, "1\nA\np\nl\ne\n2\n");
    assert_eq!(stats.rounds_won, 1);
}
