// Library interface for hangman
// The binary and the integration tests both drive the game through it

pub mod alphabet;
pub mod cli;
pub mod error;
pub mod gallows;
pub mod game_state;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use alphabet::Alphabet;
pub use error::{ConfigError, WordbankError};
pub use game_state::{GameInterface, MenuChoice, SessionStats, UserAction, game_loop};
pub use round::{
    GuessRejection, GuessResult, GuessSignal, Outcome, RoundConfig, RoundEngine, RoundSnapshot,
};
pub use wordbank::{
    LoadReport, SecretWord, SkippedLine, WordRepository, WordSource, load_wordbank_from_file,
    load_wordbank_from_reader, load_wordbank_from_str,
};
