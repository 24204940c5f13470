//! Session driver: the menu loop and the rounds it starts.
//!
//! All terminal I/O goes through [`GameInterface`], so the same loop drives
//! the line-oriented console, the full-screen TUI and scripted tests.

use crate::error::WordbankError;
use crate::round::{GuessResult, Outcome, RoundConfig, RoundEngine, RoundSnapshot};
use crate::wordbank::{LoadReport, WordSource};
use crate::{debug_log, info_log};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    Exit,
    Invalid,
}

/// What the player did when asked for a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    /// Input did not pass the interface's own filter; ask again.
    Invalid,
    /// Leave the session, e.g. on end of input.
    Exit,
}

pub trait GameInterface {
    fn display_menu(&mut self);
    fn read_menu_choice(&mut self) -> MenuChoice;
    fn display_invalid_menu_choice(&mut self);
    fn display_load_report(&mut self, source: &WordSource, report: &LoadReport);
    fn display_load_error(&mut self, error: &WordbankError);
    fn display_round_start(&mut self, snapshot: &RoundSnapshot);
    fn display_state(&mut self, snapshot: &RoundSnapshot);
    fn read_guess(&mut self, config: &RoundConfig) -> UserAction;
    fn display_guess_result(&mut self, result: &GuessResult);
    fn display_round_result(&mut self, snapshot: &RoundSnapshot);
    fn display_exit_message(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
}

impl SessionStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => {
                self.rounds_played += 1;
                self.rounds_won += 1;
            }
            Outcome::Lost => {
                self.rounds_played += 1;
                self.rounds_lost += 1;
            }
            Outcome::InProgress => {}
        }
    }
}

enum RoundEnd {
    Finished(Outcome),
    Abandoned,
    Unavailable,
}

/// Run menu → round → menu until the player exits.
pub fn game_loop<I, R>(
    source: &WordSource,
    config: &RoundConfig,
    interface: &mut I,
    rng: &mut R,
) -> SessionStats
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = SessionStats::default();

    loop {
        interface.display_menu();
        match interface.read_menu_choice() {
            MenuChoice::NewGame => match play_new_round(source, config, interface, rng) {
                RoundEnd::Finished(outcome) => stats.record(outcome),
                RoundEnd::Unavailable => {}
                RoundEnd::Abandoned => {
                    info_log!("game_loop() - Round abandoned, leaving session");
                    break;
                }
            },
            MenuChoice::Exit => break,
            MenuChoice::Invalid => interface.display_invalid_menu_choice(),
        }
    }

    interface.display_exit_message();
    log::info!(
        "Session over: {} played, {} won, {} lost",
        stats.rounds_played,
        stats.rounds_won,
        stats.rounds_lost
    );
    stats
}

fn play_new_round<I, R>(
    source: &WordSource,
    config: &RoundConfig,
    interface: &mut I,
    rng: &mut R,
) -> RoundEnd
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    // Reloaded every round so edits to the word list apply without a restart.
    let report = match source.load(config.alphabet()) {
        Ok(report) => report,
        Err(e) => {
            log::info!("Could not load words from {source}: {e}");
            interface.display_load_error(&e);
            return RoundEnd::Unavailable;
        }
    };
    interface.display_load_report(source, &report);

    let repository = match report.into_repository() {
        Ok(repository) => repository,
        Err(e) => {
            log::info!("{source}: {e}");
            interface.display_load_error(&e);
            return RoundEnd::Unavailable;
        }
    };

    let secret = repository.pick_random(rng);
    debug_log!("play_new_round() - Secret has {} letters", secret.len());
    let mut engine = RoundEngine::new(&secret, config.clone());
    interface.display_round_start(&engine.snapshot());

    play_round(&mut engine, interface)
}

fn play_round<I>(engine: &mut RoundEngine, interface: &mut I) -> RoundEnd
where
    I: GameInterface + ?Sized,
{
    let mut snapshot = engine.snapshot();
    while !snapshot.outcome.is_terminal() {
        interface.display_state(&snapshot);

        let letter = match interface.read_guess(engine.config()) {
            UserAction::Guess(letter) => letter,
            UserAction::Invalid => continue,
            UserAction::Exit => return RoundEnd::Abandoned,
        };

        let result = engine.submit_guess(letter);
        interface.display_guess_result(&result);
        snapshot = result.snapshot;
    }

    interface.display_round_result(&snapshot);
    RoundEnd::Finished(snapshot.outcome)
}
