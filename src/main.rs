use hangman::cli::{CliInterface, parse_cli};
use hangman::game_loop;
use hangman::logging;
use hangman::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let config = match cli.round_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let source = cli.word_source();
    log::info!(
        "Starting hangman: source={source}, max_attempts={}",
        config.max_attempts()
    );

    let mut rng = rand::thread_rng();

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&source, &config, &mut interface, &mut rng);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&source, &config, &mut interface, &mut rng);
    }

    ExitCode::SUCCESS
}
