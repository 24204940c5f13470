//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `Menu` → `Guessing` → `RoundOver` → back to `Menu`
//! - A failed word list load goes from `Menu` straight back to `Menu`

use crate::cli::{
    guess_message, load_error_message, result_message, skipped_line_message, used_letters_line,
};
use crate::error::WordbankError;
use crate::gallows;
use crate::game_state::{GameInterface, MenuChoice, UserAction};
use crate::round::{GuessResult, GuessSignal, Outcome, RoundConfig, RoundSnapshot};
use crate::wordbank::{LoadReport, WordSource};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_SKIPPED_LINES_DISPLAY: usize = 5;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Menu,
    Guessing,
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Neutral,
    Good,
    Bad,
}

impl MessageKind {
    fn style(self) -> Style {
        match self {
            Self::Neutral => MESSAGE_STYLE,
            Self::Good => SUCCESS_STYLE,
            Self::Bad => ERROR_STYLE,
        }
    }

    fn for_signal(signal: &GuessSignal) -> Self {
        match signal {
            GuessSignal::Correct { .. } => Self::Good,
            GuessSignal::Incorrect { .. } => Self::Bad,
            GuessSignal::Rejected(_) => Self::Neutral,
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    snapshot: Option<&'a RoundSnapshot>,
    load_notes: &'a [String],
    message: &'a str,
    message_kind: MessageKind,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen implementation of [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    snapshot: Option<RoundSnapshot>,
    load_notes: Vec<String>,
    message: String,
    message_kind: MessageKind,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::Menu,
            snapshot: None,
            load_notes: Vec::new(),
            message: String::new(),
            message_kind: MessageKind::Neutral,
            error_message: String::new(),
            status: "Готово".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            snapshot: self.snapshot.as_ref(),
            load_notes: &self.load_notes,
            message: &self.message,
            message_kind: self.message_kind,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, message: String, kind: MessageKind) {
        self.message = message;
        self.message_kind = kind;
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(11),   // Gallows + round info
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(30)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, body[0], ctx.snapshot);
        Self::render_info(f, body[1], ctx);
        Self::render_status(f, chunks[2], ctx.status);
        Self::render_instructions(f, chunks[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("ВИСЕЛИЦА")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, snapshot: Option<&RoundSnapshot>) {
        let (wrong, max) = snapshot.map_or((0, 1), |s| (s.wrong_attempts, s.max_attempts));
        let lines: Vec<Line> = gallows::render(wrong, max).lines().map(Line::from).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Виселица").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(snapshot) = ctx.snapshot {
            let spaced: String = snapshot
                .mask
                .iter()
                .map(|c| format!("{c} "))
                .collect();
            lines.push(Line::from(vec![
                Span::styled("Слово: ", HEADER_STYLE),
                Span::styled(spaced, WORD_STYLE),
            ]));
            lines.push(Line::from(format!(
                "Осталось попыток: {} из {}",
                snapshot.attempts_left(),
                snapshot.max_attempts
            )));
            if !snapshot.used_letters.is_empty() {
                lines.push(Line::from(format!(
                    "Использованные буквы: {}",
                    used_letters_line(snapshot)
                )));
            }
            lines.push(Line::from(""));
        }

        for note in ctx.load_notes {
            lines.push(Line::from(vec![Span::styled(note.as_str(), INFO_STYLE)]));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.message,
                ctx.message_kind.style(),
            )]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Игра").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Menu => "1: Новая игра | 2 / ESC: Выход",
            TuiState::Guessing => "Нажмите букву, чтобы угадать | ESC: Выход",
            TuiState::RoundOver => "1: Сыграть ещё | 2 / ESC: Выход",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Готово" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Статус"));
        f.render_widget(paragraph, area);
    }

    /// Wait for the next key press, redrawing between polls.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            self.draw()?;
            if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                // Only Press events, Release and Repeat would double the input
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    debug_log!(
                        "next_key() - Key event: code={:?}, modifiers={:?}",
                        key.code,
                        key.modifiers
                    );
                    return Ok(key);
                }
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn is_interrupt(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn menu_choice_for(key: &KeyEvent) -> Option<MenuChoice> {
        if Self::is_interrupt(key) {
            return Some(MenuChoice::Exit);
        }
        match key.code {
            KeyCode::Char('1') => Some(MenuChoice::NewGame),
            KeyCode::Char('2') | KeyCode::Esc => Some(MenuChoice::Exit),
            KeyCode::Char(_) => Some(MenuChoice::Invalid),
            _ => None,
        }
    }

    fn guess_action_for(key: &KeyEvent, config: &RoundConfig) -> Option<UserAction> {
        if Self::is_interrupt(key) || key.code == KeyCode::Esc {
            return Some(UserAction::Exit);
        }
        if Self::has_modifier_keys(key) {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => Some(
                config
                    .alphabet()
                    .parse_letter(&c.to_string())
                    .map_or(UserAction::Invalid, UserAction::Guess),
            ),
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_menu(&mut self) {
        if self.state != TuiState::RoundOver {
            self.state = TuiState::Menu;
        }
        self.status = "Выберите действие".to_string();
        self.draw_or_log();
    }

    fn read_menu_choice(&mut self) -> MenuChoice {
        loop {
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_menu_choice() - Input error {}, returning Exit", e);
                    return MenuChoice::Exit;
                }
            };
            if let Some(choice) = Self::menu_choice_for(&key) {
                self.error_message.clear();
                return choice;
            }
        }
    }

    fn display_invalid_menu_choice(&mut self) {
        self.error_message = "Неверный выбор. Нажмите '1' или '2'".to_string();
        self.draw_or_log();
    }

    fn display_load_report(&mut self, source: &WordSource, report: &LoadReport) {
        self.load_notes = report
            .skipped
            .iter()
            .take(MAX_SKIPPED_LINES_DISPLAY)
            .map(|s| skipped_line_message(s.line_number, &s.content))
            .collect();
        if report.skipped.len() > MAX_SKIPPED_LINES_DISPLAY {
            self.load_notes.push(format!(
                "... и ещё {} строк",
                report.skipped.len() - MAX_SKIPPED_LINES_DISPLAY
            ));
        }
        self.status = format!("Загружено {} слов ({source})", report.words.len());
        self.draw_or_log();
    }

    fn display_load_error(&mut self, error: &WordbankError) {
        self.state = TuiState::Menu;
        self.snapshot = None;
        self.error_message = load_error_message(error);
        self.draw_or_log();
    }

    fn display_round_start(&mut self, snapshot: &RoundSnapshot) {
        self.state = TuiState::Guessing;
        self.snapshot = Some(snapshot.clone());
        self.error_message.clear();
        self.set_message(
            format!("Игра началась! У вас {} попыток", snapshot.max_attempts),
            MessageKind::Neutral,
        );
        self.draw_or_log();
    }

    fn display_state(&mut self, snapshot: &RoundSnapshot) {
        self.snapshot = Some(snapshot.clone());
        self.status = "Ваш ход".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self, config: &RoundConfig) -> UserAction {
        loop {
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_guess() - Input error {}, returning Exit", e);
                    return UserAction::Exit;
                }
            };
            match Self::guess_action_for(&key, config) {
                Some(UserAction::Invalid) => {
                    self.error_message = "Ошибка! Введите букву алфавита!".to_string();
                    return UserAction::Invalid;
                }
                Some(action) => {
                    self.error_message.clear();
                    return action;
                }
                None => {}
            }
        }
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        self.snapshot = Some(result.snapshot.clone());
        self.load_notes.clear();
        self.set_message(
            guess_message(&result.signal),
            MessageKind::for_signal(&result.signal),
        );
        self.draw_or_log();
    }

    fn display_round_result(&mut self, snapshot: &RoundSnapshot) {
        self.state = TuiState::RoundOver;
        self.snapshot = Some(snapshot.clone());
        let kind = if snapshot.outcome == Outcome::Won {
            MessageKind::Good
        } else {
            MessageKind::Bad
        };
        self.set_message(result_message(snapshot), kind);
        self.status = "Раунд окончен".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.set_message("Всего доброго!".to_string(), MessageKind::Neutral);
        self.status = "Выход...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
