//! Frontend state and key handling, independent of the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use yoji_core::{DealError, Player, Session, Slot, Verdict};

/// The four pickers, in on-screen order.
pub const PICKERS: [(Player, Slot); 4] = [
    (Player::A, Slot::Front),
    (Player::A, Slot::Back),
    (Player::B, Slot::Front),
    (Player::B, Slot::Back),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Judge,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    /// Index into [`PICKERS`].
    pub focus: usize,
    pub verdict: Option<Verdict>,
    /// Set while a judge call is in flight.
    pub pending: Option<String>,
    pub provider: &'static str,
}

impl AppState {
    pub fn new(session: Session, provider: &'static str) -> Self {
        Self {
            session,
            focus: 0,
            verdict: None,
            pending: None,
            provider,
        }
    }

    pub fn focused(&self) -> (Player, Slot) {
        PICKERS[self.focus]
    }

    fn move_focus(&mut self, delta: isize) {
        self.focus = (self.focus as isize + delta).rem_euclid(PICKERS.len() as isize) as usize;
    }

    fn cycle_word(&mut self, delta: isize) {
        let (player, slot) = self.focused();
        if self.session.cycle(player, slot, delta) {
            // A stale result would describe words no longer on screen.
            self.verdict = None;
        }
    }

    pub fn redeal(&mut self) -> Result<(), DealError> {
        self.session.redeal()?;
        self.verdict = None;
        self.focus = 0;
        Ok(())
    }

    /// Progress text shown while the model works.
    pub fn judging_notice(&self) -> String {
        format!(
            "「{}」と「{}」の構成要素を解析中...",
            self.session.candidate(Player::A),
            self.session.candidate(Player::B)
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Action, DealError> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.move_focus(-1);
                Action::None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.move_focus(1);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cycle_word(-1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cycle_word(1);
                Action::None
            }
            KeyCode::Char('r') => {
                self.redeal()?;
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::Judge,
            _ => Action::None,
        };
        Ok(action)
    }
}
