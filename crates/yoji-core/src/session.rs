//! Per-session game state: the dealt hand and both players' picks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::vocab::{deal, DealError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    pub fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// Label used in the model's score block.
    pub fn label(self) -> &'static str {
        match self {
            Player::A => "A",
            Player::B => "B",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Player::A => "プレイヤーA",
            Player::B => "プレイヤーB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Front,
    Back,
}

/// One player's choice, as indices into the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub front: usize,
    pub back: usize,
}

impl Default for Pick {
    fn default() -> Self {
        Self { front: 0, back: 1 }
    }
}

impl Pick {
    fn get(&self, slot: Slot) -> usize {
        match slot {
            Slot::Front => self.front,
            Slot::Back => self.back,
        }
    }

    fn get_mut(&mut self, slot: Slot) -> &mut usize {
        match slot {
            Slot::Front => &mut self.front,
            Slot::Back => &mut self.back,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("word index {index} is out of range for a hand of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Hand and selection state for one game session.
///
/// Frontends own a `Session` and pass it to the handlers; nothing here is global.
#[derive(Debug, Clone)]
pub struct Session {
    pool: &'static [&'static str],
    hand_size: usize,
    hand: Vec<&'static str>,
    picks: [Pick; 2],
    rng: StdRng,
}

impl Session {
    /// Deals the first hand with an entropy-seeded RNG.
    pub fn new(pool: &'static [&'static str], hand_size: usize) -> Result<Self, DealError> {
        Self::with_rng(pool, hand_size, StdRng::from_entropy())
    }

    /// Deals the first hand from a fixed seed, so a game can be replayed.
    pub fn seeded(
        pool: &'static [&'static str],
        hand_size: usize,
        seed: u64,
    ) -> Result<Self, DealError> {
        Self::with_rng(pool, hand_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        pool: &'static [&'static str],
        hand_size: usize,
        mut rng: StdRng,
    ) -> Result<Self, DealError> {
        let hand = deal(pool, hand_size, &mut rng)?;
        Ok(Self {
            pool,
            hand_size,
            hand,
            picks: [Pick::default(); 2],
            rng,
        })
    }

    pub fn hand(&self) -> &[&'static str] {
        &self.hand
    }

    pub fn pick(&self, player: Player) -> Pick {
        self.picks[player.index()]
    }

    /// Replaces the hand wholesale and resets both players to the default picks.
    pub fn redeal(&mut self) -> Result<(), DealError> {
        self.hand = deal(self.pool, self.hand_size, &mut self.rng)?;
        self.picks = [Pick::default(); 2];
        tracing::debug!(hand = ?self.hand, "dealt new hand");
        Ok(())
    }

    /// Sets one picker. Returns whether the selection changed; reselecting
    /// the current word is a no-op.
    pub fn select(
        &mut self,
        player: Player,
        slot: Slot,
        index: usize,
    ) -> Result<bool, SessionError> {
        if index >= self.hand.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.hand.len(),
            });
        }
        let current = self.picks[player.index()].get_mut(slot);
        if *current == index {
            return Ok(false);
        }
        *current = index;
        Ok(true)
    }

    /// Moves one picker by `delta` positions, wrapping around the hand.
    pub fn cycle(&mut self, player: Player, slot: Slot, delta: isize) -> bool {
        let len = self.hand.len() as isize;
        let current = self.picks[player.index()].get(slot) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        // `next` is always in range after rem_euclid.
        self.select(player, slot, next).unwrap_or(false)
    }

    pub fn word(&self, player: Player, slot: Slot) -> &'static str {
        self.hand[self.picks[player.index()].get(slot)]
    }

    /// The player's front and back words joined.
    pub fn candidate(&self, player: Player) -> String {
        let pick = self.pick(player);
        format!("{}{}", self.hand[pick.front], self.hand[pick.back])
    }

    /// Both players formed the same word.
    pub fn is_duplicate(&self) -> bool {
        self.candidate(Player::A) == self.candidate(Player::B)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{DEFAULT_HAND_SIZE, VOCABULARY};

    fn session() -> Session {
        Session::seeded(VOCABULARY, DEFAULT_HAND_SIZE, 3).unwrap()
    }

    #[test]
    fn picks_default_to_first_two_entries() {
        let s = session();
        for player in Player::ALL {
            assert_eq!(s.pick(player), Pick { front: 0, back: 1 });
            assert_eq!(s.candidate(player), format!("{}{}", s.hand()[0], s.hand()[1]));
        }
        assert!(s.is_duplicate());
    }

    #[test]
    fn reselecting_same_word_is_noop() {
        let mut s = session();
        assert!(s.select(Player::A, Slot::Back, 4).unwrap());
        let before = s.candidate(Player::A);
        assert!(!s.select(Player::A, Slot::Back, 4).unwrap());
        assert_eq!(s.candidate(Player::A), before);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let mut s = session();
        let err = s.select(Player::B, Slot::Front, 99).unwrap_err();
        assert_eq!(
            err,
            SessionError::IndexOutOfRange {
                index: 99,
                len: DEFAULT_HAND_SIZE
            }
        );
        assert_eq!(s.pick(Player::B), Pick::default());
    }

    #[test]
    fn selection_differs_breaks_duplicate() {
        let mut s = session();
        s.select(Player::B, Slot::Front, 2).unwrap();
        assert!(!s.is_duplicate());
        assert_eq!(s.word(Player::B, Slot::Front), s.hand()[2]);
    }

    #[test]
    fn redeal_replaces_hand_and_resets_picks() {
        let mut s = session();
        s.select(Player::A, Slot::Front, 5).unwrap();
        let old = s.hand().to_vec();
        // Several redeals; at least one must differ from the first hand.
        let mut changed = false;
        for _ in 0..5 {
            s.redeal().unwrap();
            assert_eq!(s.hand().len(), DEFAULT_HAND_SIZE);
            changed |= s.hand() != old.as_slice();
        }
        assert!(changed);
        assert_eq!(s.pick(Player::A), Pick::default());
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        let mut s = session();
        assert!(s.cycle(Player::A, Slot::Front, -1));
        assert_eq!(s.pick(Player::A).front, DEFAULT_HAND_SIZE - 1);
        assert!(s.cycle(Player::A, Slot::Front, 1));
        assert_eq!(s.pick(Player::A).front, 0);
    }

    #[test]
    fn minimal_hand_still_forms_candidate() {
        let s = Session::seeded(VOCABULARY, 2, 9).unwrap();
        assert_eq!(s.candidate(Player::A).chars().count(), 4);
    }
}
