//! Round state for the two-player guessing game
//!
//! Everything that must be reproducible per seed lives here; the gallows
//! scene is visual-only and skipped on serialization.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{ATTACK_PROBABILITY, MAX_WRONG_GUESSES};
use crate::scene::GallowsScene;
use crate::vault::{self, SealedWord, WordVault};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen
    Intro,
    /// Player 1 enters the secret word
    SetWord,
    /// Handover screen while player 1 looks away
    Transition,
    /// Player 2 guesses letters
    Guessing,
    /// Round ended, win or lose
    GameOver,
}

/// Round outcome, set when the phase reaches `GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Player 2 completed the word
    Victory,
    /// The figure was completed first
    Defeat,
}

/// Complete round state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    /// The plain word. Kept on player 1's side of the channel; the sealed
    /// copy is what "travels".
    pub word: String,
    pub sealed: Option<SealedWord>,
    /// Guessed letters, ordered for stable display
    pub guessed: BTreeSet<char>,
    pub wrong_count: u32,
    /// Set at seal time when the attack simulation fired this round
    pub attack_simulated: bool,
    /// Result of the handover integrity check
    pub integrity_ok: bool,
    /// One-line status shown to the players
    pub status: String,
    /// Simulation frame counter
    pub time_ticks: u64,
    #[serde(skip)]
    pub vault: WordVault,
    #[serde(skip)]
    pub rng: Pcg32,
    #[serde(skip)]
    pub scene: GallowsScene,
}

/// Decorrelate the scene's RNG stream from the round RNG.
fn scene_seed(seed: u64, ticks: u64) -> u64 {
    seed.wrapping_mul(2654435761).wrapping_add(ticks)
}

impl GameState {
    /// Create a round in the intro phase with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Intro,
            outcome: None,
            word: String::new(),
            sealed: None,
            guessed: BTreeSet::new(),
            wrong_count: 0,
            attack_simulated: false,
            integrity_ok: true,
            status: "Waiting...".to_string(),
            time_ticks: 0,
            vault: WordVault::from_seed(seed),
            rng: Pcg32::seed_from_u64(seed),
            scene: GallowsScene::new(scene_seed(seed, 0)),
        }
    }

    /// Begin a fresh round: new scene and body, cleared guesses.
    pub fn start_round(&mut self) {
        self.phase = GamePhase::SetWord;
        self.outcome = None;
        self.word.clear();
        self.sealed = None;
        self.guessed.clear();
        self.wrong_count = 0;
        self.attack_simulated = false;
        self.integrity_ok = true;
        self.scene = GallowsScene::new(scene_seed(self.seed, self.time_ticks));
        self.status = "Player 1: enter the secret word".to_string();
        log::info!("round started (seed {})", self.seed);
    }

    /// Player 1 submits the word: alphabetic, at least two letters, stored
    /// uppercase. Seals it through the vault and rolls the transit attack.
    /// Returns false (and stays in `SetWord`) when the word is rejected.
    pub fn set_word(&mut self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        if word.len() < 2 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            self.status = "Word must be at least two letters, A-Z only".to_string();
            return false;
        }
        let mut sealed = self.vault.seal(&mut self.rng, &word);
        if self.rng.random_bool(ATTACK_PROBABILITY) {
            vault::tamper(&mut self.rng, &mut sealed);
            self.attack_simulated = true;
            log::debug!("attack simulation flipped a ciphertext bit");
        }
        self.word = word;
        self.sealed = Some(sealed);
        self.phase = GamePhase::Transition;
        self.status = "Word sealed - player 1 look away!".to_string();
        true
    }

    /// Hand over to player 2: check the sealed word against its digest.
    pub fn begin_guessing(&mut self) {
        self.integrity_ok = self
            .sealed
            .as_ref()
            .map(|s| self.vault.verify(s))
            .unwrap_or(false);
        if self.integrity_ok {
            self.status = "Integrity OK - start guessing!".to_string();
        } else {
            self.status = "INTEGRITY BREACH detected in transit!".to_string();
            log::warn!("sealed word failed its integrity check");
        }
        self.phase = GamePhase::Guessing;
    }

    /// Handle a single guessed letter. Repeats and non-letters are
    /// ignored; a miss grows the figure, the sixth miss ends the round.
    pub fn handle_guess(&mut self, c: char) {
        if self.phase != GamePhase::Guessing {
            return;
        }
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_alphabetic() || self.guessed.contains(&c) {
            return;
        }
        self.guessed.insert(c);
        if self.word.contains(c) {
            if self.is_word_complete() {
                self.phase = GamePhase::GameOver;
                self.outcome = Some(Outcome::Victory);
                self.status = "VICTORY - player 2 wins!".to_string();
                log::info!("word completed after {} wrong guesses", self.wrong_count);
            }
        } else {
            self.wrong_count += 1;
            log::info!(
                "wrong guess '{}' ({}/{})",
                c,
                self.wrong_count,
                MAX_WRONG_GUESSES
            );
            if self.wrong_count >= MAX_WRONG_GUESSES {
                self.phase = GamePhase::GameOver;
                self.outcome = Some(Outcome::Defeat);
                self.status = "DEFEAT - player 1 wins!".to_string();
            }
        }
    }

    /// Every letter of the word has been guessed.
    pub fn is_word_complete(&self) -> bool {
        !self.word.is_empty() && self.word.chars().all(|c| self.guessed.contains(&c))
    }

    /// The word as shown to player 2: guessed letters revealed, the rest
    /// blanked. Everything shows once the round is over.
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) || self.phase == GamePhase::GameOver {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guessing_state(word: &str) -> GameState {
        let mut state = GameState::new(7);
        state.start_round();
        assert!(state.set_word(word));
        state.begin_guessing();
        state
    }

    #[test]
    fn test_word_validation() {
        let mut state = GameState::new(7);
        state.start_round();
        assert!(!state.set_word("A"));
        assert!(!state.set_word("NOT A WORD"));
        assert!(!state.set_word("R2D2"));
        assert_eq!(state.phase, GamePhase::SetWord);
        assert!(state.set_word("  gallows  "));
        assert_eq!(state.word, "GALLOWS");
        assert_eq!(state.phase, GamePhase::Transition);
    }

    #[test]
    fn test_correct_guesses_complete_word() {
        let mut state = guessing_state("NOOSE");
        for c in ['N', 'O', 'S'] {
            state.handle_guess(c);
            assert_eq!(state.phase, GamePhase::Guessing);
        }
        state.handle_guess('E');
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome, Some(Outcome::Victory));
        assert_eq!(state.wrong_count, 0);
    }

    #[test]
    fn test_six_misses_lose_the_round() {
        let mut state = guessing_state("AB");
        for (i, c) in "CDEFG".chars().enumerate() {
            state.handle_guess(c);
            assert_eq!(state.wrong_count, i as u32 + 1);
            assert_eq!(state.phase, GamePhase::Guessing);
        }
        state.handle_guess('H');
        assert_eq!(state.wrong_count, 6);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome, Some(Outcome::Defeat));
    }

    #[test]
    fn test_repeat_and_invalid_guesses_ignored() {
        let mut state = guessing_state("AB");
        state.handle_guess('Z');
        state.handle_guess('Z');
        state.handle_guess('z');
        state.handle_guess('!');
        assert_eq!(state.wrong_count, 1);
    }

    #[test]
    fn test_guesses_rejected_after_game_over() {
        let mut state = guessing_state("AB");
        state.handle_guess('A');
        state.handle_guess('B');
        assert_eq!(state.phase, GamePhase::GameOver);
        let guessed = state.guessed.len();
        state.handle_guess('C');
        assert_eq!(state.guessed.len(), guessed);
        assert_eq!(state.wrong_count, 0);
    }

    #[test]
    fn test_masked_word_reveals_progress() {
        let mut state = guessing_state("NOOSE");
        assert_eq!(state.masked_word(), "_____");
        state.handle_guess('O');
        assert_eq!(state.masked_word(), "_OO__");
        // Lose the round; the word shows in full
        for c in "BCDFGH".chars() {
            state.handle_guess(c);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.masked_word(), "NOOSE");
    }

    #[test]
    fn test_integrity_check_matches_tamper_flag() {
        // Deterministic per seed: whether the attack fired, the handover
        // check must agree with it.
        for seed in 0..32 {
            let mut state = GameState::new(seed);
            state.start_round();
            assert!(state.set_word("ENCRYPTION"));
            state.begin_guessing();
            assert_eq!(state.integrity_ok, !state.attack_simulated, "seed {seed}");
        }
    }

    #[test]
    fn test_sealed_word_round_trips_when_clean() {
        let state = guessing_state("HANGMAN");
        if !state.attack_simulated {
            let sealed = state.sealed.as_ref().unwrap();
            assert_eq!(state.vault.open(sealed).unwrap(), "HANGMAN");
        }
    }
}
