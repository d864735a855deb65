//! Per-frame advance of the round
//!
//! One `tick` is one rendered frame at the fixed frame rate: it feeds any
//! pending player input to the state machine, then drives the gallows
//! scene with the current wrong-guess count. The scene keeps animating
//! after game over so the death sequence plays out.

use super::state::{GamePhase, GameState};

/// Input commands for a single tick. All fields are one-shot; the caller
/// clears them after the tick is processed.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player 1 submits the secret word
    pub set_word: Option<String>,
    /// Advance past the intro / handover screens
    pub ready: bool,
    /// Player 2 guesses a letter
    pub guess: Option<char>,
    /// Start a fresh round
    pub restart: bool,
}

/// Advance the round by one frame.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.restart {
        state.start_round();
        return;
    }

    match state.phase {
        GamePhase::Intro => {
            if input.ready {
                state.start_round();
            }
        }
        GamePhase::SetWord => {
            if let Some(word) = &input.set_word {
                state.set_word(word);
            }
        }
        GamePhase::Transition => {
            if input.ready {
                state.begin_guessing();
            }
        }
        GamePhase::Guessing => {
            if let Some(c) = input.guess {
                state.handle_guess(c);
            }
        }
        GamePhase::GameOver => {}
    }

    // The gallows only animates once the handover is done; the body keeps
    // moving through game over, including into the death sequence.
    if matches!(state.phase, GamePhase::Guessing | GamePhase::GameOver) {
        let game_over = state.phase == GamePhase::GameOver;
        state
            .scene
            .advance(state.wrong_count as i32, game_over);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Limb;
    use crate::sim::state::Outcome;

    fn word_input(word: &str) -> TickInput {
        TickInput {
            set_word: Some(word.to_string()),
            ..Default::default()
        }
    }

    fn guess_input(c: char) -> TickInput {
        TickInput {
            guess: Some(c),
            ..Default::default()
        }
    }

    fn ready_input() -> TickInput {
        TickInput {
            ready: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_phase_flow() {
        let mut state = GameState::new(11);
        assert_eq!(state.phase, GamePhase::Intro);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Intro);

        tick(&mut state, &ready_input());
        assert_eq!(state.phase, GamePhase::SetWord);

        tick(&mut state, &word_input("GALLOWS"));
        assert_eq!(state.phase, GamePhase::Transition);

        tick(&mut state, &ready_input());
        assert_eq!(state.phase, GamePhase::Guessing);
    }

    #[test]
    fn test_scene_only_animates_after_handover() {
        let mut state = GameState::new(11);
        tick(&mut state, &ready_input());
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        // Still in SetWord; the body has not been stepped
        assert_eq!(state.scene.body().vertex(crate::sim::skeleton::PELVIS).y, 230.0);

        tick(&mut state, &word_input("AB"));
        tick(&mut state, &ready_input());
        tick(&mut state, &TickInput::default());
        // One physics step has run; gravity moved the free vertices
        assert_ne!(state.scene.body().vertex(crate::sim::skeleton::PELVIS).y, 230.0);
    }

    #[test]
    fn test_misses_drive_the_reveal() {
        let mut state = GameState::new(11);
        tick(&mut state, &ready_input());
        tick(&mut state, &word_input("AB"));
        tick(&mut state, &ready_input());

        tick(&mut state, &guess_input('X'));
        assert_eq!(state.wrong_count, 1);
        for _ in 0..12 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.scene.body().limb_progress(Limb::Head), 1.0);
        assert_eq!(state.scene.body().limb_progress(Limb::Torso), 0.0);
    }

    #[test]
    fn test_defeat_plays_death_sequence() {
        let mut state = GameState::new(11);
        tick(&mut state, &ready_input());
        tick(&mut state, &word_input("AB"));
        tick(&mut state, &ready_input());
        for c in "CDEFGH".chars() {
            tick(&mut state, &guess_input(c));
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome, Some(Outcome::Defeat));

        // Guesses are ignored now, but the body keeps animating to the snap
        let mut frames = 0;
        while !state.scene.body().is_rope_snapped() {
            tick(&mut state, &guess_input('A'));
            frames += 1;
            assert!(frames < 300, "death sequence never reached the snap");
        }
        assert_eq!(state.wrong_count, 6);
        assert!(state.scene.is_game_over());
    }

    #[test]
    fn test_restart_resets_the_gallows() {
        let mut state = GameState::new(11);
        tick(&mut state, &ready_input());
        tick(&mut state, &word_input("AB"));
        tick(&mut state, &ready_input());
        for c in "CDEFGH".chars() {
            tick(&mut state, &guess_input(c));
        }
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.scene.body().is_rope_snapped());

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::SetWord);
        assert_eq!(state.wrong_count, 0);
        assert!(state.guessed.is_empty());
        assert!(!state.scene.body().is_rope_snapped());
        assert_eq!(state.scene.body().limb_progress(Limb::Head), 0.0);
    }

    #[test]
    fn test_determinism_per_seed() {
        let script = [
            ready_input(),
            word_input("HANGMAN"),
            ready_input(),
            guess_input('X'),
            guess_input('H'),
            guess_input('Q'),
        ];
        let mut a = GameState::new(424242);
        let mut b = GameState::new(424242);
        for input in &script {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        for _ in 0..120 {
            tick(&mut a, &TickInput::default());
            tick(&mut b, &TickInput::default());
        }
        assert_eq!(a.wrong_count, b.wrong_count);
        assert_eq!(a.attack_simulated, b.attack_simulated);
        assert_eq!(a.scene.body().blood().len(), b.scene.body().blood().len());
        assert_eq!(
            a.scene.body().vertex(crate::sim::skeleton::HEAD),
            b.scene.body().vertex(crate::sim::skeleton::HEAD)
        );
    }
}
