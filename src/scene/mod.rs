//! Gallows scene: translates the external guess signals into ragdoll
//! animation and draw primitives.
//!
//! The scene owns the body and forwards the per-frame wrong-guess count to
//! it. It performs no physics of its own; it only reads vertex positions
//! and reveal progress back out to build the draw list.

pub mod shapes;

use glam::Vec2;

use crate::consts::{ANCHOR_X, ANCHOR_Y};
use crate::sim::body::{Limb, Ragdoll};
use crate::sim::skeleton;
use shapes::{BODY_COLOR, DrawCmd, GALLOWS_COLOR, ROPE_COLOR, circle, line};

/// Head circle radius when fully revealed
const HEAD_RADIUS: f32 = 18.0;
/// Reveal fraction past which hand/foot dots appear
const TIP_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct GallowsScene {
    body: Ragdoll,
    wrong_count: i32,
    game_over: bool,
}

impl GallowsScene {
    pub fn new(seed: u64) -> Self {
        Self {
            body: Ragdoll::new(Vec2::new(ANCHOR_X, ANCHOR_Y), seed),
            wrong_count: 0,
            game_over: false,
        }
    }

    /// Per-frame driving contract: snapshot the external signals and run
    /// one body step. The body keeps animating after game over; only the
    /// guess intake (which lives in the state machine) stops.
    pub fn advance(&mut self, wrong_count: i32, game_over: bool) {
        self.wrong_count = wrong_count.max(0);
        self.game_over = game_over;
        self.body.step(self.wrong_count);
    }

    pub fn body(&self) -> &Ragdoll {
        &self.body
    }

    pub fn wrong_count(&self) -> i32 {
        self.wrong_count
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The static gallows frame: base, pole, top beam, brace, noose stub.
    pub fn frame(&self) -> Vec<DrawCmd> {
        let beam_y = ANCHOR_Y - 20.0;
        vec![
            line(
                Vec2::new(40.0, 620.0),
                Vec2::new(320.0, 620.0),
                8.0,
                GALLOWS_COLOR,
            ),
            line(
                Vec2::new(80.0, 620.0),
                Vec2::new(80.0, beam_y),
                6.0,
                GALLOWS_COLOR,
            ),
            line(
                Vec2::new(80.0, beam_y),
                Vec2::new(ANCHOR_X, beam_y),
                6.0,
                GALLOWS_COLOR,
            ),
            line(
                Vec2::new(80.0, beam_y + 60.0),
                Vec2::new(140.0, beam_y),
                4.0,
                GALLOWS_COLOR,
            ),
            // Noose hint, always visible
            line(
                Vec2::new(ANCHOR_X, beam_y),
                Vec2::new(ANCHOR_X, ANCHOR_Y),
                3.0,
                ROPE_COLOR,
            ),
        ]
    }

    /// Everything that moves: blood, rope, the partially grown figure.
    pub fn draw(&self) -> Vec<DrawCmd> {
        let mut cmds = Vec::new();
        let body = &self.body;

        // Blood first, under the figure
        for b in body.blood() {
            cmds.push(circle(
                b.pos,
                b.size,
                [b.red as f32 / 255.0, 0.0, 0.0, b.alpha()],
                true,
            ));
        }

        let anchor = body.vertex(skeleton::ANCHOR);
        let head = body.vertex(skeleton::HEAD);
        if !body.is_rope_snapped() {
            cmds.push(line(anchor, head, 3.0, ROPE_COLOR));
        } else {
            // Frayed stub on the beam, loose end still around the neck
            cmds.push(line(anchor, anchor + Vec2::new(0.0, 80.0), 3.0, ROPE_COLOR));
            cmds.push(line(head, head + Vec2::new(5.0, -30.0), 3.0, ROPE_COLOR));
        }

        for limb in Limb::ALL {
            let progress = body.limb_progress(limb);
            if progress <= 0.0 {
                continue;
            }
            if limb == Limb::Head {
                // Head pops by scaling up in place
                cmds.push(circle(head, HEAD_RADIUS * progress, BODY_COLOR, false));
                continue;
            }
            for (a, b) in body.limb_segments(limb) {
                cmds.push(line(a, b, 4.0, BODY_COLOR));
            }
            if progress > TIP_THRESHOLD {
                if let Some(tip) = limb.tip() {
                    cmds.push(circle(body.vertex(tip), 4.0, BODY_COLOR, true));
                }
            }
        }

        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_lines(cmds: &[DrawCmd], color: shapes::Color) -> usize {
        cmds.iter()
            .filter(|c| matches!(c, DrawCmd::Line { color: lc, .. } if *lc == color))
            .count()
    }

    #[test]
    fn test_empty_figure_draws_rope_only() {
        let scene = GallowsScene::new(42);
        let cmds = scene.draw();
        // Just the intact rope; no body, no blood
        assert_eq!(cmds.len(), 1);
        assert_eq!(count_lines(&cmds, ROPE_COLOR), 1);
        assert_eq!(scene.frame().len(), 5);
    }

    #[test]
    fn test_limbs_appear_with_wrong_guesses() {
        let mut scene = GallowsScene::new(42);
        for _ in 0..12 {
            scene.advance(2, false);
        }
        let cmds = scene.draw();
        // Head circle plus one torso line
        assert_eq!(count_lines(&cmds, BODY_COLOR), 1);
        assert!(cmds.iter().any(
            |c| matches!(c, DrawCmd::Circle { color, filled: false, .. } if *color == BODY_COLOR)
        ));
        // Arms/legs not revealed yet
        assert!(count_lines(&cmds, BODY_COLOR) < 3);
    }

    #[test]
    fn test_full_figure_line_count() {
        let mut scene = GallowsScene::new(42);
        for _ in 0..12 {
            scene.advance(6, false);
        }
        let cmds = scene.draw();
        // Torso + 2 per arm + 2 per leg
        assert_eq!(count_lines(&cmds, BODY_COLOR), 9);
        // Hand and foot dots are visible once fully grown
        let dots = cmds
            .iter()
            .filter(|c| {
                matches!(c, DrawCmd::Circle { color, filled: true, .. } if *color == BODY_COLOR)
            })
            .count();
        assert_eq!(dots, 4);
    }

    #[test]
    fn test_broken_rope_draws_two_stubs() {
        let mut scene = GallowsScene::new(42);
        let mut steps = 0;
        while !scene.body().is_rope_snapped() {
            scene.advance(6, true);
            steps += 1;
            assert!(steps < 200, "rope never snapped");
        }
        let cmds = scene.draw();
        assert_eq!(count_lines(&cmds, ROPE_COLOR), 2);
    }

    #[test]
    fn test_growing_torso_is_shorter_than_full() {
        let mut scene = GallowsScene::new(42);
        for _ in 0..3 {
            scene.advance(2, false);
        }
        let grown: Vec<_> = scene
            .draw()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Line { a, b, color, .. } if *color == BODY_COLOR => {
                    Some(a.distance(*b))
                }
                _ => None,
            })
            .collect();
        assert_eq!(grown.len(), 1);
        let full = scene
            .body()
            .vertex(skeleton::NECK)
            .distance(scene.body().vertex(skeleton::PELVIS));
        assert!(grown[0] < full * 0.5);
    }
}
