//! Animation queue driven by engine events.
//!
//! The engine has already applied each step by the time its event arrives; the
//! animator only decides how the transition is shown and for how long. The
//! front-end must not call `advance` on the engine until [`Animator::is_idle`].

use std::collections::VecDeque;

use crate::core::{Displacements, MatchSet};
use crate::engine::EngineEvent;
use crate::types::{Position, TileKind, CLEAR_ANIM_MS, FALL_ANIM_MS, SWAP_ANIM_MS};

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Two tiles trading places. The board already holds the post-swap state.
    Swap {
        a: Position,
        b: Position,
        tile_a: TileKind,
        tile_b: TileKind,
    },
    /// Tiles slide towards each other and back; the board is unchanged.
    Bounce {
        a: Position,
        b: Position,
        tile_a: TileKind,
        tile_b: TileKind,
    },
    /// Matched tiles fading out (still present on the board).
    Clear { cells: MatchSet, chain: u32 },
    /// Tiles dropping into the positions they now occupy.
    Fall { displacements: Displacements },
}

impl Animation {
    pub fn duration_ms(&self) -> u32 {
        match self {
            Animation::Swap { .. } | Animation::Bounce { .. } => SWAP_ANIM_MS,
            Animation::Clear { .. } => CLEAR_ANIM_MS,
            Animation::Fall { .. } => FALL_ANIM_MS,
        }
    }

    fn from_event(event: &EngineEvent) -> Option<Self> {
        match event {
            EngineEvent::ValidSwap {
                tile_a,
                tile_b,
                pos_a,
                pos_b,
                ..
            } => Some(Animation::Swap {
                a: *pos_a,
                b: *pos_b,
                tile_a: *tile_a,
                tile_b: *tile_b,
            }),
            EngineEvent::InvalidSwap {
                tile_a,
                tile_b,
                pos_a,
                pos_b,
            } => Some(Animation::Bounce {
                a: *pos_a,
                b: *pos_b,
                tile_a: *tile_a,
                tile_b: *tile_b,
            }),
            EngineEvent::Clear { matches, chain, .. } => Some(Animation::Clear {
                cells: matches.clone(),
                chain: *chain,
            }),
            EngineEvent::Fall { displacements } => Some(Animation::Fall {
                displacements: displacements.clone(),
            }),
            EngineEvent::MoveResolved { .. } | EngineEvent::GameOver { .. } => None,
        }
    }
}

/// Current animation and how far through it we are.
#[derive(Debug, Clone, Copy)]
pub struct AnimationFrame<'a> {
    pub animation: &'a Animation,
    /// Linear progress in `0.0..=1.0`.
    pub progress: f32,
}

#[derive(Debug, Default)]
pub struct Animator {
    queue: VecDeque<Animation>,
    elapsed_ms: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_events(&mut self, events: &[EngineEvent]) {
        self.queue
            .extend(events.iter().filter_map(Animation::from_event));
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advance the current animation; finished ones are dropped.
    pub fn tick(&mut self, dt_ms: u32) {
        let Some(current) = self.queue.front() else {
            self.elapsed_ms = 0;
            return;
        };

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms >= current.duration_ms() {
            self.queue.pop_front();
            self.elapsed_ms = 0;
        }
    }

    pub fn frame(&self) -> Option<AnimationFrame<'_>> {
        self.queue.front().map(|animation| AnimationFrame {
            animation,
            progress: (self.elapsed_ms as f32 / animation.duration_ms() as f32).min(1.0),
        })
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.elapsed_ms = 0;
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// 0 → 1 → 0 over the animation.
pub fn bounce(t: f32) -> f32 {
    (std::f32::consts::PI * t.clamp(0.0, 1.0)).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_event() -> EngineEvent {
        EngineEvent::InvalidSwap {
            tile_a: TileKind::Apple,
            tile_b: TileKind::Cake,
            pos_a: Position::new(0, 0),
            pos_b: Position::new(0, 1),
        }
    }

    #[test]
    fn test_bookkeeping_events_do_not_animate() {
        let mut animator = Animator::new();
        animator.push_events(&[
            EngineEvent::MoveResolved {
                final_score: 30,
                moves_remaining: 29,
            },
            EngineEvent::GameOver { final_score: 30 },
        ]);
        assert!(animator.is_idle());
        assert!(animator.frame().is_none());
    }

    #[test]
    fn test_bounce_runs_for_swap_duration() {
        let mut animator = Animator::new();
        animator.push_events(&[swap_event()]);
        assert!(!animator.is_idle());

        animator.tick(SWAP_ANIM_MS / 2);
        let frame = animator.frame().expect("still running");
        assert!(matches!(frame.animation, Animation::Bounce { .. }));
        assert!((frame.progress - 0.5).abs() < 0.01);

        animator.tick(SWAP_ANIM_MS);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_queue_plays_in_order() {
        let mut animator = Animator::new();
        animator.push_events(&[
            swap_event(),
            EngineEvent::Clear {
                matches: MatchSet::new(),
                chain: 0,
                score_delta: 0,
            },
        ]);
        assert_eq!(animator.len(), 2);

        animator.tick(SWAP_ANIM_MS);
        let frame = animator.frame().expect("clear pending");
        assert!(matches!(frame.animation, Animation::Clear { .. }));
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn test_easing_curves() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!(bounce(0.0).abs() < 1e-6);
        assert!((bounce(0.5) - 1.0).abs() < 1e-6);
        assert!(bounce(1.0).abs() < 1e-6);
    }
}
