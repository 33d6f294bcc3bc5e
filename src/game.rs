//! Session state machine: Running → GameOver → Terminated.
//!
//! The loop owns the world and the RNG; the binary feeds it one batch of
//! input events plus a held-key snapshot per frame, renders whatever phase
//! comes back, and handles frame pacing.

use rand::Rng;

use crate::config::GameConfig;
use crate::input::{InputEvent, Key, KeyState};
use crate::world::{FrameReport, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Showing the game-over screen, waiting for any key.
    GameOver,
    Terminated,
}

#[derive(Debug)]
pub struct GameLoop<R: Rng> {
    world: World,
    phase: Phase,
    rng: R,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            world: World::new(config),
            phase: Phase::Running,
            rng,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one frame.  While running, the events are drained in order, then
    /// the world advances once.  Returns the phase after this frame and the
    /// world's report (default when the world did not advance).
    pub fn tick<I>(&mut self, events: I, keys: &KeyState) -> (Phase, FrameReport)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        match self.phase {
            Phase::Running => self.tick_running(events, keys),
            Phase::GameOver => {
                // Any key press (or quit) acknowledges the game-over screen
                let acknowledged = events
                    .into_iter()
                    .any(|e| matches!(e, InputEvent::Quit | InputEvent::KeyDown(_)));
                if acknowledged {
                    self.transition(Phase::Terminated);
                }
                (self.phase, FrameReport::default())
            }
            Phase::Terminated => (self.phase, FrameReport::default()),
        }
    }

    fn tick_running<I>(&mut self, events: I, keys: &KeyState) -> (Phase, FrameReport)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            match event {
                InputEvent::Quit => {
                    log::info!("quit requested at frame {}", self.world.frame);
                    self.transition(Phase::GameOver);
                    return (self.phase, FrameReport::default());
                }
                // One bullet per press; auto-repeat does not fire
                InputEvent::KeyDown(Key::Fire) => self.world.fire(),
                _ => {}
            }
        }

        let report = self.world.step(keys, &mut self.rng);
        if self.world.is_finished() {
            self.transition(Phase::GameOver);
        }
        (self.phase, report)
    }

    fn transition(&mut self, next: Phase) {
        log::info!("phase {:?} -> {:?} (score {})", self.phase, next, self.world.score);
        self.phase = next;
    }
}
