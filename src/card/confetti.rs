//! Confetti bursts
//!
//! A session spawns one piece per tick until it reaches its piece budget.
//! Each piece removes itself once its fall is over. Only one session owns
//! the container at a time: `start` tears the previous one down first.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::{ConfettiSurface, Scheduler, Task, TaskHandle};

/// Burst tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiParams {
    /// Nominal fall time (ms)
    pub duration_ms: u32,
    /// Pieces per burst
    pub max_pieces: u32,
    /// Time between pieces (ms)
    pub spawn_interval_ms: u32,
    /// Extra time a piece stays after its fall (ms)
    pub removal_buffer_ms: u32,
}

impl Default for ConfettiParams {
    fn default() -> Self {
        Self {
            duration_ms: CONFETTI_DURATION_MS,
            max_pieces: CONFETTI_MAX_PIECES,
            spawn_interval_ms: CONFETTI_SPAWN_INTERVAL_MS,
            removal_buffer_ms: CONFETTI_REMOVAL_BUFFER_MS,
        }
    }
}

impl ConfettiParams {
    /// Shortest possible fall (ms)
    pub fn min_fall_ms(&self) -> f64 {
        f64::from(self.duration_ms) * 0.7
    }

    /// Upper bound (exclusive) of a fall (ms)
    pub fn max_fall_ms(&self) -> f64 {
        f64::from(self.duration_ms) * 1.2
    }
}

/// Identifies one spawned piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// A single confetti piece
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub id: ParticleId,
    /// Horizontal position, percent of container width in [0, 100)
    pub left_percent: f64,
    pub color: &'static str,
    /// Fall animation duration (ms)
    pub fall_ms: f64,
}

/// Confetti burst state for one shared container
pub struct ConfettiSession {
    surface: Box<dyn ConfettiSurface>,
    params: ConfettiParams,
    rng: Pcg32,
    /// Bumped on every start so ticks from an older session are ignored
    generation: u64,
    spawn_timer: Option<TaskHandle>,
    spawned: u32,
    /// Pieces in flight and their pending removal tasks
    live: BTreeMap<ParticleId, TaskHandle>,
    next_particle: u64,
}

impl ConfettiSession {
    pub fn new(surface: Box<dyn ConfettiSurface>, params: ConfettiParams, seed: u64) -> Self {
        Self {
            surface,
            params,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            spawn_timer: None,
            spawned: 0,
            live: BTreeMap::new(),
            next_particle: 0,
        }
    }

    /// Begin a new burst, discarding whatever the previous one left behind
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop(scheduler);
        self.generation += 1;
        self.spawned = 0;
        if self.params.max_pieces == 0 {
            return;
        }
        self.schedule_tick(scheduler);
        log::debug!("Confetti session {} started", self.generation);
    }

    /// Cancel pending spawns and remove every piece immediately
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.spawn_timer.take() {
            scheduler.cancel(handle);
        }
        for (_, handle) in std::mem::take(&mut self.live) {
            scheduler.cancel(handle);
        }
        self.surface.clear();
    }

    /// Spawn tick for session `generation`
    pub fn on_tick(&mut self, generation: u64, scheduler: &mut dyn Scheduler) {
        if generation != self.generation || self.spawn_timer.is_none() {
            return;
        }
        self.spawn_timer = None;
        self.spawn_piece(scheduler);
        self.spawned += 1;
        if self.spawned < self.params.max_pieces {
            self.schedule_tick(scheduler);
        } else {
            log::debug!("Confetti session {} finished spawning", self.generation);
        }
    }

    /// A piece's fall is over
    pub fn on_particle_expired(&mut self, id: ParticleId) {
        if self.live.remove(&id).is_some() {
            self.surface.remove(id);
        }
    }

    /// Still spawning pieces
    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Pieces spawned by the current session
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Pieces currently in the container
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn schedule_tick(&mut self, scheduler: &mut dyn Scheduler) {
        let handle = scheduler.schedule(
            self.params.spawn_interval_ms,
            Task::ConfettiTick {
                generation: self.generation,
            },
        );
        self.spawn_timer = Some(handle);
    }

    fn spawn_piece(&mut self, scheduler: &mut dyn Scheduler) {
        let id = ParticleId(self.next_particle);
        self.next_particle += 1;

        let duration = f64::from(self.params.duration_ms);
        let particle = ConfettiParticle {
            id,
            left_percent: self.rng.random_range(0.0..100.0),
            color: CONFETTI_PALETTE[self.rng.random_range(0..CONFETTI_PALETTE.len())],
            fall_ms: duration * 0.7 + self.rng.random::<f64>() * duration * 0.5,
        };
        self.surface.spawn(&particle);

        // Truncation keeps removal within fall + buffer of the spawn
        let linger = (particle.fall_ms + f64::from(self.params.removal_buffer_ms)) as u32;
        let handle = scheduler.schedule(linger, Task::ParticleExpired(id));
        self.live.insert(id, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::testing::{Effect, Journal, RecordingConfetti};
    use crate::platform::ManualScheduler;
    use proptest::prelude::*;

    fn session(journal: &Journal, params: ConfettiParams) -> ConfettiSession {
        ConfettiSession::new(Box::new(RecordingConfetti::new(journal)), params, 7)
    }

    fn run(session: &mut ConfettiSession, sched: &ManualScheduler, ms: u64) {
        let mut driver = sched.clone();
        sched.run_for(ms, |task| match task {
            Task::ConfettiTick { generation } => session.on_tick(generation, &mut driver),
            Task::ParticleExpired(id) => session.on_particle_expired(id),
            Task::RevealComplete(_) => {}
        });
    }

    #[test]
    fn test_first_piece_after_one_interval() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let mut s = session(&journal, ConfettiParams::default());

        s.start(&mut sched);
        run(&mut s, &sched, 39);
        assert_eq!(s.spawned(), 0);
        run(&mut s, &sched, 1);
        assert_eq!(s.spawned(), 1);
        assert_eq!(s.live_count(), 1);
    }

    #[test]
    fn test_spawning_stops_at_max_pieces() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let mut s = session(&journal, ConfettiParams::default());

        s.start(&mut sched);
        // 60 pieces at 40ms each = 2400ms
        run(&mut s, &sched, 2400);
        assert_eq!(s.spawned(), 60);
        assert!(!s.is_spawning());
        assert_eq!(journal.count(|e| matches!(e, Effect::ConfettiSpawn(_))), 60);

        run(&mut s, &sched, 10_000);
        assert_eq!(s.spawned(), 60);
        assert_eq!(s.live_count(), 0);
        assert_eq!(journal.count(|e| matches!(e, Effect::ConfettiRemove(_))), 60);
    }

    #[test]
    fn test_pieces_removed_within_fall_plus_buffer() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let params = ConfettiParams::default();
        let mut s = session(&journal, params);

        s.start(&mut sched);
        let mut spawned_at = std::collections::HashMap::new();
        let mut removed_at = std::collections::HashMap::new();
        let mut driver = sched.clone();
        let clock = sched.clone();
        let mut seen = 0;
        sched.run_for(20_000, |task| {
            match task {
                Task::ConfettiTick { generation } => s.on_tick(generation, &mut driver),
                Task::ParticleExpired(id) => {
                    s.on_particle_expired(id);
                    removed_at.insert(id, clock.now());
                }
                Task::RevealComplete(_) => {}
            }
            for effect in journal.since(seen) {
                if let Effect::ConfettiSpawn(p) = effect {
                    spawned_at.insert(p.id, (clock.now(), p.fall_ms));
                }
            }
            seen = journal.len();
        });

        assert_eq!(spawned_at.len(), 60);
        for (id, (t0, fall)) in &spawned_at {
            let t1 = removed_at[id];
            let lived = (t1 - t0) as f64;
            assert!(lived >= *fall, "piece removed before its fall ended");
            assert!(lived <= fall + 100.0, "piece lingered past fall + buffer");
        }
    }

    #[test]
    fn test_restart_clears_previous_session_first() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let mut s = session(&journal, ConfettiParams::default());

        s.start(&mut sched);
        run(&mut s, &sched, 400);
        assert_eq!(s.live_count(), 10);

        let mark = journal.len();
        s.start(&mut sched);
        // Old pieces are gone before the new session spawns anything
        assert_eq!(journal.since(mark)[0], Effect::ConfettiClear);
        assert_eq!(s.live_count(), 0);
        // Only one spawn timer pending; old removal tasks cancelled
        assert_eq!(sched.pending(), 1);

        run(&mut s, &sched, 40);
        assert_eq!(s.spawned(), 1);
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let mut s = session(&journal, ConfettiParams::default());

        s.start(&mut sched);
        s.start(&mut sched);
        s.on_tick(1, &mut sched);
        assert_eq!(s.spawned(), 0);
    }

    #[test]
    fn test_stop_removes_everything() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let mut s = session(&journal, ConfettiParams::default());

        s.start(&mut sched);
        run(&mut s, &sched, 200);
        s.stop(&mut sched);
        assert_eq!(s.live_count(), 0);
        assert!(!s.is_spawning());
        assert_eq!(sched.pending(), 0);
        assert_eq!(journal.last(), Some(Effect::ConfettiClear));
    }

    #[test]
    fn test_zero_budget_spawns_nothing() {
        let journal = Journal::default();
        let mut sched = ManualScheduler::new();
        let params = ConfettiParams {
            max_pieces: 0,
            ..Default::default()
        };
        let mut s = session(&journal, params);
        s.start(&mut sched);
        assert_eq!(sched.pending(), 0);
    }

    proptest! {
        #[test]
        fn prop_pieces_within_bounds(seed in any::<u64>(), max in 1u32..120) {
            let journal = Journal::default();
            let mut sched = ManualScheduler::new();
            let params = ConfettiParams { max_pieces: max, ..Default::default() };
            let mut s = ConfettiSession::new(
                Box::new(RecordingConfetti::new(&journal)),
                params,
                seed,
            );
            s.start(&mut sched);
            run(&mut s, &sched, 60_000);

            prop_assert_eq!(s.spawned(), max);
            for effect in journal.since(0) {
                if let Effect::ConfettiSpawn(p) = effect {
                    prop_assert!((0.0..100.0).contains(&p.left_percent));
                    prop_assert!(CONFETTI_PALETTE.contains(&p.color));
                    prop_assert!(p.fall_ms >= params.min_fall_ms());
                    prop_assert!(p.fall_ms < params.max_fall_ms());
                }
            }
        }
    }
}
