//! The `Sim` struct: control surface and tick pipeline.

use ct_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use ct_core::config::validate_radius;
use ct_core::{ContagionConfig, RegionBounds, SimRng, Timestamp};
use ct_infection::{ConnectionLedger, InfectionStateMachine};
use ct_mobility::MovementModel;
use ct_spatial::ProximityDetector;
use tracing::{debug, trace};

use crate::{
    AgentView, HistoryPoint, NoopObserver, SimObserver, SimResult, SimulationStats, Snapshot,
    StatisticsAggregator,
};

/// Upper bound on the elapsed time a single tick may consume.  A slow frame
/// or a stalled host therefore cannot produce a large catch-up step.
pub const MAX_TICK_DT_MS: u64 = 1_000;

/// The simulation clock and everything it drives.
///
/// `Sim<D>` exclusively owns the agent pool, the connection ledger, the
/// statistics, and the history of one run.  The host reads it only through
/// snapshots and accessors; all mutation goes through the control surface
/// ([`start`](Self::start), [`pause`](Self::pause), [`reset`](Self::reset),
/// [`set_infection_radius`](Self::set_infection_radius)) and
/// [`tick`](Self::tick).
///
/// `tick` is not re-entrant and never needs to be: it takes `&mut self`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: ProximityDetector> {
    // ── Configuration ─────────────────────────────────────────────────────
    config:   ContagionConfig,
    detector: D,
    movement: MovementModel,
    root_rng: SimRng,

    // ── Clock ─────────────────────────────────────────────────────────────
    running:      bool,
    last_tick_at: Timestamp,
    started_at:   Timestamp,

    // ── Run state (replaced on reset) ─────────────────────────────────────
    run_seed: u64,
    agents:   AgentStore,
    rngs:     AgentRngs,
    ledger:   ConnectionLedger,
    stats:    StatisticsAggregator,
    history:  Vec<HistoryPoint>,
}

/// Freshly generated per-run state.
struct Run {
    seed:   u64,
    agents: AgentStore,
    rngs:   AgentRngs,
    stats:  StatisticsAggregator,
}

impl Run {
    fn generate(config: &ContagionConfig, root_rng: &mut SimRng, now: Timestamp) -> SimResult<Run> {
        let seed = root_rng.next_run_seed();
        let (agents, rngs) = AgentStoreBuilder::new(config.population_size, seed)
            .bounds(config.bounds)
            .patient_zero_position(config.patient_zero_position)
            .build(now)?;
        let stats = StatisticsAggregator::new(agents.count)?;
        Ok(Run { seed, agents, rngs, stats })
    }
}

impl<D: ProximityDetector> Sim<D> {
    /// Assemble a simulation with a freshly reset run.  `config` must
    /// already be validated.
    pub(crate) fn new(config: ContagionConfig, detector: D, running: bool, now: Timestamp) -> SimResult<Self> {
        let mut root_rng = SimRng::new(config.seed);
        let run = Run::generate(&config, &mut root_rng, now)?;
        let mut sim = Self {
            movement:     MovementModel::new(config.bounds),
            config,
            detector,
            root_rng,
            running,
            last_tick_at: now,
            started_at:   now,
            run_seed:     run.seed,
            agents:       run.agents,
            rngs:         run.rngs,
            ledger:       ConnectionLedger::new(),
            stats:        run.stats,
            history:      Vec::new(),
        };
        sim.history.push(sim.initial_point());
        debug!(population = sim.agents.count, seed = sim.run_seed, "simulation created");
        Ok(sim)
    }

    // ── Control surface ───────────────────────────────────────────────────

    /// Resume ticking.  Elapsed time restarts from `now`, so the first tick
    /// after a pause does not try to catch up on the paused interval.
    pub fn start(&mut self, now: Timestamp) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_tick_at = now.max(self.last_tick_at);
        debug!(%now, "simulation started");
    }

    /// Suppress ticks until the next [`start`](Self::start).
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        debug!(at = %self.last_tick_at, "simulation paused");
    }

    /// Start if paused, pause if running.  Returns the new running state.
    pub fn toggle(&mut self, now: Timestamp) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start(now);
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start a new run with the current configuration.
    ///
    /// Regenerates the agent pool from a new run seed, clears connections
    /// and history, reseeds statistics, and sets the run start to `now`.
    /// The running/paused state is left as it was.
    pub fn reset(&mut self, now: Timestamp) -> SimResult<()> {
        let run = Run::generate(&self.config, &mut self.root_rng, now)?;
        self.install(run, now);
        Ok(())
    }

    /// Start a new run with a different population size and region.
    ///
    /// A pinned patient-zero position moves with the region: it keeps its
    /// relative place, so a pin at the old centre lands on the new centre.
    ///
    /// The new values are validated before anything changes; on error the
    /// current run is untouched.
    pub fn reset_with(&mut self, population_size: usize, bounds: RegionBounds, now: Timestamp) -> SimResult<()> {
        let patient_zero_position = self
            .config
            .patient_zero_position
            .map(|p| bounds.remap(p, &self.config.bounds));
        let config = ContagionConfig {
            population_size,
            bounds,
            patient_zero_position,
            ..self.config.clone()
        };
        config.validate()?;
        let run = Run::generate(&config, &mut self.root_rng, now)?;
        self.movement = MovementModel::new(config.bounds);
        self.config = config;
        self.install(run, now);
        Ok(())
    }

    /// Change the infection radius for subsequent ticks.  Zero, negative,
    /// and non-finite values are rejected, never clamped.
    pub fn set_infection_radius(&mut self, radius: f64) -> SimResult<()> {
        validate_radius(radius)?;
        debug!(from = self.config.infection_radius, to = radius, "infection radius changed");
        self.config.infection_radius = radius;
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation to `now`.
    ///
    /// Returns `None` without touching any state while paused.  A `now`
    /// earlier than the previous tick is treated as the previous tick.
    pub fn tick(&mut self, now: Timestamp) -> Option<Snapshot> {
        self.tick_with(now, &mut NoopObserver)
    }

    /// [`tick`](Self::tick), reporting progress to `observer`.
    pub fn tick_with<O: SimObserver>(&mut self, now: Timestamp, observer: &mut O) -> Option<Snapshot> {
        if !self.running {
            return None;
        }

        let now = now.max(self.last_tick_at);
        let dt_ms = now.since(self.last_tick_at).min(MAX_TICK_DT_MS);
        self.last_tick_at = now;
        observer.on_tick_start(now);

        // ── ① Movement ────────────────────────────────────────────────────
        self.movement.step_all(&mut self.agents, &mut self.rngs, dt_ms as f64);

        // ── ② Detection against the infected set as of tick start ─────────
        let found = self.detector.detect(&self.agents, self.config.infection_radius);

        // ── ③ Apply atomically; one edge per transition; recolour ────────
        let applied = InfectionStateMachine::apply(&mut self.agents, &found, now);
        self.ledger.record_transmissions(&self.agents, &applied, now);
        InfectionStateMachine::recolor(&mut self.agents, now);
        observer.on_transmissions(now, &applied);

        // ── ④ Edge eviction ───────────────────────────────────────────────
        let evicted = self.ledger.evict(now);

        // ── ⑤ Statistics and history ──────────────────────────────────────
        let stats = self.stats.observe(self.agents.infected_count());
        self.history.push(HistoryPoint {
            elapsed_seconds: now.secs_since(self.started_at),
            infected_count:  stats.infected,
        });

        trace!(
            %now,
            dt_ms,
            new_infections = applied.len(),
            infected = stats.infected,
            edges = self.ledger.len(),
            evicted,
            "tick"
        );

        let snapshot = self.snapshot();
        observer.on_tick_end(&snapshot);
        Some(snapshot)
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// The current state as a snapshot, without advancing.  Useful for
    /// drawing while paused.
    pub fn snapshot(&self) -> Snapshot {
        let agents = self
            .agents
            .agent_ids()
            .map(|id| AgentView {
                id,
                position: self.agents.position[id.index()],
                state:    self.agents.state(id),
                color:    self.agents.color[id.index()],
            })
            .collect();
        let stats = self.stats.stats();
        Snapshot {
            at:          self.last_tick_at,
            agents,
            connections: self.ledger.iter().cloned().collect(),
            stats,
            latest:      self.history.last().copied().unwrap_or(HistoryPoint {
                elapsed_seconds: 0.0,
                infected_count:  stats.infected,
            }),
        }
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats.stats()
    }

    /// Every history point of the current run, in time order.
    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn ledger(&self) -> &ConnectionLedger {
        &self.ledger
    }

    pub fn config(&self) -> &ContagionConfig {
        &self.config
    }

    pub fn infection_radius(&self) -> f64 {
        self.config.infection_radius
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Seed the current run's agents were generated from.
    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn last_tick_at(&self) -> Timestamp {
        self.last_tick_at
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn install(&mut self, run: Run, now: Timestamp) {
        self.run_seed = run.seed;
        self.agents = run.agents;
        self.rngs = run.rngs;
        self.stats = run.stats;
        self.ledger.clear();
        self.history.clear();
        self.started_at = now;
        self.last_tick_at = now;
        self.history.push(self.initial_point());
        debug!(
            population = self.agents.count,
            seed = self.run_seed,
            running = self.running,
            "simulation reset"
        );
    }

    fn initial_point(&self) -> HistoryPoint {
        HistoryPoint {
            elapsed_seconds: 0.0,
            infected_count:  self.stats.stats().infected,
        }
    }
}
