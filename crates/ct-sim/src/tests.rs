//! Integration tests for ct-sim.

use std::collections::HashSet;

use ct_core::color::TERMINAL_INFECTION;
use ct_core::{AgentId, ContagionConfig, CtError, Point, RegionBounds, Timestamp};
use ct_infection::EDGE_TTL_MS;
use ct_spatial::{BruteForceDetector, RTreeDetector, Transmission};

use crate::{
    HistoryPoint, HistoryRecorder, MAX_TICK_DT_MS, Sim, SimBuilder, SimError, SimObserver,
    Snapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FRAME_MS: u64 = 16;

/// The reference scenario: 200 agents on the unit square, radius 0.003,
/// patient zero pinned at the centre.
fn reference_config() -> ContagionConfig {
    ContagionConfig {
        population_size:       200,
        bounds:                RegionBounds::unit_square(),
        infection_radius:      0.003,
        seed:                  42,
        patient_zero_position: Some(Point::new(0.5, 0.5)),
    }
}

/// A denser configuration where infections happen within a few hundred ticks.
fn busy_config() -> ContagionConfig {
    ContagionConfig {
        population_size:       150,
        infection_radius:      0.08,
        seed:                  7,
        ..reference_config()
    }
}

fn running_sim(config: ContagionConfig) -> Sim<BruteForceDetector> {
    SimBuilder::new(config).autostart(true).build(Timestamp(0)).unwrap()
}

/// Tick `n` frames starting after `from`, returning every snapshot.
fn run_frames<D: ct_spatial::ProximityDetector>(sim: &mut Sim<D>, from: u64, n: u64) -> Vec<Snapshot> {
    (1..=n)
        .map(|i| sim.tick(Timestamp(from + i * FRAME_MS)).expect("sim is running"))
        .collect()
}

fn assert_fresh_run<D: ct_spatial::ProximityDetector>(sim: &Sim<D>, total: usize) {
    let snap = sim.snapshot();
    assert_eq!(snap.infected_now(), 1);
    assert!(snap.agents[0].state.is_infected());
    assert_eq!(snap.stats.total, total);
    assert_eq!(snap.stats.infected, 1);
    assert!((snap.stats.rate - 100.0 / total as f64).abs() < 1e-12);
    assert_eq!(sim.history(), &[HistoryPoint { elapsed_seconds: 0.0, infected_count: 1 }]);
    assert!(sim.ledger().is_empty());
    assert!(snap.connections.is_empty());
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn reference_scenario_initial_stats() {
        let sim = SimBuilder::new(reference_config()).build(Timestamp(0)).unwrap();
        assert_fresh_run(&sim, 200);
        let stats = sim.stats();
        assert_eq!(stats.total, 200);
        assert_eq!(stats.infected, 1);
        assert_eq!(stats.rate, 0.5);
        assert_eq!(sim.agents().position[0], Point::new(0.5, 0.5));
    }

    #[test]
    fn starts_paused_by_default() {
        let sim = SimBuilder::new(reference_config()).build(Timestamp(0)).unwrap();
        assert!(!sim.is_running());
    }

    #[test]
    fn zero_population_rejected() {
        let config = ContagionConfig { population_size: 0, ..reference_config() };
        let result = SimBuilder::new(config).build(Timestamp(0));
        assert!(matches!(result, Err(SimError::Core(CtError::InvalidPopulation(0)))));
    }

    #[test]
    fn zero_radius_rejected() {
        let config = ContagionConfig { infection_radius: 0.0, ..reference_config() };
        let result = SimBuilder::new(config).build(Timestamp(0));
        assert!(matches!(result, Err(SimError::Core(CtError::InvalidRadius(_)))));
    }

    #[test]
    fn degenerate_bounds_cannot_be_built() {
        assert!(matches!(
            RegionBounds::new(0.0, 1.0, 0.5, 0.5),
            Err(CtError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn rtree_detector_can_be_selected() {
        let sim = SimBuilder::new(reference_config())
            .detector(RTreeDetector)
            .build(Timestamp(0))
            .unwrap();
        assert_fresh_run(&sim, 200);
    }
}

// ── Clock: start / pause / dt ─────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use super::*;

    #[test]
    fn paused_tick_is_noop() {
        let mut sim = SimBuilder::new(busy_config()).build(Timestamp(0)).unwrap();
        let before = sim.snapshot();
        for i in 1..50 {
            assert!(sim.tick(Timestamp(i * FRAME_MS)).is_none());
        }
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn pause_stops_history_growth() {
        let mut sim = running_sim(busy_config());
        run_frames(&mut sim, 0, 10);
        assert_eq!(sim.history().len(), 11);
        sim.pause();
        assert!(sim.tick(Timestamp(10_000)).is_none());
        assert_eq!(sim.history().len(), 11);
    }

    #[test]
    fn resume_does_not_catch_up() {
        let mut sim = SimBuilder::new(busy_config()).build(Timestamp(0)).unwrap();
        let speed = sim.agents().speed[3];
        sim.start(Timestamp(600_000));
        sim.tick(Timestamp(600_000 + FRAME_MS)).unwrap();
        let expected = speed * FRAME_MS as f64 / 30.0;
        assert!((sim.agents().progress[3] - expected).abs() < 1e-12);
    }

    #[test]
    fn large_dt_is_clamped() {
        let mut sim = running_sim(busy_config());
        let speed = sim.agents().speed[5];
        sim.tick(Timestamp(60_000)).unwrap();
        let expected = speed * MAX_TICK_DT_MS as f64 / 30.0;
        assert!((sim.agents().progress[5] - expected).abs() < 1e-12);
    }

    #[test]
    fn time_going_backwards_is_zero_dt() {
        let mut sim = running_sim(busy_config());
        sim.tick(Timestamp(1_000)).unwrap();
        let positions = sim.agents().position.clone();
        let snap = sim.tick(Timestamp(500)).unwrap();
        assert_eq!(snap.at, Timestamp(1_000));
        assert_eq!(sim.agents().position, positions);
        assert_eq!(sim.history().last().map(|p| p.elapsed_seconds), Some(1.0));
    }

    #[test]
    fn toggle_flips_state() {
        let mut sim = SimBuilder::new(busy_config()).build(Timestamp(0)).unwrap();
        assert!(sim.toggle(Timestamp(5)));
        assert!(sim.is_running());
        assert!(!sim.toggle(Timestamp(6)));
        assert!(!sim.is_running());
    }

    #[test]
    fn history_records_elapsed_seconds() {
        let mut sim = running_sim(busy_config());
        sim.tick(Timestamp(250)).unwrap();
        sim.tick(Timestamp(1_500)).unwrap();
        let secs: Vec<f64> = sim.history().iter().map(|p| p.elapsed_seconds).collect();
        assert_eq!(secs, vec![0.0, 0.25, 1.5]);
    }
}

// ── Control surface: reset and radius ────────────────────────────────────────

#[cfg(test)]
mod control {
    use super::*;

    #[test]
    fn reset_restores_initial_conditions() {
        let mut sim = running_sim(busy_config());
        run_frames(&mut sim, 0, 400);
        assert!(sim.stats().infected > 1, "busy config should spread");
        sim.reset(Timestamp(90_000)).unwrap();
        assert_fresh_run(&sim, 150);
        assert_eq!(sim.started_at(), Timestamp(90_000));
        assert_eq!(sim.agents().infected_at(AgentId(0)), Some(Timestamp(90_000)));
    }

    #[test]
    fn reset_leaves_running_state() {
        let mut running = running_sim(busy_config());
        running.reset(Timestamp(10)).unwrap();
        assert!(running.is_running());

        let mut paused = SimBuilder::new(busy_config()).build(Timestamp(0)).unwrap();
        paused.reset(Timestamp(10)).unwrap();
        assert!(!paused.is_running());
    }

    #[test]
    fn reset_draws_a_new_but_reproducible_run() {
        let mut a = running_sim(busy_config());
        let mut b = running_sim(busy_config());
        let first = a.agents().position.clone();
        a.reset(Timestamp(0)).unwrap();
        b.reset(Timestamp(0)).unwrap();
        assert_ne!(a.run_seed(), 0);
        assert_eq!(a.run_seed(), b.run_seed());
        assert_eq!(a.agents().position, b.agents().position);
        assert_ne!(a.agents().position[1..], first[1..]);
    }

    #[test]
    fn reset_with_new_population_and_bounds() {
        let mut sim = running_sim(busy_config());
        let bounds = RegionBounds::new(0.0, 10.0, 0.0, 5.0).unwrap();
        sim.reset_with(40, bounds, Timestamp(0)).unwrap();
        assert_fresh_run(&sim, 40);
        assert_eq!(sim.config().bounds, bounds);
        for snap in run_frames(&mut sim, 0, 200) {
            assert!(snap.agents.iter().all(|a| bounds.contains(a.position)));
        }
    }

    #[test]
    fn reset_with_moves_pinned_patient_zero() {
        let mut sim = running_sim(reference_config());
        let bounds = RegionBounds::new(10.0, 20.0, 10.0, 20.0).unwrap();
        sim.reset_with(200, bounds, Timestamp(100)).unwrap();
        assert_fresh_run(&sim, 200);
        assert_eq!(sim.config().patient_zero_position, Some(bounds.center()));
        assert_eq!(sim.agents().position[0], Point::new(15.0, 15.0));

        let corner = ContagionConfig {
            patient_zero_position: Some(Point::new(0.0, 1.0)),
            ..reference_config()
        };
        let mut sim = running_sim(corner);
        let bounds = RegionBounds::new(-3.0, 1.0, 2.0, 4.0).unwrap();
        sim.reset_with(50, bounds, Timestamp(0)).unwrap();
        assert_eq!(sim.agents().position[0], Point::new(-3.0, 4.0));
    }

    #[test]
    fn reset_with_invalid_input_keeps_current_run() {
        let mut sim = running_sim(busy_config());
        run_frames(&mut sim, 0, 5);
        let before = sim.snapshot();
        let result = sim.reset_with(0, RegionBounds::unit_square(), Timestamp(999));
        assert!(matches!(result, Err(SimError::Core(CtError::InvalidPopulation(0)))));
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.config().population_size, 150);
    }

    #[test]
    fn invalid_radius_rejected_not_clamped() {
        let mut sim = running_sim(busy_config());
        for r in [0.0, -0.01, f64::NAN] {
            assert!(matches!(
                sim.set_infection_radius(r),
                Err(SimError::Core(CtError::InvalidRadius(_)))
            ));
        }
        assert_eq!(sim.infection_radius(), 0.08);
        sim.set_infection_radius(0.01).unwrap();
        assert_eq!(sim.infection_radius(), 0.01);
    }

    #[test]
    fn huge_radius_infects_everyone_next_tick() {
        let mut sim = running_sim(busy_config());
        sim.set_infection_radius(10.0).unwrap();
        let snap = sim.tick(Timestamp(FRAME_MS)).unwrap();
        assert_eq!(snap.stats.infected, 150);
        assert_eq!(snap.stats.rate, 100.0);
        assert_eq!(snap.connections.len(), 149);
        assert!(snap.connections.iter().all(|e| e.source == AgentId(0)));
    }
}

// ── Pipeline properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn stats_are_monotonic_and_plateau() {
        let mut sim = running_sim(reference_config());
        let mut last = sim.stats();
        for snap in run_frames(&mut sim, 0, 3_000) {
            assert!(snap.stats.infected >= last.infected);
            assert!(snap.stats.rate >= last.rate);
            assert!(snap.stats.infected <= 200);
            last = snap.stats;
        }
        let history = sim.history();
        assert!(history.windows(2).all(|w| w[1].infected_count >= w[0].infected_count));
        assert!(history.windows(2).all(|w| w[1].elapsed_seconds >= w[0].elapsed_seconds));
    }

    #[test]
    fn infection_causality_and_no_cascade() {
        let mut sim = running_sim(busy_config());
        let radius = sim.infection_radius();
        let mut prev = sim.snapshot();
        let mut saw_infection = false;

        for snap in run_frames(&mut sim, 0, 600) {
            let infected_before: HashSet<AgentId> =
                prev.agents.iter().filter(|a| a.state.is_infected()).map(|a| a.id).collect();

            for b in prev.agents.iter().filter(|a| a.state.is_susceptible()) {
                let now_b = &snap.agents[b.id.index()];
                let in_range = infected_before
                    .iter()
                    .any(|a| snap.agents[a.index()].position.distance(now_b.position) < radius);
                // In range of a tick-start source ⇔ infected this tick.
                assert_eq!(in_range, now_b.state.is_infected(), "agent {}", b.id);
                saw_infection |= in_range;
            }

            for edge in snap.connections.iter().filter(|e| e.created_at == snap.at) {
                assert!(infected_before.contains(&edge.source), "edge {} cascaded", edge.id);
                assert!(!infected_before.contains(&edge.target));
            }
            prev = snap;
        }
        assert!(saw_infection, "scenario should produce at least one transmission");
    }

    #[test]
    fn one_edge_per_new_infection() {
        let mut sim = running_sim(busy_config());
        let mut prev_infected = 1;
        for snap in run_frames(&mut sim, 0, 400) {
            let infected = snap.infected_now();
            let fresh = snap.connections.iter().filter(|e| e.created_at == snap.at).count();
            assert_eq!(fresh, infected - prev_infected);
            prev_infected = infected;
        }
    }

    #[test]
    fn edges_expire_after_ttl() {
        let mut sim = running_sim(busy_config());
        for snap in run_frames(&mut sim, 0, 600) {
            for edge in &snap.connections {
                assert!(snap.at.since(edge.created_at) < EDGE_TTL_MS);
            }
        }
    }

    #[test]
    fn edge_endpoints_are_frozen() {
        let mut sim = running_sim(busy_config());
        tick_until_first_edge(&mut sim);
        let edge = sim.ledger().iter().next().cloned().expect("an edge");
        let from = sim.last_tick_at().as_millis();
        let snap = run_frames(&mut sim, from, 20).pop().unwrap();
        let same = snap.connections.iter().find(|e| e.id == edge.id).expect("still live");
        assert_eq!(same.target_pos, edge.target_pos);
        assert_ne!(snap.agents[edge.target.index()].position, edge.target_pos);
    }

    fn tick_until_first_edge(sim: &mut Sim<BruteForceDetector>) {
        let mut t = 0;
        while sim.ledger().is_empty() {
            t += FRAME_MS;
            sim.tick(Timestamp(t));
            assert!(t < 60_000, "no transmission within a minute of sim time");
        }
    }

    #[test]
    fn patient_zero_fades_to_terminal_colour() {
        let mut sim = running_sim(reference_config());
        let snaps = run_frames(&mut sim, 0, 700); // 11.2 s
        assert_eq!(snaps.last().unwrap().agents[0].color, TERMINAL_INFECTION);
    }

    #[test]
    fn detectors_produce_identical_runs() {
        let mut brute = running_sim(busy_config());
        let mut tree = SimBuilder::new(busy_config())
            .detector(RTreeDetector)
            .autostart(true)
            .build(Timestamp(0))
            .unwrap();
        let a = run_frames(&mut brute, 0, 300);
        let b = run_frames(&mut tree, 0, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = running_sim(busy_config());
        let mut b = running_sim(busy_config());
        assert_eq!(run_frames(&mut a, 0, 200), run_frames(&mut b, 0, 200));
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observers {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:      usize,
        ends:        usize,
        transmitted: usize,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _now: Timestamp) {
            self.starts += 1;
        }
        fn on_transmissions(&mut self, _now: Timestamp, applied: &[Transmission]) {
            self.transmitted += applied.len();
        }
        fn on_tick_end(&mut self, _snapshot: &Snapshot) {
            self.ends += 1;
        }
    }

    #[test]
    fn hooks_called_once_per_running_tick() {
        let mut sim = running_sim(busy_config());
        let mut obs = Counter::default();
        for i in 1..=30 {
            sim.tick_with(Timestamp(i * FRAME_MS), &mut obs);
        }
        sim.pause();
        sim.tick_with(Timestamp(10_000), &mut obs);
        assert_eq!(obs.starts, 30);
        assert_eq!(obs.ends, 30);
        assert_eq!(obs.transmitted + 1, sim.agents().infected_count());
    }

    #[test]
    fn recorder_accumulates_latest_points() {
        let mut sim = running_sim(busy_config());
        let mut rec = HistoryRecorder::new();
        for i in 1..=25 {
            sim.tick_with(Timestamp(i * FRAME_MS), &mut rec);
        }
        assert_eq!(rec.len(), 25);
        assert_eq!(rec.points().copied().collect::<Vec<_>>(), sim.history()[1..]);
    }

    #[test]
    fn recorder_capacity_drops_oldest() {
        let mut sim = running_sim(busy_config());
        let mut rec = HistoryRecorder::with_capacity(10);
        for i in 1..=25 {
            sim.tick_with(Timestamp(i * FRAME_MS), &mut rec);
        }
        assert_eq!(rec.len(), 10);
        assert_eq!(rec.last(), sim.history().last());
        assert_eq!(rec.points().next(), sim.history().get(16));
        rec.clear();
        assert!(rec.is_empty());
    }
}

// ── Randomised properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod randomised {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn monotonic_and_contained_under_any_cadence(
            seed in any::<u64>(),
            radius in 0.005f64..0.1,
            frames in proptest::collection::vec(0u64..2_500, 1..150),
        ) {
            let bounds = RegionBounds::new(-1.0, 1.0, 0.0, 0.5).unwrap();
            let config = ContagionConfig {
                population_size: 80,
                bounds,
                infection_radius: radius,
                seed,
                patient_zero_position: None,
            };
            let mut sim = SimBuilder::new(config).autostart(true).build(Timestamp(0)).unwrap();
            let mut now = 0;
            let mut last = sim.stats();
            for dt in frames {
                now += dt;
                let snap = sim.tick(Timestamp(now)).unwrap();
                prop_assert!(snap.stats.infected >= last.infected);
                prop_assert!(snap.stats.rate >= last.rate);
                prop_assert!(snap.agents.iter().all(|a| bounds.contains(a.position)));
                prop_assert!(snap.connections.iter().all(|e| now - e.created_at.as_millis() < EDGE_TTL_MS));
                last = snap.stats;
            }
        }
    }
}
