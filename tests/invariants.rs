//! Property tests: run random input sequences and check the run invariants
//! after every frame.

use std::collections::HashSet;

use proptest::prelude::*;
use stickman_runner::consts::MAX_ENERGY;
use stickman_runner::sim::{
    GameState, Simulation, StageCatalog, StageStatus, advance_physics, request_jump,
    resolve_collisions,
};
use stickman_runner::Tuning;

fn stage_ids() -> impl Strategy<Value = String> {
    prop::sample::select(
        StageCatalog::builtin()
            .stages
            .into_iter()
            .map(|s| s.id)
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn run_invariants_hold(
        seed in any::<u64>(),
        stage_id in stage_ids(),
        jumps in prop::collection::vec(any::<bool>(), 200..1200),
    ) {
        let mut sim = Simulation::with_config(seed, StageCatalog::builtin(), &stage_id, Tuning::default());
        sim.start();

        let mut seen_ids = HashSet::new();
        let mut was_over = false;
        let mut last_distance = 0.0f32;
        let mut last_status = StageStatus::Playing;

        for jump in jumps {
            if jump {
                sim.request_jump();
            }
            sim.advance_frame();
            let state = sim.state();

            prop_assert!(state.player.health >= 0 && state.player.health <= state.player.max_health);
            prop_assert!(state.energy >= 0.0 && state.energy <= MAX_ENERGY);
            prop_assert!(state.player.jump_count <= 2);
            if state.player.grounded {
                prop_assert_eq!(state.player.jump_count, 0);
            } else {
                prop_assert!(matches!(state.player.jump_count, 1 | 2));
            }
            if state.player.health == 0 {
                prop_assert!(state.game_over);
            }
            if was_over {
                prop_assert!(state.game_over);
            }
            was_over = state.game_over;

            // Scroll only moves while the stage was still running at frame start
            if last_status == StageStatus::Playing {
                prop_assert!(state.distance >= last_distance);
            } else {
                prop_assert_eq!(state.distance, last_distance);
            }
            last_distance = state.distance;
            last_status = state.stage_status;

            prop_assert!(state.hazards.len() <= state.tuning.max_hazards);
            let mut frame_ids = HashSet::new();
            for hazard in &state.hazards {
                prop_assert!(frame_ids.insert(hazard.id), "duplicate live id {}", hazard.id);
                seen_ids.insert(hazard.id);
            }
        }
        // ids are handed out densely from zero and never reused
        prop_assert!(seen_ids.iter().all(|id| *id < sim.state().spawner.peek()));
    }

    #[test]
    fn physics_and_collisions_are_deterministic(seed in any::<u64>(), frames in 1usize..400) {
        let mut a = GameState::new(seed, "stage_3_landscape");
        a.game_started = true;
        let catalog = StageCatalog::builtin();
        let stage = catalog.get("stage_3_landscape").cloned().unwrap();
        for _ in 0..frames {
            stickman_runner::sim::spawn_obstacle(&mut a, &stage);
            advance_physics(&mut a, stage.difficulty.base_speed);
        }
        request_jump(&mut a);

        let mut b = a.clone();
        for _ in 0..60 {
            advance_physics(&mut a, stage.difficulty.base_speed);
            let hit_a = resolve_collisions(&mut a);
            advance_physics(&mut b, stage.difficulty.base_speed);
            let hit_b = resolve_collisions(&mut b);
            prop_assert_eq!(hit_a, hit_b);
        }
        prop_assert_eq!(&a.player, &b.player);
        prop_assert_eq!(&a.hazards, &b.hazards);
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.energy.to_bits(), b.energy.to_bits());
        prop_assert_eq!(a.particles.as_slice(), b.particles.as_slice());
    }

    #[test]
    fn energy_gate_rejects_air_jump(energy in 0.0f32..100.0) {
        let mut state = GameState::new(1, "stage_1_city");
        request_jump(&mut state);
        advance_physics(&mut state, 5.0);
        state.energy = energy;
        let before = (state.player.dy, state.player.jump_count, state.energy);

        prop_assert!(!request_jump(&mut state).jumped());
        prop_assert_eq!(before, (state.player.dy, state.player.jump_count, state.energy));
    }
}
