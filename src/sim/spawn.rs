//! Procedural hazard spawning
//!
//! Spacing comes from the stage's pace: the nominal gap is the distance the
//! world scrolls during one spawn interval. Hazards appear once the newest one
//! has cleared a minimum gap, either by chance or because it passed the
//! maximum gap.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::stage::StageConfig;
use super::state::{GameState, Hazard, HazardKind};
use crate::consts::*;

/// Lower edge of the spacing band relative to the nominal gap
const MIN_GAP_FACTOR: f32 = 0.8;
/// Upper edge of the spacing band relative to the nominal gap
const MAX_GAP_FACTOR: f32 = 1.2;

/// Hazard id allocator. Ids are never reused until [`Spawner::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    next_id: u32,
}

impl Spawner {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Id the next hazard will receive
    pub fn peek(&self) -> u32 {
        self.next_id
    }

    pub fn reset(&mut self) {
        self.next_id = 0;
    }
}

/// Reset the hazard id counter of a run
pub fn reset_spawner(state: &mut GameState) {
    state.spawner.reset();
}

/// Append zero, one or two hazards according to the stage's pacing rules
pub fn spawn_obstacle(state: &mut GameState, stage: &StageConfig) {
    let gap = stage.nominal_gap();
    let min_gap = gap * MIN_GAP_FACTOR;
    let max_gap = gap * MAX_GAP_FACTOR;

    let Some(last_x) = state.hazards.last().map(|h| h.x) else {
        let kind = stage
            .difficulty
            .allowed_kinds
            .first()
            .copied()
            .unwrap_or(HazardKind::Standard);
        push_hazard(state, SCREEN_WIDTH + FIRST_SPAWN_OFFSET, kind);
        return;
    };

    if last_x < SCREEN_WIDTH - min_gap {
        let forced = last_x < SCREEN_WIDTH - max_gap;
        let organic = state.rng.random::<f32>() < state.tuning.organic_spawn_chance;
        if forced || organic {
            let kind = pick_kind(state, stage);
            push_hazard(state, SCREEN_WIDTH, kind);
            try_double_spawn(state, stage);
        }
    }

    let cap = state.tuning.max_hazards;
    if state.hazards.len() > cap {
        let excess = state.hazards.len() - cap;
        state.hazards.drain(..excess);
    }
}

fn pick_kind(state: &mut GameState, stage: &StageConfig) -> HazardKind {
    if stage.allows(HazardKind::Heart) && state.rng.random::<f32>() < state.tuning.heal_chance {
        return HazardKind::Heart;
    }
    let choices: Vec<HazardKind> = stage
        .difficulty
        .allowed_kinds
        .iter()
        .copied()
        .filter(|k| *k != HazardKind::Heart)
        .collect();
    match choices.choose(&mut state.rng) {
        Some(kind) => *kind,
        // Heart-only stage
        None if stage.allows(HazardKind::Heart) => HazardKind::Heart,
        None => HazardKind::Standard,
    }
}

fn try_double_spawn(state: &mut GameState, stage: &StageConfig) {
    if !stage.difficulty.double_spawn {
        return;
    }
    if state.distance - state.last_double_spawn <= state.tuning.double_spawn_cooldown {
        return;
    }
    if state.rng.random::<f32>() >= state.tuning.double_spawn_chance {
        return;
    }
    let simple: Vec<HazardKind> = stage
        .difficulty
        .allowed_kinds
        .iter()
        .copied()
        .filter(|k| k.is_simple())
        .collect();
    let Some(&kind) = simple.choose(&mut state.rng) else {
        return;
    };

    let x = SCREEN_WIDTH + state.tuning.double_spawn_gap;
    push_hazard(state, x, kind);
    state.last_double_spawn = state.distance;
    log::debug!("Double spawn at distance {:.0}", state.distance);
}

fn push_hazard(state: &mut GameState, x: f32, kind: HazardKind) {
    let id = state.spawner.next_id();
    let mut hazard = Hazard::new(id, x, kind);
    if kind.oscillates() {
        hazard.phase = Some(state.rng.random::<f32>() * std::f32::consts::TAU);
    }
    log::debug!("Spawned {:?} #{} at x={:.0}", kind, id, x);
    state.hazards.push(hazard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::{DEFAULT_STAGE_ID, StageCatalog};

    fn stage(id: &str) -> StageConfig {
        StageCatalog::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn test_empty_list_seeds_one_hazard() {
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        let city = stage(DEFAULT_STAGE_ID);
        spawn_obstacle(&mut state, &city);

        assert_eq!(state.hazards.len(), 1);
        let first = &state.hazards[0];
        assert_eq!(first.x, SCREEN_WIDTH + FIRST_SPAWN_OFFSET);
        assert_eq!(first.kind, city.difficulty.allowed_kinds[0]);
        assert_eq!(first.id, 0);
    }

    #[test]
    fn test_no_spawn_inside_min_gap() {
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        state.tuning.organic_spawn_chance = 1.0;
        let city = stage(DEFAULT_STAGE_ID);
        state.hazards.push(Hazard::new(0, SCREEN_WIDTH - 10.0, HazardKind::Standard));
        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_forced_spawn_past_max_gap() {
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        state.tuning.organic_spawn_chance = 0.0;
        let city = stage(DEFAULT_STAGE_ID);
        let max_gap = city.nominal_gap() * MAX_GAP_FACTOR;
        state.hazards.push(Hazard::new(0, SCREEN_WIDTH - max_gap - 1.0, HazardKind::Standard));
        state.spawner.next_id();

        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 2);
        assert_eq!(state.hazards[1].x, SCREEN_WIDTH);
        assert_eq!(state.hazards[1].id, 1);
    }

    #[test]
    fn test_organic_spawn_between_gaps() {
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        let city = stage(DEFAULT_STAGE_ID);
        let between = SCREEN_WIDTH - city.nominal_gap();
        state.hazards.push(Hazard::new(0, between, HazardKind::Standard));

        state.tuning.organic_spawn_chance = 0.0;
        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 1);

        state.tuning.organic_spawn_chance = 1.0;
        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 2);
    }

    #[test]
    fn test_heart_only_when_allowed() {
        let mut state = GameState::new(5, DEFAULT_STAGE_ID);
        state.tuning.heal_chance = 1.0;
        let mut city = stage(DEFAULT_STAGE_ID);
        assert_eq!(pick_kind(&mut state, &city), HazardKind::Heart);

        city.difficulty.allowed_kinds.retain(|k| *k != HazardKind::Heart);
        for _ in 0..50 {
            assert_ne!(pick_kind(&mut state, &city), HazardKind::Heart);
        }
    }

    #[test]
    fn test_kind_mix_respects_stage() {
        let mut state = GameState::new(9, DEFAULT_STAGE_ID);
        state.tuning.heal_chance = 0.0;
        let city = stage(DEFAULT_STAGE_ID);
        let mut seen_light = false;
        for _ in 0..200 {
            let kind = pick_kind(&mut state, &city);
            assert!(matches!(kind, HazardKind::Standard | HazardKind::Light));
            seen_light |= kind == HazardKind::Light;
        }
        assert!(seen_light);
    }

    #[test]
    fn test_double_spawn_gated_by_cooldown() {
        let peaks = stage("stage_3_landscape");
        let mut state = GameState::new(3, "stage_3_landscape");
        state.tuning.double_spawn_chance = 1.0;
        state.tuning.heal_chance = 0.0;
        state.distance = state.tuning.double_spawn_cooldown / 2.0;
        state.hazards.push(Hazard::new(0, -100.0, HazardKind::Standard));

        spawn_obstacle(&mut state, &peaks);
        assert_eq!(state.hazards.len(), 2, "cooldown not yet elapsed");

        state.distance = state.tuning.double_spawn_cooldown + 1.0;
        state.hazards = vec![Hazard::new(10, -100.0, HazardKind::Standard)];
        spawn_obstacle(&mut state, &peaks);
        assert_eq!(state.hazards.len(), 3);
        let second = &state.hazards[2];
        assert!(second.kind.is_simple());
        assert!(second.phase.is_none());
        assert_eq!(second.x, SCREEN_WIDTH + state.tuning.double_spawn_gap);
        assert_eq!(state.last_double_spawn, state.distance);

        // Immediately after a pair, no chaining
        state.hazards = vec![Hazard::new(20, -100.0, HazardKind::Standard)];
        spawn_obstacle(&mut state, &peaks);
        assert_eq!(state.hazards.len(), 2);
    }

    #[test]
    fn test_no_double_spawn_when_stage_forbids() {
        let city = stage(DEFAULT_STAGE_ID);
        let mut state = GameState::new(3, DEFAULT_STAGE_ID);
        state.tuning.double_spawn_chance = 1.0;
        state.distance = 1.0e6;
        state.hazards.push(Hazard::new(0, -100.0, HazardKind::Standard));
        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 2);
    }

    #[test]
    fn test_boulders_get_a_phase() {
        let mut state = GameState::new(4, "stage_3_landscape");
        push_hazard(&mut state, 100.0, HazardKind::Boulder);
        push_hazard(&mut state, 200.0, HazardKind::Standard);
        let phase = state.hazards[0].phase.unwrap();
        assert!((0.0..std::f32::consts::TAU).contains(&phase));
        assert!(state.hazards[1].phase.is_none());
    }

    #[test]
    fn test_overflow_trims_oldest() {
        let city = stage(DEFAULT_STAGE_ID);
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        state.tuning.max_hazards = 4;
        for i in 0..4 {
            let id = state.spawner.next_id();
            state.hazards.push(Hazard::new(id, -50.0 - i as f32, HazardKind::Standard));
        }
        spawn_obstacle(&mut state, &city);
        assert_eq!(state.hazards.len(), 4);
        assert_eq!(state.hazards[0].id, 1);
        assert_eq!(state.hazards[3].id, 4);
    }

    #[test]
    fn test_ids_monotonic_and_reset() {
        let mut state = GameState::new(1, DEFAULT_STAGE_ID);
        let ids: Vec<u32> = (0..5).map(|_| state.spawner.next_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        reset_spawner(&mut state);
        assert_eq!(state.spawner.peek(), 0);
    }
}
