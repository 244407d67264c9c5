//! Stage progression and the day-night clock
//!
//! `Playing -> Exhausted -> Victory`, never backwards. The course is over once
//! the runner has covered the course length plus a short victory lap; the
//! victory pose follows after a fixed number of frames.

use super::stage::StageConfig;
use super::state::{GameState, StageStatus};
use crate::consts::*;
use crate::lerp;

/// Fraction of the course covered, clamped to `[0, 1]`
pub fn stage_progress(distance: f32, course_length: f32) -> f32 {
    if course_length <= 0.0 {
        return 1.0;
    }
    (distance / course_length).clamp(0.0, 1.0)
}

/// Hour of the day for a given stage progress.
///
/// Daylight runs from `START_HOUR` to `DUSK_HOUR` over `[0, dusk_start)`, then
/// the night runs from dusk through midnight to `DAWN_HOUR` at the finish.
pub fn time_of_day(progress: f32, dusk_start: f32) -> f32 {
    let dusk = dusk_start.clamp(0.0, 1.0);
    if progress < dusk {
        return lerp(START_HOUR, DUSK_HOUR, progress / dusk);
    }
    let span = 1.0 - dusk;
    let t = if span > 0.0 {
        ((progress - dusk) / span).min(1.0)
    } else {
        1.0
    };
    lerp(DUSK_HOUR, DAWN_HOUR + DAY_LENGTH_HOURS, t).rem_euclid(DAY_LENGTH_HOURS)
}

/// Refresh progress/clock and step the stage status machine.
///
/// Returns the status entered this frame, if any.
pub fn update_stage(state: &mut GameState, stage: &StageConfig) -> Option<StageStatus> {
    state.stage_progress = stage_progress(state.distance, stage.course_length);
    state.time_of_day = time_of_day(state.stage_progress, state.tuning.dusk_start);

    match state.stage_status {
        StageStatus::Playing => {
            // A run that ended never clears the course
            if !state.game_over
                && state.distance >= stage.course_length + state.tuning.victory_overshoot
            {
                state.stage_status = StageStatus::Exhausted;
                state.exhausted_frames = 0;
                log::info!(
                    "Stage '{}' cleared at distance {:.0} (score {})",
                    stage.id,
                    state.distance,
                    state.score
                );
                return Some(StageStatus::Exhausted);
            }
        }
        StageStatus::Exhausted => {
            state.exhausted_frames += 1;
            if state.exhausted_frames >= state.tuning.victory_delay_frames {
                state.stage_status = StageStatus::Victory;
                log::info!("Victory on '{}'", stage.id);
                return Some(StageStatus::Victory);
            }
        }
        StageStatus::Victory => {}
    }
    None
}
