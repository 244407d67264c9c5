//! Stage catalog
//!
//! Static per-stage tunables plus the timed visual events presentation uses
//! for sky and celestial animation. The core reads only the difficulty block
//! and the course length.

use serde::{Deserialize, Serialize};

use super::state::HazardKind;
use crate::consts::FRAME_RATE;

pub const DEFAULT_STAGE_ID: &str = "stage_1_city";

/// Trigger end value meaning "until the end of the course"
pub const UNTIL_COURSE_END: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    City,
    Beach,
    Mountains,
    CityVictory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub ground_color: String,
    /// Top, mid, bottom
    pub sky_colors: [String; 3],
    pub sun_color: String,
    pub moon_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// World scroll per frame
    pub base_speed: f32,
    /// Approximate milliseconds between hazards
    pub spawn_interval_ms: f32,
    /// Kinds the spawner may produce; the first seeds every run
    pub allowed_kinds: Vec<HazardKind>,
    /// Paired spawns permitted
    pub double_spawn: bool,
}

/// Distance window of a timeline event. Negative values count back from the
/// course end, except an `end` of exactly `-1` which means the course end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub start: f32,
    pub end: f32,
}

impl Trigger {
    /// Absolute `(start, end)` distances on a course of the given length
    pub fn resolve(&self, course_length: f32) -> (f32, f32) {
        let start = if self.start >= 0.0 {
            self.start
        } else {
            course_length + self.start
        };
        let end = if self.end == UNTIL_COURSE_END {
            course_length
        } else if self.end >= 0.0 {
            self.end
        } else {
            course_length + self.end
        };
        (
            start.clamp(0.0, course_length.max(0.0)),
            end.clamp(0.0, course_length.max(0.0)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEffect {
    SkyGradient {
        from: [String; 3],
        to: [String; 3],
    },
    CelestialSun {
        from_y: f32,
        to_y: f32,
        from_color: String,
        to_color: String,
    },
    CelestialMoon {
        from_y: f32,
        to_y: f32,
        opacity: f32,
    },
    NightLights {
        from_opacity: f32,
        to_opacity: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub trigger: Trigger,
    pub effect: TimelineEffect,
}

impl TimelineEvent {
    /// Interpolation factor in `[0, 1]` if the event is active at `distance`
    pub fn progress_at(&self, distance: f32, course_length: f32) -> Option<f32> {
        let (start, end) = self.trigger.resolve(course_length);
        if distance < start || distance > end {
            return None;
        }
        let span = end - start;
        Some(if span > 0.0 {
            (distance - start) / span
        } else {
            1.0
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub theme: Theme,
    pub background: BackgroundKind,
    pub music_track: String,
    pub difficulty: Difficulty,
    /// Distance required to clear the stage
    pub course_length: f32,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl StageConfig {
    /// Nominal horizontal gap between hazards at this stage's pace
    pub fn nominal_gap(&self) -> f32 {
        self.difficulty.base_speed * FRAME_RATE * (self.difficulty.spawn_interval_ms / 1000.0)
    }

    pub fn allows(&self, kind: HazardKind) -> bool {
        self.difficulty.allowed_kinds.contains(&kind)
    }

    /// Timeline events active at `distance`, with their interpolation factor
    pub fn active_events(&self, distance: f32) -> impl Iterator<Item = (&TimelineEvent, f32)> {
        self.timeline.iter().filter_map(move |event| {
            event
                .progress_at(distance, self.course_length)
                .map(|t| (event, t))
        })
    }
}

/// Ordered list of stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCatalog {
    pub stages: Vec<StageConfig>,
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StageCatalog {
    /// Parse a catalog. A catalog without stages is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.stages.is_empty() {
            return Err(serde::de::Error::custom("stage catalog has no stages"));
        }
        log::info!("Loaded stage catalog ({} stages)", catalog.stages.len());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&StageConfig> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Stage by id, or the first stage if unknown. `None` only for an empty catalog.
    pub fn get_or_first(&self, id: &str) -> Option<&StageConfig> {
        self.get(id).or_else(|| {
            let first = self.stages.first()?;
            log::warn!("Unknown stage '{}', using '{}'", id, first.id);
            Some(first)
        })
    }

    /// Stage following `id` in catalog order
    pub fn next_after(&self, id: &str) -> Option<&StageConfig> {
        let idx = self.stages.iter().position(|s| s.id == id)?;
        self.stages.get(idx + 1)
    }

    /// The four shipped stages
    pub fn builtin() -> Self {
        use HazardKind::*;

        let strings = |a: &str, b: &str, c: &str| [a.to_string(), b.to_string(), c.to_string()];

        let stages = vec![
            StageConfig {
                id: DEFAULT_STAGE_ID.to_string(),
                name: "NEON CITY".to_string(),
                description: "Survive the urban night run.".to_string(),
                theme: Theme {
                    ground_color: "#ff00cc".to_string(),
                    sky_colors: strings("#0f0c29", "#302b63", "#24243e"),
                    sun_color: "#FDB813".to_string(),
                    moon_color: "#FEFCD7".to_string(),
                },
                background: BackgroundKind::City,
                music_track: "neon_city".to_string(),
                difficulty: Difficulty {
                    base_speed: 5.0,
                    spawn_interval_ms: 1500.0,
                    allowed_kinds: vec![Standard, Light, Heart],
                    double_spawn: false,
                },
                course_length: 50_000.0,
                timeline: vec![
                    TimelineEvent {
                        trigger: Trigger {
                            start: 0.0,
                            end: 25_000.0,
                        },
                        effect: TimelineEffect::CelestialSun {
                            from_y: 60.0,
                            to_y: 320.0,
                            from_color: "#FDB813".to_string(),
                            to_color: "#ff4e50".to_string(),
                        },
                    },
                    TimelineEvent {
                        trigger: Trigger {
                            start: 20_000.0,
                            end: 30_000.0,
                        },
                        effect: TimelineEffect::SkyGradient {
                            from: strings("#2b5876", "#4e4376", "#ff9966"),
                            to: strings("#0f0c29", "#302b63", "#24243e"),
                        },
                    },
                    TimelineEvent {
                        trigger: Trigger {
                            start: 25_000.0,
                            end: UNTIL_COURSE_END,
                        },
                        effect: TimelineEffect::CelestialMoon {
                            from_y: 320.0,
                            to_y: 50.0,
                            opacity: 1.0,
                        },
                    },
                    TimelineEvent {
                        trigger: Trigger {
                            start: 25_000.0,
                            end: -10_000.0,
                        },
                        effect: TimelineEffect::NightLights {
                            from_opacity: 0.0,
                            to_opacity: 1.0,
                        },
                    },
                ],
            },
            StageConfig {
                id: "stage_2_beach".to_string(),
                name: "SYNTHWAVE BEACH".to_string(),
                description: "Dodge obstacles on the retro coast.".to_string(),
                theme: Theme {
                    ground_color: "#00ffff".to_string(),
                    sky_colors: strings("#1a2a6c", "#b21f1f", "#fdbb2d"),
                    sun_color: "#ffdd55".to_string(),
                    moon_color: "#ffffff".to_string(),
                },
                background: BackgroundKind::Beach,
                music_track: "synthwave_beach".to_string(),
                difficulty: Difficulty {
                    base_speed: 6.0,
                    spawn_interval_ms: 1300.0,
                    allowed_kinds: vec![Standard, Light, Heavy, Heart],
                    double_spawn: true,
                },
                course_length: 30_000.0,
                timeline: vec![TimelineEvent {
                    trigger: Trigger {
                        start: -8_000.0,
                        end: UNTIL_COURSE_END,
                    },
                    effect: TimelineEffect::SkyGradient {
                        from: strings("#1a2a6c", "#b21f1f", "#fdbb2d"),
                        to: strings("#000428", "#004e92", "#1a2a6c"),
                    },
                }],
            },
            StageConfig {
                id: "stage_3_landscape".to_string(),
                name: "DIGITAL PEAKS".to_string(),
                description: "Navigate the wireframe mountains.".to_string(),
                theme: Theme {
                    ground_color: "#00ff00".to_string(),
                    sky_colors: strings("#000000", "#0f9b0f", "#000000"),
                    sun_color: "#00ff00".to_string(),
                    moon_color: "#ccffcc".to_string(),
                },
                background: BackgroundKind::Mountains,
                music_track: "digital_peaks".to_string(),
                difficulty: Difficulty {
                    base_speed: 7.0,
                    spawn_interval_ms: 1100.0,
                    allowed_kinds: vec![Standard, Heavy, Boulder, Heart],
                    double_spawn: true,
                },
                course_length: 40_000.0,
                timeline: Vec::new(),
            },
            StageConfig {
                id: "stage_4_victory".to_string(),
                name: "VICTORY LAP".to_string(),
                description: "The final sprint to glory.".to_string(),
                theme: Theme {
                    ground_color: "#ffd700".to_string(),
                    sky_colors: strings("#4b6cb7", "#182848", "#FFD700"),
                    sun_color: "#ffffff".to_string(),
                    moon_color: "#ffffff".to_string(),
                },
                background: BackgroundKind::CityVictory,
                music_track: "victory_lap".to_string(),
                difficulty: Difficulty {
                    base_speed: 8.0,
                    spawn_interval_ms: 900.0,
                    allowed_kinds: vec![Standard, Light, Heavy, Boulder, Heart],
                    double_spawn: true,
                },
                course_length: 50_000.0,
                timeline: Vec::new(),
            },
        ];

        Self { stages }
    }
}
