//! Turns frames of continuous sensor state into discrete engine events.

use crate::config::{HitMode, KeyChangeTrigger, ReducerConfig};
use crate::dual_stream::Frame;
use crate::engine_event::{EngineEvent, Side, SwipeDirection};
use crate::telemetry::{BoardEvent, Parameter, Report, ReportError, N_LIDAR};

/// Keys on the circle of fifths.
const N_KEYS: u8 = 12;

/// A fifth, in semitones.
const FIFTH: u8 = 7;

/// Every value of a frame the reducer reads, pulled out before any state is
/// touched so that a broken frame leaves the reducer as it was.
struct Sample {
    engaged: bool,
    dists: [f64; 2 * N_LIDAR],
    elevations: (f64, f64),
    pitches: (f64, f64),
    rolls: (f64, f64),
}

/// Reduces left/right [Frame]s into [EngineEvent]s. Holds the state needed
/// for edge detection: the current key, whether anything was engaged last
/// frame, and the previous distances.
#[derive(Debug, Clone)]
pub struct EventReducer {
    config: ReducerConfig,
    cof: u8,
    were_engaged: bool,
    last_dists: [f64; 2 * N_LIDAR],
}

impl EventReducer {
    /// A reducer in key 0 with nothing engaged.
    pub fn new(config: ReducerConfig) -> Self {
        let last_dists = [config.dist_max; 2 * N_LIDAR];
        Self {
            config,
            cof: 0,
            were_engaged: false,
            last_dists,
        }
    }

    /// The current key on the circle of fifths.
    pub fn key(&self) -> u8 {
        self.cof
    }

    /// Produce the events for one frame, in order: key change (if any),
    /// board sample, elevations, pitches, rolls, then hits and swipes.
    pub fn reduce(&mut self, frame: &Frame) -> Result<Vec<EngineEvent>, ReportError> {
        let sample = self.sample(frame)?;
        let mut events = Vec::new();

        if sample.engaged && !self.were_engaged {
            self.cof = (self.cof + FIFTH) % N_KEYS;
            events.push(EngineEvent::KeyChange(self.cof));
        }
        self.were_engaged = sample.engaged;

        events.push(EngineEvent::BoardSample(sample.dists));
        events.push(EngineEvent::Elevations(
            sample.elevations.0,
            sample.elevations.1,
        ));
        events.push(EngineEvent::Pitches(sample.pitches.0, sample.pitches.1));
        events.push(EngineEvent::Rolls(sample.rolls.0, sample.rolls.1));

        match self.config.hit_mode {
            HitMode::Events => {
                for side in [Side::Left, Side::Right] {
                    events.extend(
                        frame
                            .events(side)
                            .iter()
                            .map(|&e| self.board_event(side, e)),
                    );
                }
            }
            HitMode::Velocity => {
                for side in [Side::Left, Side::Right] {
                    events.extend(
                        frame
                            .events(side)
                            .iter()
                            .filter(|e| !matches!(e, BoardEvent::Hit(_)))
                            .map(|&e| self.board_event(side, e)),
                    );
                }
                events.extend(self.velocity_hits(&sample.dists));
            }
        }
        self.last_dists = sample.dists;

        Ok(events)
    }

    fn sample(&self, frame: &Frame) -> Result<Sample, ReportError> {
        let (left, right) = (&frame.left, &frame.right);
        let config = &self.config;

        let engaged = match config.key_change {
            KeyChangeTrigger::AnyLidar => {
                let mut any = false;
                for report in [left, right] {
                    for i in 0..N_LIDAR {
                        any |= report.require_lidar(i)?.en;
                    }
                }
                any
            }
            KeyChangeTrigger::Elevation => {
                let engaged = |r: &Report| {
                    r.parameter(Parameter::Elevation)
                        .map(|c| c.en)
                        .ok_or(ReportError::MissingField("elevation"))
                };
                engaged(left)? || engaged(right)?
            }
        };

        let mut dists = [0.0; 2 * N_LIDAR];
        for i in 0..N_LIDAR {
            dists[i] = self.clip(left.require_dist(i)?);
            dists[i + N_LIDAR] = self.clip(right.require_dist(i)?);
        }

        let pair = |p: Parameter, f: &dyn Fn(f64) -> f64| -> Result<(f64, f64), ReportError> {
            Ok((
                f(left.require_val(p)?),
                f(right.require_val(p)?),
            ))
        };
        let elevation_scale = config.elevation_scale;
        let angle_scale = config.angle_scale;

        Ok(Sample {
            engaged,
            dists,
            elevations: pair(Parameter::Elevation, &|v: f64| (1.0 - v) * elevation_scale)?,
            pitches: pair(Parameter::Pitch, &|v: f64| v * angle_scale)?,
            rolls: pair(Parameter::Roll, &|v: f64| v * angle_scale)?,
        })
    }

    fn clip(&self, dist: f64) -> f64 {
        dist.max(0.0).min(self.config.dist_max)
    }

    fn scale(&self, side: Side) -> &[u8; 4] {
        match side {
            Side::Left => &self.config.scale_left,
            Side::Right => &self.config.scale_right,
        }
    }

    fn board_event(&self, side: Side, event: BoardEvent) -> EngineEvent {
        match event {
            BoardEvent::Hit(i) => EngineEvent::Hit {
                side,
                note: self.scale(side)[i],
                velocity: self.config.hit_velocity,
            },
            BoardEvent::SwipeLeft => EngineEvent::Swipe {
                side,
                direction: SwipeDirection::Left,
            },
            BoardEvent::SwipeRight => EngineEvent::Swipe {
                side,
                direction: SwipeDirection::Right,
            },
        }
    }

    /// A hand coming down fast over a channel shows up as a large drop in
    /// distance between two frames.
    fn velocity_hits(&self, dists: &[f64; 2 * N_LIDAR]) -> Vec<EngineEvent> {
        self.last_dists
            .iter()
            .zip(dists)
            .enumerate()
            .filter_map(|(i, (last, now))| {
                let diff = last - now;
                if diff <= self.config.diff_threshold {
                    return None;
                }
                let (side, channel) = if i < N_LIDAR {
                    (Side::Left, i)
                } else {
                    (Side::Right, i - N_LIDAR)
                };
                Some(EngineEvent::Hit {
                    side,
                    note: self.scale(side)[channel],
                    velocity: diff / self.config.velocity_divisor,
                })
            })
            .collect()
    }
}

impl Default for EventReducer {
    fn default() -> Self {
        Self::new(ReducerConfig::default())
    }
}
