//! Angular shadow sampling.
//!
//! Every frame the full circle around the light is swept with evenly spaced
//! rays. For each ray the occluder with the smallest exit parameter blocks
//! it, and a long shadow segment starts at that exit point. Nothing is
//! cached between frames.

use crate::math::{ray_circle_intersect, Vec2};
use crate::scene::Scene;
use crate::state::RenderConfig;
use std::f64::consts::TAU;

/// Exit parameters at or below this are treated as the ray grazing an
/// occluder that surrounds or touches the light, and are ignored.
pub const SELF_HIT_EPSILON: f64 = 1e-4;
/// Hit points closer than this to the light are skipped; at sub-pixel range
/// the segment direction is noise.
pub const DEGENERATE_HIT_DISTANCE: f64 = 1.5;
/// How far a shadow extends beyond the occluder
pub const SHADOW_LENGTH: f64 = 2000.0;
/// Length of a debug ray that hits nothing
pub const FREE_RAY_LENGTH: f64 = 1200.0;
/// Drawn width of a shadow segment, in world units
pub const SHADOW_THICKNESS: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Blocked region behind an occluder
    Shadow,
    /// Debug ray from the light to an occluder's exit point
    BlockedRay,
    /// Debug ray that reached no occluder
    FreeRay,
}

/// A line to draw, in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: Vec2,
    pub end: Vec2,
}

/// Picks the occluder blocking the ray from `origin` along `direction`.
///
/// Returns the occluder index and its exit parameter. The occluder with the
/// smallest exit parameter wins, which for overlapping disks is not always
/// the one entered first.
pub fn nearest_blocker(scene: &Scene, origin: Vec2, direction: Vec2) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, occluder) in scene.occluders().iter().enumerate() {
        let Some((_, t_far)) =
            ray_circle_intersect(origin, direction, occluder.center, occluder.radius())
        else {
            continue;
        };
        if t_far <= SELF_HIT_EPSILON {
            continue;
        }
        if best.map_or(true, |(_, t)| t_far < t) {
            best = Some((index, t_far));
        }
    }
    best
}

/// Computes the shadow and debug-ray segments for one frame
pub fn cast_shadows(scene: &Scene, config: &RenderConfig) -> Vec<Segment> {
    let samples = config.samples();
    let light = scene.light;
    let mut segments = Vec::with_capacity(if config.show_rays { samples * 2 } else { samples });

    for s in 0..samples {
        let angle = s as f64 / samples as f64 * TAU;
        let direction = Vec2::from_angle(angle);

        match nearest_blocker(scene, light, direction) {
            Some((_, t_far)) => {
                let hit = light + direction * t_far;
                if (hit - light).length() < DEGENERATE_HIT_DISTANCE {
                    continue;
                }
                segments.push(Segment {
                    kind: SegmentKind::Shadow,
                    start: hit,
                    end: hit + direction * SHADOW_LENGTH,
                });
                if config.show_rays {
                    segments.push(Segment {
                        kind: SegmentKind::BlockedRay,
                        start: light,
                        end: hit,
                    });
                }
            }
            None => {
                if config.show_rays {
                    segments.push(Segment {
                        kind: SegmentKind::FreeRay,
                        start: light,
                        end: light + direction * FREE_RAY_LENGTH,
                    });
                }
            }
        }
    }

    segments
}
