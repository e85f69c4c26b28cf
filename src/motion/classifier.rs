//! Threshold classifier.
//!
//! Rules are evaluated in priority order and the first match wins:
//!
//! | # | Condition                                   | State    |
//! |---|---------------------------------------------|----------|
//! | 1 | \|z\| < 11 and \|y\| < 2 and \|x\| < 2      | Sleep    |
//! | 2 | (\|x\| > 2 or \|y\| > 2) and \|pitch\| < 70 | Wander   |
//! | 3 | \|pitch\| >= 70                             | Moonwalk |
//! | 4 | otherwise                                   | Sleep    |

use super::MotionState;

/// Upper bound on |z| (m/s²) for a resting collar.
pub const REST_Z_LIMIT: f32 = 11.0;
/// Lateral acceleration (m/s²) separating rest from movement.
pub const LATERAL_LIMIT: f32 = 2.0;
/// Pitch magnitude (degrees) at which the cat counts as upright.
pub const UPRIGHT_PITCH_DEG: f32 = 70.0;

/// Map one averaged sample to a state. Roll is accepted for completeness
/// but does not take part in any rule.
pub fn classify(_roll: f32, pitch: f32, x: f32, y: f32, z: f32) -> MotionState {
    let (ax, ay, az, ap) = (x.abs(), y.abs(), z.abs(), pitch.abs());

    if az < REST_Z_LIMIT && ay < LATERAL_LIMIT && ax < LATERAL_LIMIT {
        MotionState::Sleep
    } else if (ax > LATERAL_LIMIT || ay > LATERAL_LIMIT) && ap < UPRIGHT_PITCH_DEG {
        MotionState::Wander
    } else if ap >= UPRIGHT_PITCH_DEG {
        MotionState::Moonwalk
    } else {
        // NaN inputs land here too.
        MotionState::Sleep
    }
}
