#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure interception predictor for straight-line targets.
//!
//! Models an opponent as moving at constant speed along its last observed
//! heading and solves for the time at which a projectile fired now from our
//! position arrives at the opponent's extrapolated position. The solution is
//! closed-form: scaling the opponent's relative position and velocity by the
//! projectile speed turns the meeting condition into a quadratic in the
//! reciprocal of the interception time.

use border_sentry_core::{ArenaSize, ContactSnapshot, Position, HALF_BOT_SIZE};

/// Contacts closer than this are treated as co-located with the shooter.
const CONTACT_EPSILON: f64 = 1e-9;

/// Aim point resolved for one opponent on one turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictedAim {
    /// Point the gun should converge on, clamped to the arena interior.
    pub position: Position,
    /// True when the point is a solved intercept; false when the predictor
    /// fell back to the opponent's last observed position.
    pub intercept: bool,
}

/// Solves for the interception point against a straight-line target.
///
/// Returns `None` when no interception time exists: a negative discriminant,
/// or candidate times that degenerate to non-finite values. Callers are
/// expected to fall back to the opponent's last observed position.
///
/// When both candidate times are non-negative the smaller one wins; when
/// both are negative the larger is used anyway. That mirrors the calibrated
/// behavior this predictor reproduces and is not claimed to be optimal for
/// every geometry.
#[must_use]
pub fn intercept_position(
    own: Position,
    contact: &ContactSnapshot,
    projectile_speed: f64,
) -> Option<Position> {
    if own.distance_to(contact.position) < CONTACT_EPSILON {
        return Some(contact.position);
    }

    let heading = contact.heading.to_radians();

    // Relative position and velocity, both scaled by the projectile speed.
    let rel_x = (contact.position.x - own.x) / projectile_speed;
    let rel_y = (contact.position.y - own.y) / projectile_speed;
    let vel_x = contact.speed / projectile_speed * heading.sin();
    let vel_y = contact.speed / projectile_speed * heading.cos();

    // Quadratic in 1/t: a*(1/t)^2 + b*(1/t) + c = 0.
    let a = rel_x * rel_x + rel_y * rel_y;
    let b = 2.0 * (rel_x * vel_x + rel_y * vel_y);
    let c = vel_x * vel_x + vel_y * vel_y - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t1 = 2.0 * a / (-b - root);
    let t2 = 2.0 * a / (-b + root);

    let earlier = t1.min(t2);
    let later = t1.max(t2);
    let time = if earlier >= 0.0 { earlier } else { later };
    if !time.is_finite() {
        return None;
    }

    Some(
        contact
            .position
            .offset_along(contact.heading, contact.speed * time),
    )
}

/// Resolves the aim point for an opponent, falling back to its last observed
/// position when no interception exists, and clamps the result so it never
/// lies inside a wall.
#[must_use]
pub fn predict(
    own: Position,
    contact: &ContactSnapshot,
    projectile_speed: f64,
    arena: ArenaSize,
) -> PredictedAim {
    match intercept_position(own, contact, projectile_speed) {
        Some(raw) => PredictedAim {
            position: arena.clamp_to_interior(raw, HALF_BOT_SIZE),
            intercept: true,
        },
        None => PredictedAim {
            position: arena.clamp_to_interior(contact.position, HALF_BOT_SIZE),
            intercept: false,
        },
    }
}
