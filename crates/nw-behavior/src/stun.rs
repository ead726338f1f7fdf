//! Stun requests and the thrown-object gate that produces them.

use nw_core::{SimTime, Transform, Vec3};

/// Squared object speed below which its velocity says nothing about the
/// hit direction.
const MIN_VELOCITY_SQR: f32 = 1e-4;

/// Parameters for [`Enemy::apply_stun_world`][crate::Enemy::apply_stun_world].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StunRequest {
    /// World-space knockback direction.  Flattened and normalized on use.
    pub direction:         Vec3,
    pub duration_secs:     f32,
    /// Distance behind the knockback to investigate once the stun ends.
    pub redirect_distance: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StunOnHitConfig {
    /// Slower hits do not stun.
    pub min_relative_speed:  f32,
    /// Dead time after a successful stun.
    pub reuse_cooldown_secs: f32,
    /// Disarm permanently after the first stun.
    pub one_shot:            bool,
    pub stun_duration_secs:  f32,
    pub investigate_distance: f32,
    /// Prefer the object's own velocity as the knockback direction.
    pub use_object_velocity: bool,
    pub flatten_direction:   bool,
}

impl Default for StunOnHitConfig {
    fn default() -> Self {
        Self {
            min_relative_speed:   2.5,
            reuse_cooldown_secs:  0.15,
            one_shot:             false,
            stun_duration_secs:   0.6,
            investigate_distance: 9.0,
            use_object_velocity:  true,
            flatten_direction:    true,
        }
    }
}

/// A collision between a throwable and an enemy, as reported by physics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImpactHit {
    pub relative_velocity: Vec3,
    pub object_position:   Vec3,
    pub object_velocity:   Vec3,
    pub contact_point:     Vec3,
}

/// Gate on one throwable: decides whether a hit stuns, and in which
/// direction.
#[derive(Clone, Debug)]
pub struct StunOnHit {
    config:       StunOnHitConfig,
    next_allowed: SimTime,
    disabled:     bool,
}

impl StunOnHit {
    pub fn new(config: StunOnHitConfig) -> Self {
        Self { config, next_allowed: SimTime::ZERO, disabled: false }
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The stun this hit causes on an enemy with body `enemy`, if any.
    ///
    /// Arms the cooldown (and one-shot) only when a stun is produced.
    pub fn try_stun(&mut self, hit: &ImpactHit, enemy: &Transform, now: SimTime) -> Option<StunRequest> {
        if self.disabled || !now.reached(self.next_allowed) {
            return None;
        }
        // A NaN speed fails the gate.
        if !(hit.relative_velocity.length() >= self.config.min_relative_speed) {
            return None;
        }

        let mut dir = self.hit_direction(hit, enemy);
        if self.config.flatten_direction {
            dir = dir.flatten();
        }
        if dir.is_degenerate() {
            return None;
        }

        self.next_allowed = now.after(self.config.reuse_cooldown_secs);
        if self.config.one_shot {
            self.disabled = true;
        }
        Some(StunRequest {
            direction:         dir,
            duration_secs:     self.config.stun_duration_secs,
            redirect_distance: self.config.investigate_distance,
        })
    }

    /// Incoming velocity if it is usable, otherwise object-to-enemy, then
    /// contact-to-enemy, then the enemy's facing.
    fn hit_direction(&self, hit: &ImpactHit, enemy: &Transform) -> Vec3 {
        if self.config.use_object_velocity
            && hit.object_velocity.length_squared() > MIN_VELOCITY_SQR
        {
            return hit.object_velocity.normalize_or(enemy.forward);
        }
        let mut to_enemy = enemy.position - hit.object_position;
        if !(to_enemy.length_squared() >= MIN_VELOCITY_SQR) {
            to_enemy = enemy.position - hit.contact_point;
        }
        to_enemy.normalize_or(enemy.forward)
    }
}
