//! `PerceptionService`: per-agent target acquisition and retention.

use nw_agent::TargetRegistry;
use nw_core::{SimTime, TargetId, Transform, Vec3};
use nw_spatial::LineOfSight;

use crate::{PerceptionConfig, in_view_cone};

/// Geometric visibility checks for one agent.
///
/// The service is stateless apart from the "last confirmed visible"
/// timestamp that drives the retention grace period.
#[derive(Clone, Debug)]
pub struct PerceptionService {
    config:         PerceptionConfig,
    last_confirmed: SimTime,
}

impl PerceptionService {
    pub fn new(config: PerceptionConfig) -> Self {
        Self { config, last_confirmed: SimTime::ZERO }
    }

    #[inline]
    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// When the current target last passed every retention check.
    #[inline]
    pub fn last_confirmed(&self) -> SimTime {
        self.last_confirmed
    }

    /// Restart the grace period.  Called when a chase begins so a fresh
    /// target is never released on the first tick.
    #[inline]
    pub fn mark_confirmed(&mut self, now: SimTime) {
        self.last_confirmed = now;
    }

    /// The eye position for an agent body.
    #[inline]
    pub fn eye(&self, body: &Transform) -> Vec3 {
        body.position + Vec3::UP * self.config.eye_height
    }

    /// The nearest target that is in acquisition range, inside the
    /// acquisition cone (when cones are enabled) and visible (when LOS is
    /// required).  `None` if no target qualifies.
    ///
    /// Ties go to the earlier-registered target.
    pub fn try_acquire_target(
        &self,
        body:    &Transform,
        targets: &TargetRegistry,
        los:     &dyn LineOfSight,
    ) -> Option<TargetId> {
        let range = self.config.acquisition_range();
        let mut best: Option<(f32, TargetId)> = None;

        for entry in targets.iter() {
            let dist = body.position.distance(entry.position);
            if dist > range {
                continue;
            }
            if !self.passes_view_checks(body, entry.position, self.config.view_half_angle_deg, los) {
                continue;
            }
            match best {
                Some((best_dist, _)) if dist >= best_dist => {}
                _ => best = Some((dist, entry.id)),
            }
        }

        if let Some((dist, id)) = best {
            tracing::trace!(target_id = %id, dist, "target acquired");
        }
        best.map(|(_, id)| id)
    }

    /// Should the agent stop chasing `target`?
    ///
    /// A missing or despawned target is released immediately.  Otherwise
    /// the target is re-checked against the retention range, the retention
    /// cone and line of sight; if all pass the grace timer is refreshed and
    /// the answer is no.  If any fails, release is granted only once
    /// `lost_confirm_secs` have passed since the last confirmation.
    pub fn should_release(
        &mut self,
        body:    &Transform,
        target:  Option<TargetId>,
        targets: &TargetRegistry,
        los:     &dyn LineOfSight,
        now:     SimTime,
    ) -> bool {
        let Some(position) = target.and_then(|id| targets.position(id)) else {
            return true;
        };

        let in_range = body.position.distance(position) <= self.config.deaggro_range;
        if in_range
            && self.passes_view_checks(body, position, self.config.lose_half_angle_deg, los)
        {
            self.last_confirmed = now;
            return false;
        }

        let lost = now.has_elapsed(self.last_confirmed, self.config.lost_confirm_secs);
        tracing::trace!(
            in_range,
            since = now.secs_since(self.last_confirmed),
            lost,
            "target retention failed"
        );
        lost
    }

    /// Cone (if enabled) and LOS (if required) for one target position.
    fn passes_view_checks(
        &self,
        body:           &Transform,
        target_pos:     Vec3,
        half_angle_deg: f32,
        los:            &dyn LineOfSight,
    ) -> bool {
        let eye = self.eye(body);
        let target_eye = target_pos + Vec3::UP * self.config.eye_height;

        if self.config.use_view_cone
            && !in_view_cone(
                eye,
                body.forward,
                target_eye,
                half_angle_deg,
                self.config.horizontal_only_fov,
            )
        {
            return false;
        }
        !self.config.require_line_of_sight || los.is_clear(eye, target_eye)
    }
}
