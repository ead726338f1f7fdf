//! Perception tuning.

use nw_core::error::ensure_finite;
use nw_core::NwResult;

/// Widest accepted cone half-angle.  180° would make the cone a full sphere
/// and `cos` round-trip unreliably.
pub const MAX_HALF_ANGLE_DEG: f32 = 179.9;

/// Per-agent perception parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    /// Gate acquisition and retention on the view cone.  When false only
    /// distance (and LOS, if required) matter.
    pub use_view_cone: bool,

    /// Acquisition range when `use_view_cone` is false.
    pub aggro_range: f32,

    /// Retention range: a chased target is kept while within it.
    pub deaggro_range: f32,

    /// Acquisition range when `use_view_cone` is true.
    pub view_range: f32,

    /// Acquisition cone half-angle, degrees.
    pub view_half_angle_deg: f32,

    /// Retention cone half-angle, degrees.  Normally wider than the
    /// acquisition angle.
    pub lose_half_angle_deg: f32,

    /// Ignore vertical offsets in the cone test.
    pub horizontal_only_fov: bool,

    pub require_line_of_sight: bool,

    /// Height of the eye above the agent's position.  Target eye points use
    /// the same offset.
    pub eye_height: f32,

    /// Grace period after retention fails before the target is released.
    pub lost_confirm_secs: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            use_view_cone:         true,
            aggro_range:           12.0,
            deaggro_range:         16.0,
            view_range:            12.0,
            view_half_angle_deg:   50.0,
            lose_half_angle_deg:   65.0,
            horizontal_only_fov:   true,
            require_line_of_sight: true,
            eye_height:            1.6,
            lost_confirm_secs:     7.5,
        }
    }
}

impl PerceptionConfig {
    /// Range used when looking for a new target.
    #[inline]
    pub fn acquisition_range(&self) -> f32 {
        if self.use_view_cone { self.view_range } else { self.aggro_range }
    }

    /// Hard errors: non-finite values only.
    pub fn validate(&self) -> NwResult<()> {
        ensure_finite("aggro_range", self.aggro_range)?;
        ensure_finite("deaggro_range", self.deaggro_range)?;
        ensure_finite("view_range", self.view_range)?;
        ensure_finite("view_half_angle_deg", self.view_half_angle_deg)?;
        ensure_finite("lose_half_angle_deg", self.lose_half_angle_deg)?;
        ensure_finite("eye_height", self.eye_height)?;
        ensure_finite("lost_confirm_secs", self.lost_confirm_secs)?;
        Ok(())
    }

    /// Silently repair out-of-range values: negative ranges and grace
    /// periods become zero, half-angles are clamped to `[0, 179.9]`, and a
    /// retention range shorter than the acquisition range is raised to it
    /// so a fresh target is not dropped on its first check.
    pub fn clamped(mut self) -> Self {
        let before = self.clone();
        self.aggro_range = self.aggro_range.max(0.0);
        self.deaggro_range = self.deaggro_range.max(0.0);
        self.view_range = self.view_range.max(0.0);
        self.deaggro_range = self.deaggro_range.max(self.acquisition_range());
        self.view_half_angle_deg = self.view_half_angle_deg.clamp(0.0, MAX_HALF_ANGLE_DEG);
        self.lose_half_angle_deg = self.lose_half_angle_deg.clamp(0.0, MAX_HALF_ANGLE_DEG);
        self.lost_confirm_secs = self.lost_confirm_secs.max(0.0);
        if self != before {
            tracing::warn!(?before, after = ?self, "perception config clamped");
        }
        self
    }
}
