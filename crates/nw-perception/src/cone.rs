//! Angular field-of-view test.

use nw_core::Vec3;

/// `true` if `target_eye` lies inside the cone of `half_angle_deg` around
/// `forward`, as seen from `eye`.
///
/// With `horizontal_only` both vectors are projected onto the ground plane
/// first, so height differences never hide a target.  A target coincident
/// with the eye is always visible.  If flattening collapses `forward` (an
/// agent looking straight up or down) the unflattened forward is used.
/// Non-finite input never sees anything.
pub fn in_view_cone(
    eye:             Vec3,
    forward:         Vec3,
    target_eye:      Vec3,
    half_angle_deg:  f32,
    horizontal_only: bool,
) -> bool {
    let mut to_target = target_eye - eye;
    if !to_target.is_finite() || !forward.is_finite() {
        return false;
    }
    let mut fwd = forward;
    if horizontal_only {
        to_target = to_target.flatten();
        fwd = fwd.flatten();
    }

    if to_target.is_degenerate() {
        return true;
    }
    if fwd.is_degenerate() {
        fwd = forward;
    }

    let (Some(dir), Some(fwd)) = (to_target.try_normalize(), fwd.try_normalize()) else {
        // Forward is zero even unflattened: nothing to measure against.
        return true;
    };
    fwd.dot(dir) >= half_angle_deg.to_radians().cos()
}
