//! The skirmish map: a walled courtyard with four patrol loops.
//!
//! ```text
//!        +z
//!   ┌─────────────┐
//!   │  ▄▄     ▄▄  │    ▄▄ pillars (block sight, not movement)
//!   │      ██     │    ██ central wall
//!   │  ▄▄     ▄▄  │
//!   └─────────────┘ +x
//! ```

use anyhow::Result;
use nw_core::Vec3;
use nw_motor::PatrolRoute;
use nw_spatial::{ObstacleField, ObstacleFieldBuilder};

const PILLAR: Vec3 = Vec3::new(1.0, 1.5, 1.0);

/// Occluders for line-of-sight, scaled to an arena of `half_extent`.
pub fn build_obstacles(half_extent: f32) -> Result<ObstacleField> {
    let q = half_extent * 0.5;
    let mut b = ObstacleFieldBuilder::new();
    b.add_box(Vec3::new(0.0, 1.5, 0.0), Vec3::new(q * 0.6, 1.5, 0.4))?;
    for (x, z) in [(-q, -q), (-q, q), (q, -q), (q, q)] {
        b.add_box(Vec3::new(x, 1.5, z), PILLAR)?;
    }
    Ok(b.build())
}

/// Spawn point and patrol loop for enemy `index`: a square around one of
/// the quadrant centres, walked clockwise.
pub fn patrol_for(index: usize, half_extent: f32) -> Result<(Vec3, PatrolRoute)> {
    let q = half_extent * 0.5;
    let (cx, cz) = [(-q, -q), (q, -q), (q, q), (-q, q)][index % 4];
    let r = q * 0.6;
    let corners = vec![
        Vec3::new(cx - r, 0.0, cz - r),
        Vec3::new(cx - r, 0.0, cz + r),
        Vec3::new(cx + r, 0.0, cz + r),
        Vec3::new(cx + r, 0.0, cz - r),
    ];
    let spawn = corners[index / 4 % corners.len()];
    Ok((spawn, PatrolRoute::new(corners)?))
}
