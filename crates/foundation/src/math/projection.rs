/// Distance from the virtual camera to the sphere center, in sphere radii.
pub const CAMERA_DISTANCE: f64 = 2.8;
/// Projection plane scale relative to the on-screen sphere radius.
pub const RADIUS_SCALE: f64 = 1.1;

/// A geographic vertex projected into screen space.
///
/// Coordinates are relative to the sphere center; `y` grows downward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Whether the source vertex faces the camera.
    pub visible: bool,
}

/// Projects a geographic coordinate onto the screen under the given sphere
/// rotation.
///
/// The vertex is placed on a unit sphere rotated by `rotation_rad` around
/// the polar axis, then flattened with a fixed-distance perspective divide
/// scaled to `radius_px`. Pure and deterministic; there are no failure
/// modes.
pub fn project(lon_deg: f64, lat_deg: f64, rotation_rad: f64, radius_px: f64) -> ProjectedPoint {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();

    let x = lat.cos() * (lon + rotation_rad).sin();
    let y = lat.sin();
    let z = lat.cos() * (lon + rotation_rad).cos();

    let perspective = radius_px * RADIUS_SCALE / (CAMERA_DISTANCE - z);

    ProjectedPoint {
        x: x * perspective,
        y: -y * perspective,
        visible: z > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{CAMERA_DISTANCE, RADIUS_SCALE, project};
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn subpoint_projects_to_center() {
        let p = project(0.0, 0.0, 0.0, 100.0);
        assert_close(p.x, 0.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert!(p.visible);
    }

    #[test]
    fn far_side_is_hidden() {
        let p = project(0.0, 0.0, std::f64::consts::PI, 100.0);
        assert!(!p.visible);
    }

    #[test]
    fn northern_latitudes_move_up_screen() {
        let p = project(0.0, 45.0, 0.0, 100.0);
        assert!(p.y < 0.0, "screen y is inverted, got {}", p.y);
        assert!(p.visible);
    }

    #[test]
    fn eastern_longitudes_move_right() {
        let p = project(30.0, 0.0, 0.0, 100.0);
        assert!(p.x > 0.0);
    }

    #[test]
    fn perspective_uses_fixed_camera_distance() {
        // At the subpoint z = 1, so the divide collapses to a constant.
        let p = project(0.0, 60.0, 0.0, 100.0);
        let z = 60f64.to_radians().cos();
        let expected = 60f64.to_radians().sin() * 100.0 * RADIUS_SCALE / (CAMERA_DISTANCE - z);
        assert_close(p.y, -expected, 1e-9);
    }

    proptest! {
        #[test]
        fn periodic_in_full_turn(
            lon in -180.0..180.0f64,
            lat in -89.0..89.0f64,
            rot in -10.0..10.0f64,
        ) {
            let a = project(lon, lat, rot, 240.0);
            let b = project(lon, lat, rot + TAU, 240.0);
            prop_assert!((a.x - b.x).abs() < 1e-6);
            prop_assert!((a.y - b.y).abs() < 1e-6);

            let z = lat.to_radians().cos() * (lon.to_radians() + rot).cos();
            if z.abs() > 1e-9 {
                prop_assert_eq!(a.visible, b.visible);
            }
        }

        #[test]
        fn visibility_matches_facing_hemisphere(
            lon in -180.0..180.0f64,
            lat in -89.0..89.0f64,
            rot in -10.0..10.0f64,
        ) {
            let z = lat.to_radians().cos() * (lon.to_radians() + rot).cos();
            prop_assert_eq!(project(lon, lat, rot, 240.0).visible, z > 0.0);
        }
    }
}
