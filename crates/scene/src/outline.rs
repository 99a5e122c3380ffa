use foundation::math::project;

/// A boundary vertex in geographic degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

const fn geo(lon_deg: f64, lat_deg: f64) -> GeoPoint {
    GeoPoint { lon_deg, lat_deg }
}

/// Minimum share of outline vertices that must face the camera before the
/// highlight is drawn at all. Below this the region is mostly on the far
/// side and the filtered path degenerates.
pub const OUTLINE_VISIBILITY_MIN: f64 = 0.35;

/// India boundary, ordered west-to-east along the northern frontier and
/// back up the coasts. The polygon is closed at draw time; the first and
/// last vertices are not duplicated.
pub const INDIA_OUTLINE: [GeoPoint; 95] = [
    geo(68.176645, 37.020841), geo(70.470458, 37.521124), geo(72.630533, 36.720007),
    geo(74.575892, 37.065645), geo(75.158028, 36.667701), geo(74.451559, 35.940679),
    geo(74.104294, 34.748886), geo(75.027263, 34.419988), geo(77.837451, 35.49401),
    geo(79.721367, 34.169305), geo(82.191242, 34.542283), geo(83.935126, 34.124744),
    geo(84.675018, 32.7649), geo(85.72819, 31.675308), geo(87.000054, 30.5335),
    geo(88.060238, 30.107965), geo(88.174804, 28.839891), geo(88.043133, 27.445819),
    geo(88.814248, 27.299316), geo(88.730326, 26.719403), geo(88.120441, 26.446526),
    geo(87.227472, 26.397898), geo(85.251779, 26.350462), geo(83.898993, 26.229957),
    geo(81.999987, 25.935415), geo(80.476721, 25.197201), geo(80.568447, 24.776862),
    geo(81.787959, 24.719971), geo(83.335308, 24.267994), geo(85.060266, 23.979958),
    geo(86.499351, 24.269604), geo(87.403682, 24.43802), geo(88.374714, 24.864334),
    geo(88.595703, 24.335083), geo(88.084422, 23.710399), geo(88.69994, 22.988188),
    geo(89.031961, 22.055708), geo(88.888766, 21.690588), geo(87.632484, 21.598778),
    geo(87.500001, 21.142395), geo(86.499351, 20.742784), geo(85.060266, 19.478579),
    geo(83.941006, 18.302009), geo(83.189218, 17.671221), geo(82.192792, 17.016636),
    geo(82.190689, 16.556664), geo(81.692719, 16.310217), geo(80.791999, 15.951972),
    geo(80.324896, 15.899185), geo(80.025069, 15.136415), geo(80.233274, 13.835771),
    geo(80.286294, 13.006261), geo(79.862547, 12.056215), geo(79.857999, 10.357275),
    geo(79.340512, 10.308854), geo(78.885345, 9.546136), geo(79.18972, 9.216544),
    geo(78.277941, 8.933047), geo(77.941165, 8.252959), geo(77.539898, 7.965535),
    geo(76.592979, 8.899276), geo(76.130061, 10.29963), geo(75.746467, 11.308251),
    geo(75.396101, 11.781245), geo(74.864816, 12.741936), geo(74.616717, 13.992583),
    geo(74.443859, 14.617222), geo(73.534199, 15.990652), geo(73.119909, 17.090849),
    geo(72.820909, 18.197701), geo(72.530117, 19.159559), geo(72.824475, 20.419503),
    geo(72.630533, 21.356009), geo(71.175273, 20.757441), geo(70.470459, 20.877331),
    geo(69.16413, 22.089298), geo(69.644928, 22.450775), geo(69.349596, 23.122055),
    geo(70.096054, 23.886979), geo(70.793294, 24.356524), geo(71.121878, 25.030594),
    geo(70.794768, 25.215102), geo(70.158203, 26.94124), geo(69.514393, 26.940966),
    geo(70.616496, 27.989196), geo(71.777666, 27.91318), geo(72.823752, 28.961592),
    geo(74.42138, 29.977426), geo(74.451559, 30.979815), geo(75.75706, 31.785998),
    geo(76.871722, 32.856015), geo(77.837451, 33.441473), geo(78.912269, 34.321937),
    geo(78.811086, 34.559989), geo(78.337071, 34.685651),
];

/// Projects the outline under `rotation_rad` and keeps the camera-facing
/// vertices in their original order.
///
/// Returns `None` when fewer than [`OUTLINE_VISIBILITY_MIN`] of the
/// vertices are visible; callers skip the overlay for that frame. Hidden
/// vertices are dropped rather than clipped against the horizon, which is
/// a deliberate approximation.
pub fn visible_outline(
    outline: &[GeoPoint],
    rotation_rad: f64,
    radius_px: f64,
) -> Option<Vec<[f64; 2]>> {
    let mut points = Vec::with_capacity(outline.len());
    for vertex in outline {
        let p = project(vertex.lon_deg, vertex.lat_deg, rotation_rad, radius_px);
        if p.visible {
            points.push([p.x, p.y]);
        }
    }
    if (points.len() as f64) < outline.len() as f64 * OUTLINE_VISIBILITY_MIN {
        return None;
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, INDIA_OUTLINE, OUTLINE_VISIBILITY_MIN, geo, visible_outline};

    // Rotation that brings the outline's mean longitude (~78 degrees east)
    // to face the camera.
    const FACING_ROTATION: f64 = -78.0 * std::f64::consts::PI / 180.0;

    #[test]
    fn facing_rotation_yields_a_path() {
        let path = visible_outline(&INDIA_OUTLINE, FACING_ROTATION, 200.0)
            .expect("outline should be visible when facing the camera");
        assert_eq!(path.len(), INDIA_OUTLINE.len());
    }

    #[test]
    fn antipodal_rotation_skips_the_overlay() {
        let away = FACING_ROTATION + std::f64::consts::PI;
        assert_eq!(visible_outline(&INDIA_OUTLINE, away, 200.0), None);
    }

    #[test]
    fn visible_vertices_keep_their_order() {
        let band = [geo(-30.0, 0.0), geo(0.0, 0.0), geo(30.0, 0.0)];
        let path = visible_outline(&band, 0.0, 100.0).expect("equatorial band faces the camera");
        assert_eq!(path.len(), 3);
        assert!(path[0][0] < path[1][0] && path[1][0] < path[2][0]);
    }

    #[test]
    fn partial_visibility_above_threshold_still_draws() {
        // Pushed toward the limb: some vertices drop out but the visible
        // share stays above the gate.
        let rotation = FACING_ROTATION + 80f64.to_radians();
        let total = INDIA_OUTLINE.len();
        let path = visible_outline(&INDIA_OUTLINE, rotation, 200.0)
            .expect("most of the outline still faces the camera");
        assert!(path.len() < total);
        assert!((path.len() as f64) >= total as f64 * OUTLINE_VISIBILITY_MIN);
    }

    #[test]
    fn outline_spans_the_subcontinent() {
        let lats: Vec<f64> = INDIA_OUTLINE.iter().map(|p| p.lat_deg).collect();
        let lons: Vec<f64> = INDIA_OUTLINE.iter().map(|p| p.lon_deg).collect();
        assert!(lats.iter().cloned().fold(f64::MAX, f64::min) < 9.0);
        assert!(lats.iter().cloned().fold(f64::MIN, f64::max) > 37.0);
        assert!(lons.iter().cloned().fold(f64::MAX, f64::min) < 69.0);
        assert!(lons.iter().cloned().fold(f64::MIN, f64::max) > 89.0);
    }

    #[test]
    fn geo_points_are_plain_data() {
        let p = GeoPoint {
            lon_deg: 1.0,
            lat_deg: 2.0,
        };
        assert_eq!(p, geo(1.0, 2.0));
    }
}
