use rand::Rng;

/// Number of background stars in one generated field.
pub const STAR_COUNT: usize = 120;

/// One background point-light.
///
/// A field lives until the next viewport resize; it is replaced in a
/// single batch and never mutated star by star.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Alpha applied when the star is drawn, in [0.55, 1.0).
    pub brightness: f64,
    /// Dot radius in logical pixels, in [0.4, 1.8).
    pub radius: f64,
}

/// Generates a fresh starfield covering `width` by `height`.
///
/// Placement is uniform over the area; brightness and radius are uniform
/// within their fixed bands. Deterministic for a given RNG state, so the
/// caller owns the seed.
pub fn starfield<R: Rng>(width: f64, height: f64, rng: &mut R) -> Vec<Star> {
    let mut stars = Vec::with_capacity(STAR_COUNT);
    for _ in 0..STAR_COUNT {
        stars.push(Star {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            brightness: 0.55 + rng.random::<f64>() * 0.45,
            radius: 0.4 + rng.random::<f64>() * 1.4,
        });
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::{STAR_COUNT, starfield};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn produces_exactly_the_configured_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(starfield(800.0, 600.0, &mut rng).len(), STAR_COUNT);
    }

    #[test]
    fn stars_stay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for star in starfield(320.0, 240.0, &mut rng) {
            assert!((0.0..320.0).contains(&star.x));
            assert!((0.0..240.0).contains(&star.y));
            assert!((0.55..1.0).contains(&star.brightness));
            assert!((0.4..1.8).contains(&star.radius));
        }
    }

    #[test]
    fn identical_seeds_reproduce_the_field() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            starfield(640.0, 480.0, &mut a),
            starfield(640.0, 480.0, &mut b)
        );
    }

    #[test]
    fn consecutive_fields_differ() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let first = starfield(640.0, 480.0, &mut rng);
        let second = starfield(640.0, 480.0, &mut rng);
        assert_ne!(first, second);
    }
}
