/// Encoding preference order: the higher-efficiency codec variant first,
/// then the older variant, then the bare container as a generic fallback.
pub const ENCODING_CANDIDATES: [&str; 3] = [
    "video/webm; codecs=vp9",
    "video/webm; codecs=vp8",
    "video/webm",
];

/// Picks the first candidate the environment reports as supported.
///
/// The probe is injected so the choice stays provider-agnostic; the web
/// layer passes the platform's type-support check.
pub fn negotiate(mut is_supported: impl FnMut(&str) -> bool) -> Option<&'static str> {
    ENCODING_CANDIDATES
        .iter()
        .copied()
        .find(|mime| is_supported(mime))
}
