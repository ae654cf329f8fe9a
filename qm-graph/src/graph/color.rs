/// The exponent applied to normalized field values before coloring, which brightens values near
/// zero so that small variations stay visible.
const FIELD_GAMMA: f64 = 0.65;

/// Maps a field value to an RGBA8 color on a diverging white-red / white-blue scale.
///
/// `v` is normalized by `max_abs` and clamped to `[-1, 1]`. Zero is white, positive values fade
/// to red and negative values fade to blue. Returns [`None`] for a non-finite value, which
/// should be drawn transparent.
pub fn field_color(v: f64, max_abs: f64) -> Option<[u8; 4]> {
    if !v.is_finite() {
        return None;
    }

    let t = (v / max_abs.max(1e-12)).clamp(-1.0, 1.0);
    let s = t.signum() * t.abs().powf(FIELD_GAMMA);
    let fade = |s: f64| (255.0 * (1.0 - s)).round() as u8;

    Some(if s >= 0.0 {
        [255, fade(s), fade(s), 255]
    } else {
        [fade(-s), fade(-s), 255, 255]
    })
}
