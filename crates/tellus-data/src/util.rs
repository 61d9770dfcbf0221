/// Rounds `value` to the nearest multiple of `multiple` (0 passes through).
#[inline]
pub fn round_multiple(value: f32, multiple: f32) -> f32 {
    if multiple == 0.0 {
        return value;
    }
    (value / multiple).round() * multiple
}

/// Bilinear interpolation of 4 corner values positioned at the corners of
/// the (x00, z00)-(x11, z11) rectangle, sampled at (x, z). Coordinates are
/// world units, not 0-1 percentages.
#[inline]
pub fn bilerp(
    v00: f32,
    v01: f32,
    v10: f32,
    v11: f32,
    (x00, z00): (f32, f32),
    (x11, z11): (f32, f32),
    (x, z): (f32, f32),
) -> f32 {
    let x2x1 = x11 - x00;
    let z2z1 = z11 - z00;
    let x2x = x11 - x;
    let z2z = z11 - z;
    let xx1 = x - x00;
    let zz1 = z - z00;
    (v00 * x2x * z2z + v01 * x2x * zz1 + v10 * xx1 * z2z + v11 * xx1 * zz1) / (x2x1 * z2z1)
}
