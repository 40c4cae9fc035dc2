//! Integer range mapping used to turn raw readings into pixels and pressure

/// Linearly rescale `value` from `in_lo..in_hi` to `out_lo..out_hi`.
///
/// Endpoints may be given in either order; swapping one pair mirrors the
/// result. Division truncates toward zero. A degenerate input range maps
/// everything to `out_lo`.
pub fn linear_map(value: i64, in_lo: i64, in_hi: i64, out_lo: i64, out_hi: i64) -> i64 {
    if in_hi == in_lo {
        return out_lo;
    }
    out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// Map a raw reading onto `0..extent`, clamped to a valid pixel index.
///
/// With `reversed` set the source range runs from `hi` down to `lo`.
pub fn map_to_pixel(raw: u16, lo: u16, hi: u16, extent: u16, reversed: bool) -> u16 {
    let (from, to) = if reversed { (hi, lo) } else { (lo, hi) };
    let mapped = linear_map(raw as i64, from as i64, to as i64, 0, extent as i64);
    mapped.clamp(0, extent.saturating_sub(1) as i64) as u16
}

/// Lowest pressure reported for an accepted touch
pub const MIN_PRESSURE: u16 = 1;
/// Highest pressure reported for an accepted touch
pub const MAX_PRESSURE: u16 = 255;

/// Map a raw Z reading onto `1..=255`.
///
/// Resistance falls as pressure rises, so `max_z` maps to the lightest touch.
pub fn map_pressure(raw_z: u16, min_z: u16, max_z: u16) -> u16 {
    let mapped = linear_map(
        raw_z as i64,
        max_z as i64,
        min_z as i64,
        MIN_PRESSURE as i64,
        MAX_PRESSURE as i64,
    );
    mapped.clamp(MIN_PRESSURE as i64, MAX_PRESSURE as i64) as u16
}
