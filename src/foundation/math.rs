use std::f64::consts::TAU;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Wrap an angle into `[0, 2π)`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// Source-over for 8-bit coverage values.
pub(crate) fn coverage_over(dst: u8, src: u8) -> u8 {
    let inv = 255 - u16::from(src);
    src.saturating_add(mul_div255_u8(u16::from(dst), inv))
}

/// Destination-out for 8-bit coverage values.
pub(crate) fn coverage_erase(dst: u8, src: u8) -> u8 {
    mul_div255_u8(u16::from(dst), 255 - u16::from(src))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
