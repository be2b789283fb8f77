pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Floor a layout quantity into an integer pixel coordinate.
///
/// Every float-to-pixel conversion in the layout engine goes through here so the rounding rule
/// is the same everywhere.
pub(crate) fn floor_px(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    v.floor() as i64
}

/// Floor a non-negative size; negative or non-finite inputs clamp to 0.
pub(crate) fn floor_size(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.floor().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
