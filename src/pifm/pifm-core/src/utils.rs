// Floor of a finite f32 into an i32 (rounds towards negative infinity)
// Values outside the i32 range saturate like an `as` cast.
pub fn floor_to_i32(value: f32) -> i32 {
    let truncated = value as i32;
    if (truncated as f32) > value {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

// Clamp a signed divisor into the 24-bit DIV field
pub fn clamp_divisor(value: i32) -> u32 {
    if value < 0 {
        0
    } else {
        (value as u32).min(crate::constants::clock::DIV_MASK)
    }
}
