pub const fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + (end - start) * amount
}

/// Squares through repeated multiplication in `f64` before narrowing.
pub fn fast_pow(num: f64, exp: u32) -> f32 {
    let mut result = 1.0;
    let mut num = num;
    let mut exp = exp;

    while exp > 0 {
        if exp % 2 == 1 {
            result *= num;
        }

        exp >>= 1;
        num *= num;
    }

    result as f32
}
