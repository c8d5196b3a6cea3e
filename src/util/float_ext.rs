pub trait FloatExt: Sized {
    /// Whether `self` lies on a multiple of `step`.
    fn is_multiple_of(self, step: Self) -> bool;
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            // Exact remainder check; the speed grid consists of values that
            // are exactly representable.
            #[allow(clippy::float_cmp)]
            fn is_multiple_of(self, step: Self) -> bool {
                self % step == 0.0
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);

#[cfg(test)]
mod tests {
    use super::FloatExt;

    #[test]
    fn grid_multiples() {
        assert!(0.75_f32.is_multiple_of(0.25));
        assert!(2.0_f32.is_multiple_of(0.25));
        assert!(!1.1_f32.is_multiple_of(0.25));
    }
}
