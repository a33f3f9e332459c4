/// Half-width of the uniform weight initialisation interval.
pub const INIT_RANGE: f64 = 0.3;

#[macro_export]
macro_rules! rand_array {
    ($rng:expr; $($x:expr),*) => {
        {
            use $crate::prelude::*;
            Array2::random_using(
                ($($x,)*),
                Uniform::new_inclusive(-$crate::utils::INIT_RANGE, $crate::utils::INIT_RANGE),
                $rng,
            )
        }
    };
}
