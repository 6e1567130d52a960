//! Small numeric helpers shared by the effect code.

pub mod units;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Moves `out` towards `in_` by `coefficient` of the remaining distance.
///
/// With a coefficient in `0.0..=1.0` the state never overshoots its target.
#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += coefficient * (in_ - *out);
}

/// Snaps `out` onto `target` once the two are closer than `threshold`.
///
/// For targets above one the threshold scales with the target, so the snap
/// still happens before [`one_pole`] stops moving at the precision limit.
#[inline]
pub fn settle(out: &mut f32, target: f32, threshold: f32) {
    if (target - *out).abs() < threshold * target.abs().max(1.0) {
        *out = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_to_zero_does_not_stall() {
        let mut value = 1.0;
        for _ in 0..2000 {
            one_pole(&mut value, 0.0, 0.1);
            settle(&mut value, 0.0, 1e-6);
            assert!(!value.is_subnormal());
        }
        assert_eq!(value, 0.0);
    }

    #[test]
    fn large_target_is_reached_exactly() {
        let mut value = 1.0;
        for _ in 0..2000 {
            one_pole(&mut value, 9.0, 0.1);
            settle(&mut value, 9.0, 1e-6);
        }
        assert_eq!(value, 9.0);
    }

    #[test]
    fn far_values_are_left_alone() {
        let mut value = 0.5;
        settle(&mut value, 0.0, 1e-6);
        assert_eq!(value, 0.5);
    }
}
