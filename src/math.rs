//! Scalar helpers shared by the syncable points and the animator.

use num::Float;

/// Linear interpolation between `a` and `b`.
///
/// `t` is not clamped, values outside of `[0, 1]` extrapolate.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Clamps `x` into `[0, 1]`
pub fn saturate<T: Float>(x: T) -> T {
    if x < T::zero() {
        T::zero()
    } else if x > T::one() {
        T::one()
    } else {
        x
    }
}

/// Decelerating easing curve, `1 - (x - 1)^4`
pub fn ease_out_quart<T: Float>(x: T) -> T {
    let v = x - T::one();
    T::one() - v * v * v * v
}

/// Decelerating easing curve which overshoots slightly before settling on `1`.
///
/// Evaluates `-v^4 + 3v^3 + 3v^2 + 1` with `v = x - 1`.
pub fn ease_out_back_cubic<T: Float>(x: T) -> T {
    let three = T::one() + T::one() + T::one();
    let v = x - T::one();
    let v2 = v * v;
    let v3 = v2 * v;
    three * v3 + three * v2 + T::one() - v3 * v
}

/// Binomial coefficient `n choose k`.
///
/// Uses the multiplicative form `r = r * (n - d + 1) / d` instead of factorials,
/// see <https://blog.plover.com/math/choose.html>.
/// Returns `0` when `k > n`.
pub fn combination(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);

    let mut r = 1.0;
    let mut m = n as f64;
    for d in 1..=k {
        r *= m;
        r /= d as f64;
        m -= 1.0;
    }
    r
}

/// Weight of the `i`-th control point of a degree `n` curve at `t`,
/// i.e. the bernstein basis polynomial `C(n, i) (1 - t)^(n - i) t^i`.
pub fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    combination(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32)
}
