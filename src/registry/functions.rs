//! Numeric callbacks behind the operator catalog
//!
//! All arithmetic is plain IEEE-754 `f64`: division by zero yields an
//! infinity, invalid domains yield NaN. Nothing here can fail.

/// Smallest factorial input whose result no longer fits in an `f64`.
///
/// `170!` is the largest finite factorial; anything at or above this bound
/// would multiply its way to infinity, so the loop is skipped.
const FACTORIAL_OVERFLOW: f64 = 171.0;

pub fn multiply(lhs: f64, rhs: f64) -> f64 {
    lhs * rhs
}

pub fn divide(lhs: f64, rhs: f64) -> f64 {
    lhs / rhs
}

pub fn add(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}

pub fn subtract(lhs: f64, rhs: f64) -> f64 {
    lhs - rhs
}

pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Truncated remainder (sign follows the dividend)
pub fn modulo(lhs: f64, rhs: f64) -> f64 {
    lhs % rhs
}

/// Loop-based factorial.
///
/// Multiplies `2, 3, ..` while the counter stays `<= n`, so non-integers
/// behave like their floor and anything below 2 (including negatives and
/// NaN) yields 1.
pub fn factorial(n: f64) -> f64 {
    if n >= FACTORIAL_OVERFLOW {
        return f64::INFINITY;
    }

    let mut acc = 1.0;
    let mut i = 2.0;
    while i <= n {
        acc *= i;
        i += 1.0;
    }
    acc
}

pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

pub fn ln(x: f64) -> f64 {
    x.ln()
}

/// Logarithm of `x` in the given `base`
pub fn log_base(base: f64, x: f64) -> f64 {
    x.ln() / base.ln()
}

pub fn pi() -> f64 {
    std::f64::consts::PI
}

pub fn e() -> f64 {
    std::f64::consts::E
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_small_values() {
        assert_eq!(factorial(0.0), 1.0);
        assert_eq!(factorial(1.0), 1.0);
        assert_eq!(factorial(5.0), 120.0);
        assert_eq!(factorial(10.0), 3_628_800.0);
    }

    #[test]
    fn test_factorial_follows_loop_semantics() {
        // 3.5 -> 2 * 3
        assert_eq!(factorial(3.5), 6.0);
        assert_eq!(factorial(-4.0), 1.0);
        assert_eq!(factorial(f64::NAN), 1.0);
    }

    #[test]
    fn test_factorial_is_bounded() {
        assert!(factorial(170.0).is_finite());
        assert_eq!(factorial(171.0), f64::INFINITY);
        assert_eq!(factorial(1e300), f64::INFINITY);
        assert_eq!(factorial(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_log_base() {
        assert!((log_base(2.0, 8.0) - 3.0).abs() < 1e-12);
        assert!((log_base(10.0, 1000.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_modulo_sign_follows_dividend() {
        assert_eq!(modulo(7.0, 3.0), 1.0);
        assert_eq!(modulo(-7.0, 3.0), -1.0);
    }
}
