//! `Approx`: an f64 wrapper whose comparison operators are tolerant.
//!
//! Purpose
//! - Give call sites native operator syntax (`==`, `<=`, `+`, ...) while every
//!   comparison routes through the thread's scoped tolerance.
//!
//! Why this design
//! - The wrapper stores only the f64, never a tolerance snapshot: each
//!   comparison reads the configuration current at that moment, so a scoped
//!   override applies to values built before the scope was entered.
//! - Arithmetic closes over `Approx` (results stay approximate) and is bit
//!   identical to raw f64 arithmetic; only the comparison family differs.

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseFloatError;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use crate::scope::{self, ToleranceScope};
use crate::tol::Tolerance;

/// Approximate f64: comparisons use the scoped tolerance, arithmetic stays
/// plain f64 and closes over `Approx`.
///
/// ```
/// use circa::Approx;
///
/// let sum = (0..10).fold(Approx::new(0.0), |acc, _| acc + 0.1);
/// assert!(sum.raw() != 1.0); // raw f64 equality misses
/// assert!(sum == 1.0); // tolerant equality holds
/// ```
///
/// Comparison operators work against `Approx` and `f64` on either side.
/// There is no `Eq`, `Ord`, or `Hash`: tolerant equality is not transitive
/// (`a == b` and `b == c` do not imply `a == c`), so the equivalence and
/// total-order contracts behind those traits cannot hold.
#[derive(Clone, Copy, Debug, Default)]
pub struct Approx(pub f64);

impl Approx {
    /// Wrap a value. Accepts any type with a lossless f64 conversion,
    /// including `Approx` itself.
    #[inline]
    pub fn new(value: impl Into<f64>) -> Approx {
        Approx(value.into())
    }

    /// The wrapped f64.
    #[inline]
    pub const fn raw(self) -> f64 {
        self.0
    }

    /// Margin currently allowed between `self` and `other`:
    /// `atol + rtol * max(|self|, |other|)` under the scoped configuration.
    #[inline]
    pub fn tolerance(self, other: impl Into<f64>) -> f64 {
        scope::current().margin(self.0, other.into())
    }

    #[inline]
    pub fn abs(self) -> Approx {
        Approx(self.0.abs())
    }

    #[inline]
    pub fn powi(self, n: i32) -> Approx {
        Approx(self.0.powi(n))
    }

    #[inline]
    pub fn powf(self, n: f64) -> Approx {
        Approx(self.0.powf(n))
    }

    /// Floored quotient `(self / rhs).floor()`.
    ///
    /// Rounds toward negative infinity, not toward zero:
    /// `floor_div(7.0, -2.0) = -4`, where truncating division gives `-3`.
    #[inline]
    pub fn floor_div(self, rhs: impl Into<f64>) -> Approx {
        Approx((self.0 / rhs.into()).floor())
    }

    /// Floored quotient and remainder pair.
    ///
    /// The remainder `self - rhs * q` carries the divisor's sign, consistent
    /// with [`Approx::floor_div`]: `div_rem(7.0, -2.0) = (-4, -1)`.
    #[inline]
    pub fn div_rem(self, rhs: impl Into<f64>) -> (Approx, Approx) {
        let rhs = rhs.into();
        let q = (self.0 / rhs).floor();
        (Approx(q), Approx(self.0 - rhs * q))
    }

    /// Scoped tolerance override for comparisons of this type; see
    /// [`crate::context`].
    #[inline]
    pub fn context(rtol: Option<f64>, atol: Option<f64>) -> ToleranceScope {
        scope::context(rtol, atol)
    }

    /// The calling thread's base tolerances; see [`crate::defaults`].
    #[inline]
    pub fn defaults() -> Tolerance {
        scope::defaults()
    }

    /// Replace the calling thread's base tolerances; see
    /// [`crate::set_defaults`].
    #[inline]
    pub fn set_defaults(tol: Tolerance) {
        scope::set_defaults(tol)
    }
}

impl From<f64> for Approx {
    #[inline]
    fn from(value: f64) -> Approx {
        Approx(value)
    }
}

impl From<f32> for Approx {
    #[inline]
    fn from(value: f32) -> Approx {
        Approx(f64::from(value))
    }
}

impl From<Approx> for f64 {
    #[inline]
    fn from(value: Approx) -> f64 {
        value.0
    }
}

/// Parses plain float syntax, with or without the trailing `~` that
/// [`Display`](fmt::Display) emits.
impl FromStr for Approx {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Approx, ParseFloatError> {
        let s = s.strip_suffix('~').unwrap_or(s);
        f64::from_str(s).map(Approx)
    }
}

/// Renders the wrapped value followed by `~` (`1.5~`), marking it as
/// approximate. Width and precision flags apply to the numeric part.
impl fmt::Display for Approx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)?;
        f.write_str("~")
    }
}

impl PartialEq for Approx {
    #[inline]
    fn eq(&self, other: &Approx) -> bool {
        scope::current().equal(self.0, other.0)
    }
}

impl PartialEq<f64> for Approx {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        scope::current().equal(self.0, *other)
    }
}

impl PartialEq<Approx> for f64 {
    #[inline]
    fn eq(&self, other: &Approx) -> bool {
        scope::current().equal(*self, other.0)
    }
}

impl PartialOrd for Approx {
    #[inline]
    fn partial_cmp(&self, other: &Approx) -> Option<Ordering> {
        scope::current().ordering(self.0, other.0)
    }
}

impl PartialOrd<f64> for Approx {
    #[inline]
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        scope::current().ordering(self.0, *other)
    }
}

impl PartialOrd<Approx> for f64 {
    #[inline]
    fn partial_cmp(&self, other: &Approx) -> Option<Ordering> {
        scope::current().ordering(*self, other.0)
    }
}

// Binary arithmetic for the three operand patterns, result always `Approx`.
macro_rules! impl_arith {
    ($trait:ident, $method:ident, $sym:tt) => {
        impl $trait for Approx {
            type Output = Approx;
            #[inline]
            fn $method(self, rhs: Approx) -> Approx {
                Approx(self.0 $sym rhs.0)
            }
        }
        impl $trait<f64> for Approx {
            type Output = Approx;
            #[inline]
            fn $method(self, rhs: f64) -> Approx {
                Approx(self.0 $sym rhs)
            }
        }
        impl $trait<Approx> for f64 {
            type Output = Approx;
            #[inline]
            fn $method(self, rhs: Approx) -> Approx {
                Approx(self $sym rhs.0)
            }
        }
    };
}

impl_arith!(Add, add, +);
impl_arith!(Sub, sub, -);
impl_arith!(Mul, mul, *);
impl_arith!(Div, div, /);
impl_arith!(Rem, rem, %);

macro_rules! impl_arith_assign {
    ($trait:ident, $method:ident, $sym:tt) => {
        impl $trait for Approx {
            #[inline]
            fn $method(&mut self, rhs: Approx) {
                self.0 = self.0 $sym rhs.0;
            }
        }
        impl $trait<f64> for Approx {
            #[inline]
            fn $method(&mut self, rhs: f64) {
                self.0 = self.0 $sym rhs;
            }
        }
    };
}

impl_arith_assign!(AddAssign, add_assign, +);
impl_arith_assign!(SubAssign, sub_assign, -);
impl_arith_assign!(MulAssign, mul_assign, *);
impl_arith_assign!(DivAssign, div_assign, /);
impl_arith_assign!(RemAssign, rem_assign, %);

impl Neg for Approx {
    type Output = Approx;
    #[inline]
    fn neg(self) -> Approx {
        Approx(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_and_raw() {
        assert_eq!(Approx::new(1.5f64).raw(), 1.5);
        assert_eq!(Approx::new(1.5f32).raw(), 1.5);
        assert_eq!(Approx::new(3i32).raw(), 3.0);
        assert_eq!(Approx::new(Approx::new(2.0)).raw(), 2.0);
        assert_eq!(f64::from(Approx::new(4.0)), 4.0);
        assert_eq!(Approx::from(0.25f64).raw(), 0.25);
        assert_eq!(Approx::default().raw(), 0.0);
    }

    #[test]
    fn display_marks_approximate() {
        assert_eq!(format!("{}", Approx::new(1.5)), "1.5~");
        assert_eq!(format!("{:.2}", Approx::new(1.5)), "1.50~");
        assert_eq!(format!("{}", Approx::new(-0.5)), "-0.5~");
    }

    #[test]
    fn from_str_accepts_display_output() {
        assert_eq!("2.5".parse::<Approx>().unwrap().raw(), 2.5);
        assert_eq!("2.5~".parse::<Approx>().unwrap().raw(), 2.5);
        assert_eq!("-1e-3".parse::<Approx>().unwrap().raw(), -1e-3);
        assert!("two".parse::<Approx>().is_err());
        assert!("~".parse::<Approx>().is_err());
    }

    #[test]
    fn equality_in_all_operand_patterns() {
        let a = Approx::new(1.0);
        let near = 1.0 + 5e-13;
        assert!(a == Approx::new(near));
        assert!(a == near);
        assert!(near == a);
        assert!(a != 1.001);
        assert!(1.001 != a);
    }

    #[test]
    fn ordering_operators_in_all_operand_patterns() {
        let a = Approx::new(1.0);
        let near = 1.0 + 5e-13;
        // Raw ordering says 1.0 < near, but the pair is inside the band.
        assert!(a <= near);
        assert!(!(a < near));
        assert!(a >= near);
        assert!(!(a > near));
        assert!(near >= a);
        assert!(a < Approx::new(2.0));
        assert!(2.0 > a);
        assert!(Approx::new(2.0) > 1.0);
    }

    #[test]
    fn nan_orders_with_nothing() {
        let nan = Approx::new(f64::NAN);
        assert!(nan != nan);
        assert!(nan != 0.0);
        assert!(!(nan < Approx::new(0.0)));
        assert!(!(nan >= Approx::new(0.0)));
        assert_eq!(nan.partial_cmp(&Approx::new(0.0)), None);
    }

    #[test]
    fn comparisons_read_configuration_lazily() {
        let a = Approx::new(1.0);
        let b = Approx::new(1.001);
        assert!(a != b);
        {
            let _loose = Approx::context(Some(1e-2), None);
            // Same values, wider band: the values hold no snapshot.
            assert!(a == b);
        }
        assert!(a != b);
    }

    #[test]
    fn arithmetic_closes_over_approx() {
        let a = Approx::new(6.0);
        let b = Approx::new(4.0);
        assert_eq!((a + b).raw(), 10.0);
        assert_eq!((a - b).raw(), 2.0);
        assert_eq!((a * b).raw(), 24.0);
        assert_eq!((a / b).raw(), 1.5);
        assert_eq!((a % b).raw(), 2.0);
        assert_eq!((a + 1.0).raw(), 7.0);
        assert_eq!((1.0 + a).raw(), 7.0);
        assert_eq!((2.0 * a).raw(), 12.0);
        assert_eq!((-a).raw(), -6.0);

        let mut c = Approx::new(1.0);
        c += b;
        c -= 2.0;
        c *= 2.0;
        c /= Approx::new(3.0);
        c %= 10.0;
        assert_eq!(c.raw(), 2.0);

        // Closure keeps chained results tolerant.
        assert!(Approx::new(1.0) + 2.0 == 3.0 + 1e-15);
    }

    #[test]
    fn floored_division_family() {
        assert_eq!(Approx::new(7.0).floor_div(2.0).raw(), 3.0);
        assert_eq!(Approx::new(7.0).floor_div(-2.0).raw(), -4.0);
        assert_eq!(Approx::new(-7.0).floor_div(2.0).raw(), -4.0);
        assert_eq!(Approx::new(-7.0).floor_div(-2.0).raw(), 3.0);

        let (q, r) = Approx::new(7.0).div_rem(2.0);
        assert_eq!((q.raw(), r.raw()), (3.0, 1.0));
        let (q, r) = Approx::new(7.0).div_rem(-2.0);
        assert_eq!((q.raw(), r.raw()), (-4.0, -1.0));
        let (q, r) = Approx::new(-7.0).div_rem(2.0);
        assert_eq!((q.raw(), r.raw()), (-4.0, 1.0));
    }

    #[test]
    fn powers_and_abs() {
        assert_eq!(Approx::new(-3.0).abs().raw(), 3.0);
        assert_eq!(Approx::new(2.0).powi(10).raw(), 1024.0);
        assert!(Approx::new(2.0).powf(0.5) == std::f64::consts::SQRT_2);
    }

    #[test]
    fn tolerance_query_matches_margin() {
        let tol = Approx::defaults();
        assert_eq!(Approx::new(1.0).tolerance(2.0), tol.atol + tol.rtol * 2.0);
        assert_eq!(
            Approx::new(-8.0).tolerance(Approx::new(2.0)),
            tol.atol + tol.rtol * 8.0
        );
    }

    #[test]
    fn assoc_config_fns_mirror_free_fns() {
        let saved = Approx::defaults();
        Approx::set_defaults(Tolerance { rtol: 0.5, atol: 0.0 });
        assert!(Approx::new(1.0) == 1.4);
        Approx::set_defaults(saved);
        assert!(Approx::new(1.0) != 1.4);
    }
}
