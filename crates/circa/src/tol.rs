//! Tolerance configuration and the pure comparison primitives.
//!
//! Purpose
//! - Centralize the combined absolute/relative band and the six relational
//!   predicates built on it. Everything here is a pure function of
//!   `(Tolerance, x, y)` with no global state, so the numerics can be tested
//!   in isolation.
//! - [`crate::value::Approx`] and the deep comparison layer both read the
//!   scoped configuration and then delegate here.

use std::cmp::Ordering;

/// Comparison tolerances: relative (`rtol`) and absolute (`atol`).
///
/// The margin allowed between two values is `atol + rtol * max(|x|, |y|)`.
/// The absolute term keeps a floor when either operand is at or near zero
/// (where any purely relative criterion degenerates), and the relative term
/// takes over as magnitudes grow. Both fields are assumed non-negative;
/// negative values are not checked and produce whatever the formula yields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerance {
    /// Startup defaults: `rtol = 1e-9`, `atol = 1e-12`.
    pub const DEFAULT: Tolerance = Tolerance {
        rtol: 1e-9,
        atol: 1e-12,
    };

    /// Margin allowed between `x` and `y` under this configuration.
    #[inline]
    pub fn margin(self, x: f64, y: f64) -> f64 {
        self.atol + self.rtol * x.abs().max(y.abs())
    }

    /// Approximate equality: `|x - y| <= atol + rtol * max(|x|, |y|)`.
    ///
    /// Bit-equal operands (exact hits, equal infinities, signed zeros) short
    /// circuit before any arithmetic, so no `inf - inf` NaN can leak in. The
    /// band check is restructured as `d = |x - y| - atol; d <= 0 || d <=
    /// rtol * max(|x|, |y|)` so the absolute term is not double-counted and
    /// tiny differences stay on the subtraction-free branch. Symmetric in
    /// `x` and `y`: swapping the operands never changes the result.
    ///
    /// Non-finite operands are not special-cased. Comparisons involving NaN
    /// are false (so [`Tolerance::not_equal`] is true). With `rtol > 0` the
    /// margin at infinite magnitude is itself infinite, so an infinity
    /// compares equal to every non-NaN value; with `rtol = 0` infinities
    /// only match through the bit-equal shortcut.
    #[inline]
    pub fn equal(self, x: f64, y: f64) -> bool {
        if x == y {
            return true;
        }
        let d = (x - y).abs() - self.atol;
        d <= 0.0 || d <= self.rtol * x.abs().max(y.abs())
    }

    #[inline]
    pub fn not_equal(self, x: f64, y: f64) -> bool {
        !self.equal(x, y)
    }

    /// Raw `<` ordering, or within the band.
    #[inline]
    pub fn less_equal(self, x: f64, y: f64) -> bool {
        x < y || self.equal(x, y)
    }

    /// Raw `<` ordering and not within the band.
    #[inline]
    pub fn less_than(self, x: f64, y: f64) -> bool {
        x < y && !self.equal(x, y)
    }

    /// Raw `>` ordering, or within the band.
    #[inline]
    pub fn greater_equal(self, x: f64, y: f64) -> bool {
        x > y || self.equal(x, y)
    }

    /// Raw `>` ordering and not within the band.
    #[inline]
    pub fn greater_than(self, x: f64, y: f64) -> bool {
        x > y && !self.equal(x, y)
    }

    /// Single ordering primitive backing `PartialOrd`: `Equal` when the pair
    /// is within the band, otherwise the raw ordering, `None` when NaN is
    /// involved. Deriving the four ordering operators from this one function
    /// keeps the family consistent: `lt == le && ne` holds by construction.
    #[inline]
    pub fn ordering(self, x: f64, y: f64) -> Option<Ordering> {
        if self.equal(x, y) {
            Some(Ordering::Equal)
        } else if x < y {
            Some(Ordering::Less)
        } else if x > y {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Relational operator selector, for callers that pick the comparison at
/// runtime (the deep comparison entry points).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

impl Cmp {
    /// Evaluate the selected operator on `(x, y)` under `tol`.
    #[inline]
    pub fn eval(self, tol: Tolerance, x: f64, y: f64) -> bool {
        match self {
            Cmp::Eq => tol.equal(x, y),
            Cmp::Ne => tol.not_equal(x, y),
            Cmp::Le => tol.less_equal(x, y),
            Cmp::Lt => tol.less_than(x, y),
            Cmp::Ge => tol.greater_equal(x, y),
            Cmp::Gt => tol.greater_than(x, y),
        }
    }
}
