//! Approximate floating-point comparison with scoped tolerances.
//!
//! Purpose
//! - Equality and ordering for f64 that treat rounding noise as equal: two
//!   values match when `|x - y| <= atol + rtol * max(|x|, |y|)`. The absolute
//!   term keeps a usable band at and near zero, where any purely relative
//!   margin collapses; the relative term scales the band with magnitude,
//!   where any fixed absolute margin is either far too strict or far too
//!   loose.
//! - The ordering family derives from equality: operands inside the band are
//!   never strictly ordered. `<` means raw-less and outside the band; `<=`
//!   means raw-less or inside it.
//!
//! Entry points
//! - [`Approx`]: f64 wrapper with native operator syntax.
//! - Free functions [`eq`], [`ne`], [`le`], [`lt`], [`ge`], [`gt`], and
//!   [`tolerance`] for raw f64 call sites.
//! - [`context`] / [`defaults`] / [`set_defaults`]: scoped overrides and the
//!   per-thread base configuration.
//! - [`deep_cmp`] and the `deep_*` family: lazy element-wise comparison of
//!   [`Nested`] structures.
//!
//! ```
//! use circa::{context, eq, Approx};
//!
//! let sum = (0..10).fold(Approx::new(0.0), |acc, _| acc + 0.1);
//! assert!(sum == 1.0); // raw f64 `==` would miss
//! assert!(!eq(1.0, 1.001));
//! {
//!     let _loose = context(Some(1e-2), None);
//!     assert!(eq(1.0, 1.001));
//! }
//! assert!(!eq(1.0, 1.001));
//! ```
//!
//! Configuration is thread-local: scopes and [`set_defaults`] never affect
//! other threads, and every thread starts from [`Tolerance::DEFAULT`]
//! (`rtol = 1e-9`, `atol = 1e-12`).

pub mod deep;
pub mod scope;
pub mod tol;
pub mod value;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use deep::{
    deep_cmp, deep_eq, deep_ge, deep_gt, deep_le, deep_lt, deep_ne, DeepCmp, DeepIter, DeepResult,
    Nested,
};
pub use scope::{context, defaults, set_defaults, ToleranceScope};
pub use tol::{Cmp, Tolerance};
pub use value::Approx;

/// Margin currently allowed between `x` and `y`:
/// `atol + rtol * max(|x|, |y|)` under the calling thread's configuration.
#[inline]
pub fn tolerance(x: impl Into<f64>, y: impl Into<f64>) -> f64 {
    scope::current().margin(x.into(), y.into())
}

/// Approximate equality under the current configuration.
#[inline]
pub fn eq(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().equal(x.into(), y.into())
}

/// Approximate inequality: `!eq(x, y)`.
#[inline]
pub fn ne(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().not_equal(x.into(), y.into())
}

/// Tolerant less-or-equal: raw `<`, or approximately equal.
#[inline]
pub fn le(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().less_equal(x.into(), y.into())
}

/// Tolerant strict less-than: raw `<` and not approximately equal.
#[inline]
pub fn lt(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().less_than(x.into(), y.into())
}

/// Tolerant greater-or-equal: raw `>`, or approximately equal.
#[inline]
pub fn ge(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().greater_equal(x.into(), y.into())
}

/// Tolerant strict greater-than: raw `>` and not approximately equal.
#[inline]
pub fn gt(x: impl Into<f64>, y: impl Into<f64>) -> bool {
    scope::current().greater_than(x.into(), y.into())
}

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::{
        context, deep_cmp, deep_eq, deep_ge, deep_gt, deep_le, deep_lt, deep_ne, defaults, eq, ge,
        gt, le, lt, ne, nested, set_defaults, tolerance, Approx, Cmp, DeepCmp, DeepResult, Nested,
        Tolerance, ToleranceScope,
    };
}
