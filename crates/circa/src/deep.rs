//! Deep comparison of nested numeric structures.
//!
//! Purpose
//! - Apply one relational operator recursively over [`Nested`] trees:
//!   element-wise over paired sequences, broadcasting a scalar across a
//!   sequence, zip-longest with a NaN fill where lengths differ.
//!
//! Why this design
//! - [`DeepCmp`] is lazy. A sequence comparison is an iterator; nothing below
//!   the current element is evaluated before `next()`, and each scalar leaf
//!   reads the tolerance configuration at its own evaluation time, so scope
//!   changes between `next()` calls affect later elements. Consumers pick the
//!   eager shape they need: [`DeepCmp::all`], [`DeepCmp::any`],
//!   [`DeepCmp::collect_flat`], [`DeepCmp::materialize`].
//! - The fill node for the short side of a length mismatch is `Num(NAN)`:
//!   a missing element is unequal to everything (and `Ne`-true), and a
//!   missing element facing a nested sequence broadcasts through it exactly
//!   like any other scalar.

use std::slice;

use crate::scope;
use crate::tol::Cmp;
use crate::value::Approx;

/// A scalar or an arbitrarily nested sequence of scalars.
///
/// The input shape for deep comparison. Built via `From`/`FromIterator`
/// conversions or the [`nested!`](crate::nested) literal macro.
#[derive(Clone, Debug)]
pub enum Nested {
    Num(f64),
    Seq(Vec<Nested>),
}

impl From<f64> for Nested {
    #[inline]
    fn from(value: f64) -> Nested {
        Nested::Num(value)
    }
}

impl From<f32> for Nested {
    #[inline]
    fn from(value: f32) -> Nested {
        Nested::Num(f64::from(value))
    }
}

impl From<i32> for Nested {
    #[inline]
    fn from(value: i32) -> Nested {
        Nested::Num(f64::from(value))
    }
}

impl From<Approx> for Nested {
    #[inline]
    fn from(value: Approx) -> Nested {
        Nested::Num(value.raw())
    }
}

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(values: Vec<T>) -> Nested {
        Nested::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>> FromIterator<T> for Nested {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Nested {
        Nested::Seq(iter.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`Nested`] literal: brackets nest, everything else is a leaf
/// converted with `Nested::from`.
///
/// ```
/// use circa::nested;
///
/// let grid = nested!([[0.5, 1.5], [2.5], (-3.5)]);
/// assert!(circa::deep_eq(&grid, &grid).all());
/// ```
///
/// A leaf must be a single token tree: parenthesize negative numbers and
/// expressions, as in `(-3.5)` above.
#[macro_export]
macro_rules! nested {
    ([ $($item:tt),* $(,)? ]) => {
        $crate::Nested::Seq(::std::vec![ $( $crate::nested!($item) ),* ])
    };
    ($leaf:tt) => {
        $crate::Nested::from($leaf)
    };
}

/// Fill node for the exhausted side of a zip-longest pairing. A static, not
/// a const, so the iterator can hand out `&'static` references to it.
static MISSING: Nested = Nested::Num(f64::NAN);

/// One level of a lazy deep comparison.
///
/// `Leaf` is a finished scalar comparison; `Seq` is an iterator over the
/// next level, evaluated only as it is consumed. Restart by calling
/// [`deep_cmp`] again; iteration consumes the value.
#[derive(Debug)]
pub enum DeepCmp<'a> {
    Leaf(bool),
    Seq(DeepIter<'a>),
}

impl DeepCmp<'_> {
    /// True iff every leaf comparison holds. Stops at the first false leaf;
    /// elements after it are never evaluated.
    pub fn all(self) -> bool {
        match self {
            DeepCmp::Leaf(ok) => ok,
            DeepCmp::Seq(iter) => {
                for item in iter {
                    if !item.all() {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// True iff at least one leaf comparison holds. Stops at the first true
    /// leaf.
    pub fn any(self) -> bool {
        match self {
            DeepCmp::Leaf(ok) => ok,
            DeepCmp::Seq(iter) => {
                for item in iter {
                    if item.any() {
                        return true;
                    }
                }
                false
            }
        }
    }

    /// Every leaf result in depth-first order, nesting flattened away.
    pub fn collect_flat(self) -> Vec<bool> {
        fn walk(cmp: DeepCmp<'_>, out: &mut Vec<bool>) {
            match cmp {
                DeepCmp::Leaf(ok) => out.push(ok),
                DeepCmp::Seq(iter) => {
                    for item in iter {
                        walk(item, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Evaluate everything, mirroring the input nesting.
    pub fn materialize(self) -> DeepResult {
        match self {
            DeepCmp::Leaf(ok) => DeepResult::Bool(ok),
            DeepCmp::Seq(iter) => DeepResult::Seq(iter.map(DeepCmp::materialize).collect()),
        }
    }
}

/// Fully evaluated deep comparison, shaped like the inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeepResult {
    Bool(bool),
    Seq(Vec<DeepResult>),
}

/// Lazy iterator over one sequence level of a deep comparison.
#[derive(Debug)]
pub struct DeepIter<'a> {
    op: Cmp,
    pairing: Pairing<'a>,
}

/// How the two sides pair up at this level.
#[derive(Debug)]
enum Pairing<'a> {
    /// Two sequences: zip-longest, the short side filled with [`MISSING`].
    Both(slice::Iter<'a, Nested>, slice::Iter<'a, Nested>),
    /// Sequence against a broadcast scalar; ends with the sequence.
    LeftSeq(slice::Iter<'a, Nested>, &'a Nested),
    /// Broadcast scalar against a sequence; ends with the sequence.
    RightSeq(&'a Nested, slice::Iter<'a, Nested>),
}

impl<'a> Iterator for DeepIter<'a> {
    type Item = DeepCmp<'a>;

    fn next(&mut self) -> Option<DeepCmp<'a>> {
        let (x, y) = match &mut self.pairing {
            Pairing::Both(xs, ys) => match (xs.next(), ys.next()) {
                (None, None) => return None,
                (x, y) => (x.unwrap_or(&MISSING), y.unwrap_or(&MISSING)),
            },
            Pairing::LeftSeq(xs, y) => (xs.next()?, *y),
            Pairing::RightSeq(x, ys) => (*x, ys.next()?),
        };
        Some(deep_cmp(self.op, x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match &self.pairing {
            Pairing::Both(xs, ys) => xs.len().max(ys.len()),
            Pairing::LeftSeq(xs, _) => xs.len(),
            Pairing::RightSeq(_, ys) => ys.len(),
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for DeepIter<'_> {}

impl std::iter::FusedIterator for DeepIter<'_> {}

/// Compare two nested structures under `op`, lazily.
///
/// Scalar vs scalar evaluates immediately to a [`DeepCmp::Leaf`] under the
/// tolerance current at that moment. Any sequence on either side yields a
/// [`DeepCmp::Seq`] whose elements are produced, and their leaves evaluated,
/// one `next()` at a time.
///
/// ```
/// use circa::{deep_eq, nested};
///
/// let xs = nested!([1.0, 2.0, 3.0]);
/// let ys = nested!([1.0, 2.0]);
/// assert_eq!(deep_eq(&xs, &ys).collect_flat(), vec![true, true, false]);
/// ```
pub fn deep_cmp<'a>(op: Cmp, x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    match (x, y) {
        (Nested::Num(a), Nested::Num(b)) => DeepCmp::Leaf(op.eval(scope::current(), *a, *b)),
        (Nested::Seq(xs), Nested::Seq(ys)) => DeepCmp::Seq(DeepIter {
            op,
            pairing: Pairing::Both(xs.iter(), ys.iter()),
        }),
        (Nested::Seq(xs), y @ Nested::Num(_)) => DeepCmp::Seq(DeepIter {
            op,
            pairing: Pairing::LeftSeq(xs.iter(), y),
        }),
        (x @ Nested::Num(_), Nested::Seq(ys)) => DeepCmp::Seq(DeepIter {
            op,
            pairing: Pairing::RightSeq(x, ys.iter()),
        }),
    }
}

/// [`deep_cmp`] with approximate equality.
#[inline]
pub fn deep_eq<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Eq, x, y)
}

/// [`deep_cmp`] with approximate inequality.
#[inline]
pub fn deep_ne<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Ne, x, y)
}

/// [`deep_cmp`] with tolerant less-or-equal.
#[inline]
pub fn deep_le<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Le, x, y)
}

/// [`deep_cmp`] with tolerant strict less-than.
#[inline]
pub fn deep_lt<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Lt, x, y)
}

/// [`deep_cmp`] with tolerant greater-or-equal.
#[inline]
pub fn deep_ge<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Ge, x, y)
}

/// [`deep_cmp`] with tolerant strict greater-than.
#[inline]
pub fn deep_gt<'a>(x: &'a Nested, y: &'a Nested) -> DeepCmp<'a> {
    deep_cmp(Cmp::Gt, x, y)
}
