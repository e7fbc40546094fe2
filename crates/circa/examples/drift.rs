//! Rounding-drift walkthrough for tolerant comparison.
//!
//! Purpose
//! - Show the three core moves on one page: accumulated f64 drift compared
//!   tolerantly, a scoped override widening the band and reverting, and a
//!   deep comparison of a nested measurement table.
//!
//! Why this shape
//! - `0.1` summed ten times is the canonical drift case: raw `==` misses by
//!   one rounding step while the default band absorbs it.

use circa::prelude::*;

fn main() {
    // Accumulated drift: ten steps of 0.1 land one rounding step off 1.0.
    let mut sum = Approx::new(0.0);
    for _ in 0..10 {
        sum += 0.1;
    }
    println!(
        "sum={sum} raw_eq={} approx_eq={}",
        sum.raw() == 1.0,
        sum == 1.0
    );
    println!("margin={:.3e}", sum.tolerance(1.0));

    // Scoped override: the same pair flips inside the scope, reverts after.
    let (x, y) = (1.0, 1.001);
    println!("default_eq={}", eq(x, y));
    {
        let _loose = context(Some(1e-2), None);
        println!("loose_eq={}", eq(x, y));
    }
    println!("restored_eq={}", eq(x, y));

    // Deep comparison of a measurement table, one reading short: the missing
    // element compares as NaN and fails, everything else stays in band.
    let expected = nested!([[0.1, 0.2], [0.3, 0.4], [0.5]]);
    let measured = nested!([[0.1, (0.2 + 4e-13)], [0.3, 0.4], []]);
    println!("deep_all={}", deep_eq(&expected, &measured).all());
    println!(
        "deep_flags={:?}",
        deep_eq(&expected, &measured).collect_flat()
    );
    println!(
        "deep_tree={:?}",
        deep_eq(&expected, &measured).materialize()
    );
}
