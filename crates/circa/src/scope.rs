//! Thread-local tolerance configuration with scoped overrides.
//!
//! Purpose
//! - Hold the per-thread base `Tolerance` plus a stack of partial override
//!   frames. `context` pushes a frame and hands back a guard; dropping the
//!   guard pops the frame, on normal exit and on panic unwind alike.
//!
//! Why this design
//! - Overrides are structural, not value snapshots: a frame stores
//!   `Option<f64>` per field and resolution walks the stack top-down with the
//!   base as fallback. A field a scope never touched therefore keeps tracking
//!   `set_defaults` writes made while the scope is active.
//! - Thread-local keeps reads lock-free and scopes on one thread invisible to
//!   every other; each thread starts from `Tolerance::DEFAULT`.
//! - The slot belongs to [`crate::value::Approx`] comparisons. A second
//!   tolerant wrapper type would own its own slot, not share this one.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::tol::Tolerance;

/// One scoped override. `None` fields inherit from enclosing frames or the
/// base configuration.
#[derive(Clone, Copy, Debug)]
struct Frame {
    rtol: Option<f64>,
    atol: Option<f64>,
}

struct Slot {
    base: Tolerance,
    frames: Vec<Frame>,
}

impl Slot {
    fn resolve(&self) -> Tolerance {
        let mut rtol = None;
        let mut atol = None;
        for frame in self.frames.iter().rev() {
            rtol = rtol.or(frame.rtol);
            atol = atol.or(frame.atol);
            if rtol.is_some() && atol.is_some() {
                break;
            }
        }
        Tolerance {
            rtol: rtol.unwrap_or(self.base.rtol),
            atol: atol.unwrap_or(self.base.atol),
        }
    }
}

thread_local! {
    static SLOT: RefCell<Slot> = RefCell::new(Slot {
        base: Tolerance::DEFAULT,
        frames: Vec::new(),
    });
}

/// Guard for one scoped override, returned by [`context`].
///
/// Dropping the guard pops its frame and restores the enclosing
/// configuration. Not `Send`: the frame lives in the creating thread's slot.
/// Leaking the guard (`mem::forget`) leaks the frame for the rest of the
/// thread's lifetime. Guards dropped out of creation order truncate the
/// stack to their own depth and trip a `debug_assert!` in debug builds.
#[must_use = "the override ends when this guard drops; bind it with `let`"]
#[derive(Debug)]
pub struct ToleranceScope {
    /// Stack depth of this guard's frame, 1-based.
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ToleranceScope {
    fn drop(&mut self) {
        // try_with: a guard held in another thread-local can drop after the
        // slot during thread teardown; nothing left to restore then.
        let _ = SLOT.try_with(|slot| {
            let mut slot = slot.borrow_mut();
            debug_assert_eq!(
                slot.frames.len(),
                self.depth,
                "tolerance scope dropped out of order"
            );
            slot.frames.truncate(self.depth - 1);
        });
    }
}

/// Push a scoped tolerance override on the calling thread.
///
/// `None` fields are inherited from enclosing scopes, or from the defaults
/// when no enclosing scope sets them. The override lasts until the returned
/// guard drops; scopes nest and restore layer by layer.
///
/// ```
/// let loose = circa::context(Some(1e-2), None);
/// assert!(circa::eq(1.0, 1.001));
/// drop(loose);
/// assert!(circa::ne(1.0, 1.001));
/// ```
pub fn context(rtol: Option<f64>, atol: Option<f64>) -> ToleranceScope {
    SLOT.with(|slot| {
        let mut slot = slot.borrow_mut();
        slot.frames.push(Frame { rtol, atol });
        ToleranceScope {
            depth: slot.frames.len(),
            _not_send: PhantomData,
        }
    })
}

/// Effective configuration on the calling thread right now, with any active
/// scope overrides applied.
pub fn current() -> Tolerance {
    SLOT.with(|slot| slot.borrow().resolve())
}

/// The calling thread's base configuration, ignoring active scopes.
pub fn defaults() -> Tolerance {
    SLOT.with(|slot| slot.borrow().base)
}

/// Replace the calling thread's base configuration.
///
/// Takes effect immediately, including through active scopes for each field
/// they leave unset. Does not touch other threads.
pub fn set_defaults(tol: Tolerance) {
    SLOT.with(|slot| slot.borrow_mut().base = tol);
}
