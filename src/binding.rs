//! Interactor bindings.
//!
//! A machine never touches its interactor directly. It goes through a
//! [`Binding`], which lends the interactor for the duration of one effect
//! call or reports that it is gone. Weak bindings re-check liveness on every
//! call and never keep the interactor alive past that call.

use std::fmt;
use std::marker::PhantomData;
use std::rc;
use std::sync;

/// Resolves the interactor a machine works against.
pub trait Binding {
    /// The interactor type effects receive.
    type Target: ?Sized;

    /// Lend the interactor to `f`.
    ///
    /// Returns `None` without calling `f` when the interactor is unavailable.
    fn with_interactor<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> Option<R>;

    /// Whether the next call to `with_interactor` would succeed.
    fn is_available(&self) -> bool;
}

/// Owned interactor value. Always resolves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strong<T>(pub T);

impl<T> Strong<T> {
    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Binding for Strong<T> {
    type Target = T;

    fn with_interactor<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.0))
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// No interactor at all. Never resolves, so a machine using it ignores
/// every event.
pub struct Unbound<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> Unbound<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for Unbound<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Unbound<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Unbound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unbound")
    }
}

impl<T: ?Sized> Binding for Unbound<T> {
    type Target = T;

    fn with_interactor<R>(&self, _f: impl FnOnce(&T) -> R) -> Option<R> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Non-owning handle to a single-threaded interactor.
///
/// The upgraded `Rc` only lives for the duration of `f`.
impl<T: ?Sized> Binding for rc::Weak<T> {
    type Target = T;

    fn with_interactor<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let interactor = self.upgrade()?;
        Some(f(&interactor))
    }

    fn is_available(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Non-owning handle to a thread-shared interactor.
impl<T: ?Sized> Binding for sync::Weak<T> {
    type Target = T;

    fn with_interactor<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let interactor = self.upgrade()?;
        Some(f(&interactor))
    }

    fn is_available(&self) -> bool {
        self.strong_count() > 0
    }
}
