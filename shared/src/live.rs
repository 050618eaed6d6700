//! Shared cell for UI state read from async continuations.

use std::cell::RefCell;
use std::rc::Rc;

/// Value shared between the render pass and in-flight requests.
///
/// Every clone sees the latest write, so a continuation that resumes after an
/// `await` reads what the user did in the meantime instead of the value it
/// captured when the request started.
#[derive(Debug, Default)]
pub struct LiveValue<T>(Rc<RefCell<T>>);

impl<T> LiveValue<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Mutate in place and return whatever `f` returns
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T: Clone> LiveValue<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for LiveValue<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for LiveValue<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
