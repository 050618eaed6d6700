use shared::live::LiveValue;
use yew::prelude::*;

/// Component state that async continuations can read and write after an `await`.
///
/// Writes go through [`UseLiveHandle::update`] or [`UseLiveHandle::set`], which
/// re-render the owning component.
#[derive(Clone)]
pub struct UseLiveHandle<T> {
    value: LiveValue<T>,
    force_update: UseForceUpdateHandle,
}

impl<T> UseLiveHandle<T> {
    pub fn live(&self) -> LiveValue<T> {
        self.value.clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = self.value.update(f);
        self.force_update.force_update();
        result
    }

    pub fn set(&self, value: T) {
        self.value.set(value);
        self.force_update.force_update();
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }
}

impl<T: Clone> UseLiveHandle<T> {
    pub fn get(&self) -> T {
        self.value.get()
    }
}

#[hook]
pub fn use_live<T, F>(init: F) -> UseLiveHandle<T>
where
    T: 'static,
    F: FnOnce() -> T,
{
    let value = use_memo((), move |_| LiveValue::new(init()));
    let force_update = use_force_update();

    UseLiveHandle {
        value: (*value).clone(),
        force_update,
    }
}
