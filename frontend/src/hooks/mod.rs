pub mod use_dashboard;
pub mod use_expenses;
pub mod use_live;
pub mod use_notifications;
pub mod use_per_diems;

/// Snapshot of a remote resource: last good data, in-flight flag, last error
#[derive(Clone, PartialEq)]
pub struct LoadState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> LoadState<T> {
    /// Nothing to show yet because the first request is still running
    pub fn is_first_load(&self) -> bool {
        self.loading && self.data.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_first_load() {
        let state = LoadState::<u32> { loading: true, ..Default::default() };
        assert!(state.is_first_load());
        let state = LoadState { data: Some(1u32), loading: true, error: None };
        assert!(!state.is_first_load());
    }
}
