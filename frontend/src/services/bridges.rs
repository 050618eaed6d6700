//! Yew-side implementations of the workflow capabilities.

use shared::live::LiveValue;
use shared::notifications::NotificationKind;
use shared::tabs::{Tab, TabState};
use shared::workflow::{Confirmer, Notifier, Refresher};
use shared::Resource;
use yew::Callback;

use crate::services::logging::Logger;

/// Confirmation through the browser's `confirm()` dialog
pub struct DialogConfirmer;

impl Confirmer for DialogConfirmer {
    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(&format!("🗑️ {}", message))
    }
}

/// Pushes notifications into the page's notification stack
pub struct CallbackNotifier(pub Callback<(NotificationKind, String)>);

impl Notifier for CallbackNotifier {
    fn notify(&self, kind: NotificationKind, message: String) {
        self.0.emit((kind, message));
    }
}

/// Reload callbacks owned by the app shell
#[derive(Clone, PartialEq)]
pub struct AppRefresher {
    pub reload_expenses: Callback<()>,
    pub reload_per_diems: Callback<()>,
    pub reload_dashboard: Callback<()>,
    pub reload_analysis: Callback<()>,
    /// Read when the mutation completes, not when it was sent
    pub active_tab: LiveValue<TabState>,
}

impl Refresher for AppRefresher {
    fn reload_list(&self, resource: Resource) {
        Logger::debug_with_component("refresh", &format!("reloading {}", resource.path()));
        match resource {
            Resource::Expenses => self.reload_expenses.emit(()),
            Resource::PerDiems => self.reload_per_diems.emit(()),
        }
    }

    fn reload_dashboard(&self) {
        self.reload_dashboard.emit(());
    }

    fn analysis_active(&self) -> bool {
        self.active_tab.with(|tabs| tabs.is_active(Tab::Analysis))
    }

    fn reload_analysis(&self) {
        self.reload_analysis.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::workflow::refresh_after_mutation;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    fn counter() -> (Rc<Cell<u32>>, Callback<()>) {
        let count = Rc::new(Cell::new(0));
        let callback = {
            let count = count.clone();
            Callback::from(move |_| count.set(count.get() + 1))
        };
        (count, callback)
    }

    #[wasm_bindgen_test]
    fn test_tab_switch_after_send_still_refreshes_analysis() {
        let tabs = LiveValue::new(TabState::default());
        let (analysis_loads, reload_analysis) = counter();
        let (_, reload) = counter();
        let refresher = AppRefresher {
            reload_expenses: reload.clone(),
            reload_per_diems: reload.clone(),
            reload_dashboard: reload,
            reload_analysis,
            active_tab: tabs.clone(),
        };

        assert!(!refresher.analysis_active());
        // the user opens the analysis tab while the request is in flight
        tabs.update(|state| state.select(Tab::Analysis));
        refresh_after_mutation(Resource::Expenses, &refresher);
        assert_eq!(analysis_loads.get(), 1);
    }
}
