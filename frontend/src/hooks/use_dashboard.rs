use shared::api::FleetApi;
use shared::Dashboard;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::LoadState;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseDashboardResult {
    pub state: LoadState<Dashboard>,
    pub reload: Callback<()>,
}

/// Summary KPIs, loaded on mount and whenever `reload` fires
#[hook]
pub fn use_dashboard(api_client: &ApiClient) -> UseDashboardResult {
    let dashboard = use_state(|| Option::<Dashboard>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let reload = {
        let api_client = api_client.clone();
        let dashboard = dashboard.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let dashboard = dashboard.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                Logger::debug_with_component("dashboard", "loading dashboard");

                match api_client.dashboard().await {
                    Ok(data) => {
                        dashboard.set(Some(data));
                        error.set(None);
                        Logger::info_with_component("dashboard", "dashboard loaded");
                    }
                    Err(e) => {
                        Logger::error_with_component("dashboard", &e.to_string());
                        error.set(Some(format!("Erro ao carregar dashboard: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    UseDashboardResult {
        state: LoadState {
            data: (*dashboard).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        reload,
    }
}
