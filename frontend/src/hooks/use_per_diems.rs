use shared::api::FleetApi;
use shared::generation::RequestGeneration;
use shared::PerDiem;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::LoadState;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UsePerDiemsResult {
    pub state: LoadState<Vec<PerDiem>>,
    pub reload: Callback<()>,
}

#[hook]
pub fn use_per_diems(api_client: &ApiClient) -> UsePerDiemsResult {
    let per_diems = use_state(|| Option::<Vec<PerDiem>>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let generation = use_state(RequestGeneration::new);

    let reload = {
        let api_client = api_client.clone();
        let per_diems = per_diems.clone();
        let loading = loading.clone();
        let error = error.clone();
        let generation = (*generation).clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let per_diems = per_diems.clone();
            let loading = loading.clone();
            let error = error.clone();
            let generation = generation.clone();

            spawn_local(async move {
                let ticket = generation.begin();
                loading.set(true);

                let result = api_client.list_per_diems().await;
                if !generation.is_current(ticket) {
                    Logger::debug_with_component("per-diems", "discarding stale per-diem list");
                    return;
                }

                match result {
                    Ok(list) => {
                        Logger::info_with_component("per-diems", &format!("loaded {} per-diems", list.len()));
                        per_diems.set(Some(list));
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("per-diems", &e.to_string());
                        error.set(Some(format!("Erro ao carregar diárias: {}", e)));
                    }
                }
                loading.set(false);
            });
        })
    };

    UsePerDiemsResult {
        state: LoadState {
            data: (*per_diems).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        reload,
    }
}
