use shared::api::FleetApi;
use shared::generation::RequestGeneration;
use shared::ExpenseList;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::LoadState;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseExpensesResult {
    pub state: LoadState<ExpenseList>,
    pub reload: Callback<()>,
}

/// Expense list backing the maintenance table.
///
/// Overlapping reloads are resolved in favour of the latest request.
#[hook]
pub fn use_expenses(api_client: &ApiClient) -> UseExpensesResult {
    let expenses = use_state(|| Option::<ExpenseList>::None);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let generation = use_state(RequestGeneration::new);

    let reload = {
        let api_client = api_client.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let generation = (*generation).clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();
            let generation = generation.clone();

            spawn_local(async move {
                let ticket = generation.begin();
                loading.set(true);

                let result = api_client.list_expenses().await;
                if !generation.is_current(ticket) {
                    Logger::debug_with_component("expenses", "discarding stale expense list");
                    return;
                }

                match result {
                    Ok(list) => {
                        Logger::info_with_component(
                            "expenses",
                            &format!("loaded {} expenses", list.expenses.len()),
                        );
                        expenses.set(Some(list));
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("expenses", &e.to_string());
                        error.set(Some(format!("Erro ao carregar serviços: {}", e)));
                    }
                }
                loading.set(false);
            });
        })
    };

    UseExpensesResult {
        state: LoadState {
            data: (*expenses).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        reload,
    }
}
