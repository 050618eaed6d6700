use shared::forms::{ExpenseField, ExpenseForm, PerDiemField, PerDiemForm};
use shared::tabs::{Tab, TabLoad, TabState};
use shared::workflow::{self, SubmitOutcome};
use shared::{PerDiem, RecordId, Resource};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::analysis::AnalysisPanel;
use components::forms::{ExpenseFormView, PerDiemFormView};
use components::tables::{MaintenanceTable, PerDiemTable};
use components::{DashboardPanel, NotificationStack, TabBar};
use config::AppConfig;
use hooks::use_dashboard::use_dashboard;
use hooks::use_expenses::use_expenses;
use hooks::use_live::use_live;
use hooks::use_notifications::use_notifications;
use hooks::use_per_diems::use_per_diems;
use services::bridges::{AppRefresher, CallbackNotifier, DialogConfirmer};
use services::date_utils;
use services::{ApiClient, Logger};

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| {
        let config = AppConfig::default();
        Logger::init(config.log_level);
        Logger::info_with_component("app", &format!("API base {}", config.api_base_url));
        config
    });
    let api_client = use_memo((), {
        let config = config.clone();
        move |_| ApiClient::from_config(&config)
    });
    let api_client = (*api_client).clone();
    let today = date_utils::today();

    let notifications = use_notifications(config.notification_timeout_ms);
    let notify = notifications.actions.notify.clone();

    // Live so async continuations see the tab and form the user has now
    let tab_state = use_live(TabState::default);
    let dashboard = use_dashboard(&api_client);
    let expenses = use_expenses(&api_client);
    let per_diems = use_per_diems(&api_client);

    // Analysis reloads are requested by bumping a token the panel watches
    let analysis_counter = use_mut_ref(|| 0u32);
    let analysis_token = use_state(|| 0u32);
    let reload_analysis = {
        let analysis_counter = analysis_counter.clone();
        let analysis_token = analysis_token.clone();
        use_callback((), move |_: (), _| {
            let mut counter = analysis_counter.borrow_mut();
            *counter = counter.wrapping_add(1);
            analysis_token.set(*counter);
        })
    };

    let expense_form = use_live(|| ExpenseForm::new(today));
    let per_diem_form = use_live(|| PerDiemForm::new(today));
    let submitting_expense = use_state(|| false);
    let submitting_per_diem = use_state(|| false);

    let refresher = AppRefresher {
        reload_expenses: expenses.reload.clone(),
        reload_per_diems: per_diems.reload.clone(),
        reload_dashboard: dashboard.reload.clone(),
        reload_analysis: reload_analysis.clone(),
        active_tab: tab_state.live(),
    };

    let on_select_tab = {
        let tab_state = tab_state.clone();
        let reload_expenses = expenses.reload.clone();
        let reload_per_diems = per_diems.reload.clone();
        let reload_analysis = reload_analysis.clone();
        Callback::from(move |tab: Tab| {
            let load = tab_state.update(|state| state.select(tab));
            Logger::debug_with_component("tabs", &format!("switched to {}", tab.id()));
            match load {
                TabLoad::Nothing => {}
                TabLoad::MaintenanceList => reload_expenses.emit(()),
                TabLoad::PerDiemList => reload_per_diems.emit(()),
                TabLoad::DeferredAnalysis => reload_analysis.emit(()),
            }
        })
    };

    // Expense form
    let on_expense_change = {
        let expense_form = expense_form.clone();
        Callback::from(move |(field, value): (ExpenseField, String)| {
            expense_form.update(|form| form.set(field, value));
        })
    };

    let on_expense_clear = {
        let expense_form = expense_form.clone();
        Callback::from(move |_| expense_form.set(ExpenseForm::new(date_utils::today())))
    };

    let on_expense_submit = {
        let api_client = api_client.clone();
        let expense_form = expense_form.clone();
        let submitting = submitting_expense.clone();
        let notify = notify.clone();
        let refresher = refresher.clone();
        Callback::from(move |_| {
            let api_client = api_client.clone();
            let expense_form = expense_form.clone();
            let submitting = submitting.clone();
            let notifier = CallbackNotifier(notify.clone());
            let refresher = refresher.clone();
            let submission = expense_form.with(|form| form.submission());

            submitting.set(true);
            spawn_local(async move {
                let outcome = workflow::submit_form(&api_client, &submission, &notifier, &refresher).await;
                if let SubmitOutcome::Saved(_) = outcome {
                    expense_form.set(ExpenseForm::new(date_utils::today()));
                }
                submitting.set(false);
            });
        })
    };

    // Per-diem form
    let on_per_diem_change = {
        let per_diem_form = per_diem_form.clone();
        Callback::from(move |(field, value): (PerDiemField, String)| {
            per_diem_form.update(|form| form.set(field, value));
        })
    };

    let on_per_diem_clear = {
        let per_diem_form = per_diem_form.clone();
        Callback::from(move |_| per_diem_form.set(PerDiemForm::new(date_utils::today())))
    };

    let on_per_diem_submit = {
        let api_client = api_client.clone();
        let per_diem_form = per_diem_form.clone();
        let submitting = submitting_per_diem.clone();
        let notify = notify.clone();
        let refresher = refresher.clone();
        Callback::from(move |_| {
            let api_client = api_client.clone();
            let per_diem_form = per_diem_form.clone();
            let submitting = submitting.clone();
            let notifier = CallbackNotifier(notify.clone());
            let refresher = refresher.clone();
            let submission = per_diem_form.with(|form| form.submission());

            submitting.set(true);
            spawn_local(async move {
                let outcome = workflow::submit_form(&api_client, &submission, &notifier, &refresher).await;
                if let SubmitOutcome::Saved(_) = outcome {
                    per_diem_form.set(PerDiemForm::new(date_utils::today()));
                }
                submitting.set(false);
            });
        })
    };

    // Table actions
    let delete_handler = |resource: Resource| {
        let api_client = api_client.clone();
        let notify = notify.clone();
        let refresher = refresher.clone();
        Callback::from(move |id: RecordId| {
            let api_client = api_client.clone();
            let notifier = CallbackNotifier(notify.clone());
            let refresher = refresher.clone();
            spawn_local(async move {
                let outcome =
                    workflow::delete_record(&api_client, resource, &id, &DialogConfirmer, &notifier, &refresher)
                        .await;
                Logger::debug_with_component("app", &format!("delete {} {}: {:?}", resource.path(), id, outcome));
            });
        })
    };
    let on_delete_expense = delete_handler(Resource::Expenses);
    let on_delete_per_diem = delete_handler(Resource::PerDiems);

    let on_edit_expense = {
        let api_client = api_client.clone();
        let expense_form = expense_form.clone();
        let notify = notify.clone();
        let on_select_tab = on_select_tab.clone();
        Callback::from(move |id: RecordId| {
            let api_client = api_client.clone();
            let expense_form = expense_form.clone();
            let notifier = CallbackNotifier(notify.clone());
            let on_select_tab = on_select_tab.clone();
            spawn_local(async move {
                if let Some(expense) = workflow::find_expense(&api_client, &id, &notifier).await {
                    expense_form.update(|form| form.load_from(&expense));
                    on_select_tab.emit(Tab::Expenses);
                }
            });
        })
    };

    let on_edit_per_diem = {
        let per_diem_form = per_diem_form.clone();
        let on_select_tab = on_select_tab.clone();
        Callback::from(move |record: PerDiem| {
            per_diem_form.update(|form| form.load_from(&record));
            on_select_tab.emit(Tab::PerDiems);
        })
    };

    let section_class = |tab: Tab| {
        let active = tab_state.with(|state| state.is_active(tab));
        classes!("tab-content", active.then_some("active"))
    };

    html! {
        <div class="container">
            <header class="app-header">
                <h1>{"🚛 Controle de Frota"}</h1>
                <p class="subtitle">{"Gastos, diárias e garantias de manutenção"}</p>
            </header>

            <NotificationStack
                notifications={notifications.notifications.clone()}
                on_dismiss={notifications.actions.dismiss.clone()}
            />

            <DashboardPanel state={dashboard.state.clone()} {today} />

            <TabBar active={tab_state.with(|state| state.active())} on_select={on_select_tab.clone()} />

            // Every section stays mounted so the analysis canvases exist while hidden
            <section id={Tab::Expenses.id()} class={section_class(Tab::Expenses)}>
                <ExpenseFormView
                    form={expense_form.get()}
                    submitting={*submitting_expense}
                    on_change={on_expense_change}
                    on_submit={on_expense_submit}
                    on_clear={on_expense_clear}
                />
            </section>

            <section id={Tab::Maintenance.id()} class={section_class(Tab::Maintenance)}>
                <MaintenanceTable
                    state={expenses.state.clone()}
                    {today}
                    on_edit={on_edit_expense}
                    on_delete={on_delete_expense}
                />
            </section>

            <section id={Tab::PerDiems.id()} class={section_class(Tab::PerDiems)}>
                <PerDiemFormView
                    form={per_diem_form.get()}
                    submitting={*submitting_per_diem}
                    on_change={on_per_diem_change}
                    on_submit={on_per_diem_submit}
                    on_clear={on_per_diem_clear}
                />
                <PerDiemTable
                    state={per_diems.state.clone()}
                    on_edit={on_edit_per_diem}
                    on_delete={on_delete_per_diem}
                />
            </section>

            <section id={Tab::Analysis.id()} class={section_class(Tab::Analysis)}>
                <AnalysisPanel
                    api_client={api_client.clone()}
                    reload_token={*analysis_token}
                    render_delay_ms={config.analysis_render_delay_ms}
                    on_notify={notify.clone()}
                />
            </section>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
