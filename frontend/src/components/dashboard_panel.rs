use chrono::NaiveDate;
use shared::dashboard::DashboardView;
use shared::Dashboard;
use yew::prelude::*;

use crate::hooks::LoadState;

#[derive(Properties, PartialEq)]
pub struct DashboardPanelProps {
    pub state: LoadState<Dashboard>,
    pub today: NaiveDate,
}

/// KPI cards plus the warranty banners.
///
/// A failed reload keeps the last cards on screen and shows the error above them.
#[function_component(DashboardPanel)]
pub fn dashboard_panel(props: &DashboardPanelProps) -> Html {
    let error = match &props.state.error {
        Some(message) => html! {
            <div class="alert alert-error">
                <strong>{"Erro!"}</strong>{" "}{message}
            </div>
        },
        None => html! {},
    };

    let body = match &props.state.data {
        Some(dashboard) => {
            let view = DashboardView::new(dashboard, props.today);
            html! {
                <>
                    <div id="dashboard-alertas">
                        {for view.banners.iter().map(|banner| html! {
                            <div class={classes!("alert", banner.kind.css_class())}>
                                <strong>{banner.heading}</strong>{" "}{&banner.message}
                            </div>
                        })}
                    </div>
                    <div class="dashboard-cards">
                        {for view.cards.iter().map(|card| html! {
                            <div class={classes!("card", card.state_class)}>
                                <h3>{card.title}</h3>
                                <p class="card-value">{&card.value}</p>
                                <small>{&card.description}</small>
                            </div>
                        })}
                    </div>
                </>
            }
        }
        None if props.state.loading => html! {
            <div class="loading">{"Carregando dashboard..."}</div>
        },
        None => html! {},
    };

    html! {
        <section id="dashboard" class="dashboard">
            {error}
            {body}
        </section>
    }
}
