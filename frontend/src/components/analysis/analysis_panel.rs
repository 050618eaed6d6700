use gloo::timers::future::TimeoutFuture;
use shared::api::FleetApi;
use shared::charts::{ChartController, ChartSlot};
use shared::generation::{Generation, RequestGeneration};
use shared::notifications::NotificationKind;
use shared::query::{AnalysisFilters, FilterField};
use shared::{AnalysisResult, FilterOptions, RequestFailure};
use yew::prelude::*;

use super::FilterPanel;
use crate::services::api::ApiClient;
use crate::services::chart_canvas::CanvasChartBackend;
use crate::services::logging::Logger;

const COMPONENT: &str = "analysis";

#[derive(Properties, PartialEq)]
pub struct AnalysisPanelProps {
    pub api_client: ApiClient,
    /// Bumped by the app shell whenever the analysis must be fetched again
    pub reload_token: u32,
    pub render_delay_ms: u32,
    pub on_notify: Callback<(NotificationKind, String)>,
}

pub enum Msg {
    Load,
    Loaded(Generation, Result<AnalysisResult, RequestFailure>),
    OptionsLoaded(Result<FilterOptions, RequestFailure>),
    SetFilter(FilterField, String),
    Apply,
    Clear,
}

pub struct AnalysisPanel {
    charts: ChartController<CanvasChartBackend>,
    filters: AnalysisFilters,
    options: Option<FilterOptions>,
    generation: RequestGeneration,
    loading: bool,
    needs_redraw: bool,
}

impl Component for AnalysisPanel {
    type Message = Msg;
    type Properties = AnalysisPanelProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            charts: ChartController::new(CanvasChartBackend),
            filters: AnalysisFilters::default(),
            options: None,
            generation: RequestGeneration::new(),
            loading: false,
            needs_redraw: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.load(ctx);
                true
            }
            Msg::Loaded(ticket, result) => {
                if !self.generation.is_current(ticket) {
                    Logger::debug_with_component(COMPONENT, "discarding stale analysis response");
                    return false;
                }
                self.loading = false;
                match result {
                    Ok(analysis) => {
                        Logger::info_with_component(COMPONENT, "analysis loaded");
                        self.charts.store(analysis);
                        self.needs_redraw = true;
                        if self.options.is_none() {
                            self.load_options(ctx);
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &e.to_string());
                        ctx.props()
                            .on_notify
                            .emit((NotificationKind::Error, format!("Erro ao carregar análise: {}", e)));
                    }
                }
                true
            }
            Msg::OptionsLoaded(result) => match result {
                Ok(options) => {
                    self.options = Some(options);
                    true
                }
                Err(e) => {
                    // Selectors stay empty; the charts are still usable unfiltered
                    Logger::warn_with_component(COMPONENT, &format!("filter options unavailable: {}", e));
                    false
                }
            },
            Msg::SetFilter(field, value) => {
                self.filters.set(field, value);
                true
            }
            Msg::Apply => {
                self.load(ctx);
                true
            }
            Msg::Clear => {
                self.filters.clear();
                self.load(ctx);
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.reload_token != old_props.reload_token {
            // Give the tab a moment to become visible before sizing the canvases
            let delay = props.render_delay_ms;
            ctx.link().send_future(async move {
                TimeoutFuture::new(delay).await;
                Msg::Load
            });
        }
        false
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if !self.needs_redraw {
            return;
        }
        self.needs_redraw = false;
        for (slot, error) in self.charts.redraw() {
            Logger::error_with_component(COMPONENT, &format!("{:?}: {}", slot, error));
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.charts.destroy_all();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <section class="analysis-section">
                <h2>{"📊 Análise de Gastos e Diárias"}</h2>
                <FilterPanel
                    options={self.options.clone()}
                    filters={self.filters.clone()}
                    on_change={link.callback(|(field, value): (FilterField, String)| Msg::SetFilter(field, value))}
                    on_apply={link.callback(|_: ()| Msg::Apply)}
                    on_clear={link.callback(|_: ()| Msg::Clear)}
                />
                {if self.loading && self.charts.current().is_none() {
                    html! { <div class="loading">{"Carregando análise..."}</div> }
                } else {
                    html! {}
                }}
                <div class="charts-grid">
                    {for ChartSlot::ALL.iter().map(|slot| self.view_slot(*slot))}
                </div>
            </section>
        }
    }
}

impl AnalysisPanel {
    fn load(&mut self, ctx: &Context<Self>) {
        let ticket = self.generation.begin();
        let api_client = ctx.props().api_client.clone();
        let filters = self.filters.clone();
        self.loading = true;

        Logger::debug_with_component(COMPONENT, &format!("requesting {}", filters.analysis_path()));
        ctx.link().send_future(async move {
            let result = api_client.analysis(&filters).await;
            Msg::Loaded(ticket, result)
        });
    }

    fn load_options(&self, ctx: &Context<Self>) {
        let api_client = ctx.props().api_client.clone();
        ctx.link().send_future(async move { Msg::OptionsLoaded(api_client.filter_options().await) });
    }

    fn view_slot(&self, slot: ChartSlot) -> Html {
        let body = if self.charts.has_data(slot) {
            html! {
                <canvas id={slot.canvas_id()} width="600" height="400"></canvas>
            }
        } else if self.charts.current().is_some() {
            html! { <p class="chart-empty">{slot.empty_message()}</p> }
        } else {
            html! {}
        };

        html! {
            <div class={classes!("chart-container", (slot == ChartSlot::Monthly).then_some("chart-wide"))}>
                <h3>{slot.title()}</h3>
                {body}
            </div>
        }
    }
}
