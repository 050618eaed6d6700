use shared::query::{month_options, AnalysisFilters, FilterField};
use shared::FilterOptions;
use yew::prelude::*;

use crate::components::SelectField;

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub options: Option<FilterOptions>,
    pub filters: AnalysisFilters,
    pub on_change: Callback<(FilterField, String)>,
    pub on_apply: Callback<()>,
    pub on_clear: Callback<()>,
}

/// (value, label) pairs for one selector; blank entries are skipped
fn choices(field: FilterField, options: Option<&FilterOptions>) -> Vec<(String, String)> {
    if field == FilterField::Month {
        return month_options();
    }
    let Some(options) = options else {
        return Vec::new();
    };

    let values: Vec<&String> = match field {
        FilterField::Vehicle => options.veiculos.iter().collect(),
        FilterField::Plate => options.placas.iter().collect(),
        FilterField::Driver => {
            let mut drivers: Vec<&String> = options.motoristas_gastos.iter().collect();
            for name in &options.motoristas_diarias {
                if !drivers.contains(&name) {
                    drivers.push(name);
                }
            }
            drivers
        }
        FilterField::Year => options.anos.iter().collect(),
        FilterField::Month => Vec::new(),
    };

    values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| (v.to_string(), v.to_string()))
        .collect()
}

#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let on_apply = {
        let on_apply = props.on_apply.clone();
        Callback::from(move |_| on_apply.emit(()))
    };
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_| on_clear.emit(()))
    };

    html! {
        <div class="filtros-analise">
            {for FilterField::ALL.iter().map(|field| {
                let field = *field;
                let on_change = {
                    let on_change = props.on_change.clone();
                    Callback::from(move |value: String| on_change.emit((field, value)))
                };
                let id = format!("filtro-{}", field.key());
                html! {
                    <div class="form-group">
                        <label for={id.clone()}>{field.label()}</label>
                        <SelectField
                            id={id}
                            value={props.filters.get(field).to_string()}
                            placeholder="Todos"
                            options={choices(field, props.options.as_ref())}
                            {on_change}
                        />
                    </div>
                }
            })}
            <div class="form-actions">
                <button type="button" class="btn btn-primary" onclick={on_apply}>{"🔍 Aplicar Filtros"}</button>
                <button type="button" class="btn btn-secondary" onclick={on_clear}>{"🧹 Limpar Filtros"}</button>
            </div>
        </div>
    }
}
