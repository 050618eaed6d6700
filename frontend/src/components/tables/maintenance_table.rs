use shared::tables::{maintenance_body, maintenance_summary_line, TableBody, MAINTENANCE_COLUMNS};
use chrono::NaiveDate;
use shared::{ExpenseList, RecordId};
use yew::prelude::*;

use crate::hooks::LoadState;

#[derive(Properties, PartialEq)]
pub struct MaintenanceTableProps {
    pub state: LoadState<ExpenseList>,
    pub today: NaiveDate,
    pub on_edit: Callback<RecordId>,
    pub on_delete: Callback<RecordId>,
}

#[function_component(MaintenanceTable)]
pub fn maintenance_table(props: &MaintenanceTableProps) -> Html {
    if props.state.is_first_load() {
        return html! {
            <section class="maintenance-section">
                <h2>{"🔧 Manutenção e Garantias"}</h2>
                <div class="loading">{"Carregando..."}</div>
            </section>
        };
    }

    // A failed load replaces the table until the next successful one
    if let Some(message) = &props.state.error {
        return html! {
            <section class="maintenance-section">
                <h2>{"🔧 Manutenção e Garantias"}</h2>
                <div class="alert alert-error">{message}</div>
            </section>
        };
    }

    let (body, summary) = match &props.state.data {
        Some(list) => {
            let (services, summary) = list.maintenance_view(props.today);
            (
                maintenance_body(&services, props.today),
                Some(maintenance_summary_line(&summary)),
            )
        }
        None => (maintenance_body(&[], props.today), None),
    };

    let rows = match body {
        TableBody::Placeholder { message, colspan } => html! {
            <tr class="empty-row">
                <td colspan={colspan.to_string()}>{message}</td>
            </tr>
        },
        TableBody::Rows(rows) => html! {
            <>{for rows.into_iter().map(|row| {
                let on_edit = {
                    let on_edit = props.on_edit.clone();
                    let id = row.id.clone();
                    Callback::from(move |_| on_edit.emit(id.clone()))
                };
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let id = row.id.clone();
                    Callback::from(move |_| on_delete.emit(id.clone()))
                };
                html! {
                    <tr key={row.id.to_string()}>
                        <td>{row.id.to_string()}</td>
                        <td>{row.date}</td>
                        <td>{row.vehicle}</td>
                        <td>{row.plate}</td>
                        <td>{row.driver}</td>
                        <td class="amount">{row.amount}</td>
                        <td>{row.service_order}</td>
                        <td>{row.warranty_expiry}</td>
                        <td>
                            <span class={classes!("status-badge", row.status.css_class())}>
                                {row.status.label()}
                            </span>
                        </td>
                        <td class="acoes">
                            <button class="acoes-btn btn-editar" title="Editar" onclick={on_edit}>{"✏️"}</button>
                            <button class="acoes-btn btn-excluir" title="Excluir" onclick={on_delete}>{"🗑️"}</button>
                        </td>
                    </tr>
                }
            })}</>
        },
    };

    html! {
        <section class="maintenance-section">
            <h2>{"🔧 Manutenção e Garantias"}</h2>
            {if let Some(summary) = summary {
                html! { <p id="manutencao-resumo" class="table-summary">{summary}</p> }
            } else {
                html! {}
            }}
            <div class="table-container">
                <table id="tabela-manutencao" class="data-table">
                    <thead>
                        <tr>
                            {for MAINTENANCE_COLUMNS.iter().map(|column| html! { <th>{*column}</th> })}
                        </tr>
                    </thead>
                    <tbody>
                        {rows}
                    </tbody>
                </table>
            </div>
        </section>
    }
}
