use shared::tables::{per_diem_body, TableBody, PER_DIEM_COLUMNS};
use shared::{PerDiem, RecordId};
use yew::prelude::*;

use crate::hooks::LoadState;

#[derive(Properties, PartialEq)]
pub struct PerDiemTableProps {
    pub state: LoadState<Vec<PerDiem>>,
    pub on_edit: Callback<PerDiem>,
    pub on_delete: Callback<RecordId>,
}

#[function_component(PerDiemTable)]
pub fn per_diem_table(props: &PerDiemTableProps) -> Html {
    if props.state.is_first_load() {
        return html! {
            <div class="loading">{"Carregando diárias..."}</div>
        };
    }

    if let Some(message) = &props.state.error {
        return html! {
            <div class="per-diem-list">
                <h3>{"📋 Diárias Registradas"}</h3>
                <div class="alert alert-error">{message}</div>
            </div>
        };
    }

    let body = per_diem_body(props.state.data.as_deref().unwrap_or(&[]));

    let rows = match body {
        TableBody::Placeholder { message, colspan } => html! {
            <tr class="empty-row">
                <td colspan={colspan.to_string()}>{message}</td>
            </tr>
        },
        TableBody::Rows(rows) => html! {
            <>{for rows.into_iter().map(|row| {
                let id = row.record.id.clone();
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let id = id.clone();
                    Callback::from(move |_| on_delete.emit(id.clone()))
                };
                let on_edit = {
                    let on_edit = props.on_edit.clone();
                    let record = row.record.clone();
                    Callback::from(move |_| on_edit.emit(record.clone()))
                };
                html! {
                    <tr key={id.to_string()}>
                        <td>{row.driver}</td>
                        <td>{row.period}</td>
                        <td>{row.days}</td>
                        <td class="amount">{row.daily_rate}</td>
                        <td class="amount">{row.total}</td>
                        <td>{row.notes}</td>
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
        <div class="per-diem-list">
            <h3>{"📋 Diárias Registradas"}</h3>
            <div class="table-container">
                <table id="tabela-diarias" class="data-table">
                    <thead>
                        <tr>
                            {for PER_DIEM_COLUMNS.iter().map(|column| html! { <th>{*column}</th> })}
                        </tr>
                    </thead>
                    <tbody>
                        {rows}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
