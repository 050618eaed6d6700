use shared::forms::{PerDiemField, PerDiemForm};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PerDiemFormProps {
    pub form: PerDiemForm,
    pub submitting: bool,
    pub on_change: Callback<(PerDiemField, String)>,
    pub on_submit: Callback<()>,
    pub on_clear: Callback<()>,
}

#[function_component(PerDiemFormView)]
pub fn per_diem_form_view(props: &PerDiemFormProps) -> Html {
    let form = &props.form;

    let field_input = |field: PerDiemField, id: &'static str, input_type: &'static str| {
        let oninput = {
            let on_change = props.on_change.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit((field, input.value()));
            })
        };
        html! {
            <div class="form-group">
                <label for={id}>{field.label()}</label>
                <input
                    type={input_type}
                    id={id}
                    name={field.name()}
                    step={if input_type == "number" { Some("0.01") } else { None }}
                    value={form.get(field).to_string()}
                    {oninput}
                    required=true
                    disabled={props.submitting}
                />
            </div>
        }
    };

    let on_notes_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit((PerDiemField::Notes, area.value()));
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_| on_clear.emit(()))
    };

    html! {
        <form id="registro-diaria-form" class="per-diem-form" {onsubmit}>
            <fieldset>
                <legend>{form.legend()}</legend>

                <div class="form-row">
                    {field_input(PerDiemField::Driver, "diaria_motorista", "text")}
                    {field_input(PerDiemField::StartDate, "data_inicio", "date")}
                    {field_input(PerDiemField::EndDate, "data_fim", "date")}
                    {field_input(PerDiemField::DailyRate, "valor_diaria_unitaria", "number")}
                </div>

                <div class="form-row calculated">
                    <div class="form-group">
                        <label for="dias_calculados">{"Dias"}</label>
                        <input type="text" id="dias_calculados" value={form.derived().days.clone()} readonly=true />
                    </div>
                    <div class="form-group">
                        <label for="valor_total_calculado">{"Valor Total"}</label>
                        <input type="text" id="valor_total_calculado" value={form.derived().total.clone()} readonly=true />
                    </div>
                </div>

                <div class="form-group">
                    <label for="diaria_observacoes">{PerDiemField::Notes.label()}</label>
                    <textarea
                        id="diaria_observacoes"
                        name="observacoes"
                        value={form.get(PerDiemField::Notes).to_string()}
                        oninput={on_notes_input}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-actions">
                    <button id="btn-submit-diaria" type="submit" class="btn btn-primary" disabled={props.submitting}>
                        {if props.submitting { "Salvando..." } else { form.submit_label() }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_clear} disabled={props.submitting}>
                        {"🧹 Limpar"}
                    </button>
                </div>
            </fieldset>
        </form>
    }
}
