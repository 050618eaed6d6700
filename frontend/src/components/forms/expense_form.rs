use shared::forms::{ExpenseField, ExpenseForm, EXPENSE_TYPES};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::SelectField;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    pub form: ExpenseForm,
    pub submitting: bool,

    // Event handlers
    pub on_change: Callback<(ExpenseField, String)>,
    pub on_submit: Callback<()>,
    pub on_clear: Callback<()>,
}

fn input_handler(on_change: &Callback<(ExpenseField, String)>, field: ExpenseField) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit((field, input.value()));
    })
}

#[function_component(ExpenseFormView)]
pub fn expense_form_view(props: &ExpenseFormProps) -> Html {
    let form = &props.form;

    let text_input = |field: ExpenseField, input_type: &'static str, required: bool| {
        html! {
            <div class="form-group">
                <label for={field.name()}>{field.label()}</label>
                <input
                    type={input_type}
                    id={field.name()}
                    name={field.name()}
                    step={if field == ExpenseField::Amount { Some("0.01") } else { None }}
                    value={form.get(field).to_string()}
                    oninput={input_handler(&props.on_change, field)}
                    required={required}
                    disabled={props.submitting}
                />
            </div>
        }
    };

    let on_type_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |value: String| on_change.emit((ExpenseField::ExpenseType, value)))
    };
    let type_options: Vec<(String, String)> =
        EXPENSE_TYPES.iter().map(|kind| (kind.to_string(), kind.to_string())).collect();

    let on_notes_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit((ExpenseField::Notes, area.value()));
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
        <form id="registro-gasto-form" class="expense-form" {onsubmit}>
            <fieldset>
                <legend>{form.legend()}</legend>

                <div class="form-row">
                    {text_input(ExpenseField::Date, "date", true)}
                    {text_input(ExpenseField::Vehicle, "text", true)}
                    {text_input(ExpenseField::Plate, "text", true)}
                    {text_input(ExpenseField::Driver, "text", true)}
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="tipo_gasto">{ExpenseField::ExpenseType.label()}</label>
                        <SelectField
                            id="tipo_gasto"
                            name="tipo_gasto"
                            value={form.get(ExpenseField::ExpenseType).to_string()}
                            placeholder="Selecione..."
                            options={type_options}
                            on_change={on_type_change}
                            required=true
                            disabled={props.submitting}
                        />
                    </div>
                    {text_input(ExpenseField::Amount, "number", true)}
                    {text_input(ExpenseField::InvoiceNumber, "text", false)}
                </div>

                <div class="form-row">
                    {text_input(ExpenseField::ServiceOrder, "text", false)}
                    {text_input(ExpenseField::WarrantyExpiry, "date", false)}
                </div>

                <div class="form-group">
                    <label for="observacoes">{ExpenseField::Notes.label()}</label>
                    <textarea
                        id="observacoes"
                        name="observacoes"
                        value={form.get(ExpenseField::Notes).to_string()}
                        oninput={on_notes_input}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-actions">
                    <button id="btn-submit-gasto" type="submit" class="btn btn-primary" disabled={props.submitting}>
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
