use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    #[prop_or_default]
    pub name: Option<AttrValue>,
    /// Selected option value; empty selects the placeholder
    pub value: String,
    pub placeholder: AttrValue,
    /// (value, label) pairs
    pub options: Vec<(String, String)>,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

/// Point the element's `value` property at `value`.
///
/// The `selected` attribute stops applying once the user has picked an option,
/// so resets have to go through the property.
pub fn apply_value(select: &HtmlSelectElement, value: &str) {
    if select.value() != value {
        select.set_value(value);
    }
}

/// `<select>` whose selection follows the `value` prop, including resets
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let node = use_node_ref();

    {
        let node = node.clone();
        // Options arriving later must not leave the previous choice behind
        let option_count = props.options.len();
        use_effect_with((props.value.clone(), option_count), move |(value, _)| {
            if let Some(select) = node.cast::<HtmlSelectElement>() {
                apply_value(&select, value);
            }
            || ()
        });
    }

    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <select
            ref={node}
            id={props.id.clone()}
            name={props.name.clone()}
            {onchange}
            required={props.required}
            disabled={props.disabled}
        >
            <option value="">{props.placeholder.clone()}</option>
            {for props.options.iter().map(|(value, label)| html! {
                <option value={value.clone()}>{label}</option>
            })}
        </select>
    }
}
