use shared::tabs::Tab;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TabBarProps {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(TabBar)]
pub fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="tabs">
            {for Tab::ALL.iter().map(|tab| {
                let tab = *tab;
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_| on_select.emit(tab))
                };
                html! {
                    <button
                        type="button"
                        class={classes!("tab-button", (props.active == tab).then_some("active"))}
                        data-tab={tab.id()}
                        {onclick}
                    >
                        {tab.label()}
                    </button>
                }
            })}
        </nav>
    }
}
