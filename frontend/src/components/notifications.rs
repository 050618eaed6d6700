use shared::notifications::Notification;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NotificationStackProps {
    pub notifications: Vec<Notification>,
    pub on_dismiss: Callback<u32>,
}

/// Alerts stacked at the top of the page, newest first
#[function_component(NotificationStack)]
pub fn notification_stack(props: &NotificationStackProps) -> Html {
    if props.notifications.is_empty() {
        return html! {};
    }

    html! {
        <div id="alertas-container" class="notifications">
            {for props.notifications.iter().map(|notification| {
                let on_close = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = notification.id;
                    Callback::from(move |_| on_dismiss.emit(id))
                };
                html! {
                    <div key={notification.id} class={classes!("alert", notification.kind.css_class())}>
                        <strong>{notification.kind.heading()}</strong>
                        {" "}{&notification.message}
                        <button type="button" class="alert-close" title="Fechar" onclick={on_close}>{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
