use gloo::timers::future::TimeoutFuture;
use shared::notifications::{Notification, NotificationKind, NotificationQueue};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

pub struct UseNotificationsResult {
    pub notifications: Vec<Notification>,
    pub actions: UseNotificationsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseNotificationsActions {
    pub notify: Callback<(NotificationKind, String)>,
    pub dismiss: Callback<u32>,
}

/// Notification stack with auto-dismiss after `timeout_ms`
#[hook]
pub fn use_notifications(timeout_ms: u32) -> UseNotificationsResult {
    let queue = use_mut_ref(NotificationQueue::new);
    let force_update = use_force_update();

    let dismiss = {
        let queue = queue.clone();
        let force_update = force_update.clone();
        use_callback((), move |id: u32, _| {
            if queue.borrow_mut().dismiss(id) {
                force_update.force_update();
            }
        })
    };

    let notify = {
        let queue = queue.clone();
        let force_update = force_update.clone();
        let dismiss = dismiss.clone();
        use_callback(timeout_ms, move |(kind, message): (NotificationKind, String), timeout_ms| {
            match kind {
                NotificationKind::Error => Logger::warn_with_component("notifications", &message),
                _ => Logger::info_with_component("notifications", &message),
            }
            let id = queue.borrow_mut().push(kind, message);
            force_update.force_update();

            let dismiss = dismiss.clone();
            let timeout_ms = *timeout_ms;
            spawn_local(async move {
                TimeoutFuture::new(timeout_ms).await;
                dismiss.emit(id);
            });
        })
    };

    let notifications = queue.borrow().items().to_vec();

    UseNotificationsResult {
        notifications,
        actions: UseNotificationsActions { notify, dismiss },
    }
}
