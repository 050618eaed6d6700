//! Transient notifications shown above the page content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn heading(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Sucesso!",
            NotificationKind::Error => "Erro!",
            NotificationKind::Info => "Info",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Error => "alert-error",
            NotificationKind::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub message: String,
}

/// Ordered set of visible notifications, newest first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationQueue {
    next_id: u32,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and return its id for a later dismiss
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.items.insert(0, Notification { id, kind, message: message.into() });
        id
    }

    /// Remove a notification; unknown ids are ignored
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
