pub mod analysis;
pub mod dashboard_panel;
pub mod forms;
pub mod notifications;
pub mod select_field;
pub mod tab_bar;
pub mod tables;

pub use dashboard_panel::DashboardPanel;
pub use notifications::NotificationStack;
pub use select_field::SelectField;
pub use tab_bar::TabBar;
