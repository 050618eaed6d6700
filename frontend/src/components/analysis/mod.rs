pub mod analysis_panel;
pub mod filter_panel;

pub use analysis_panel::AnalysisPanel;
pub use filter_panel::FilterPanel;
