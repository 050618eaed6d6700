//! Active tab and the load each tab triggers when entered.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Expenses,
    Maintenance,
    PerDiems,
    Analysis,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Expenses, Tab::Maintenance, Tab::PerDiems, Tab::Analysis];

    /// DOM id of the tab's section
    pub fn id(&self) -> &'static str {
        match self {
            Tab::Expenses => "gastos",
            Tab::Maintenance => "manutencao",
            Tab::PerDiems => "diarias",
            Tab::Analysis => "analise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Expenses => "📝 Registrar Gastos",
            Tab::Maintenance => "🔧 Manutenção e Garantias",
            Tab::PerDiems => "💰 Diárias",
            Tab::Analysis => "📊 Análise",
        }
    }
}

/// What to load after switching tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabLoad {
    Nothing,
    MaintenanceList,
    PerDiemList,
    /// Analysis waits for the canvases to be laid out first
    DeferredAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabState {
    active: Tab,
}

impl TabState {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Switch to `tab` and return the load it requires.
    /// Reselecting the active tab reloads it as well.
    pub fn select(&mut self, tab: Tab) -> TabLoad {
        self.active = tab;
        match tab {
            Tab::Expenses => TabLoad::Nothing,
            Tab::Maintenance => TabLoad::MaintenanceList,
            Tab::PerDiems => TabLoad::PerDiemList,
            Tab::Analysis => TabLoad::DeferredAnalysis,
        }
    }
}
