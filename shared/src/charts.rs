//! # Analysis charts
//!
//! Turns an [`AnalysisResult`] into chart configurations and keeps track of
//! which canvas currently holds a live chart.
//!
//! Drawing itself sits behind [`ChartBackend`] so the controller can be driven
//! by the browser canvas renderer or by an in-memory fake in tests. Every
//! render destroys the previous instance of a canvas before creating the next
//! one, which keeps at most one live chart per canvas.

use std::collections::{BTreeMap, BTreeSet};

use crate::format::{format_month_year, palette_colors, truncate_label, Rgba};
use crate::{AnalysisResult, Bucket, ChartError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Doughnut,
    Bar,
    HorizontalBar,
    Line,
}

impl ChartKind {
    /// Pie and doughnut charts have no axes and show a legend instead
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

/// The five chart positions of the analysis tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartSlot {
    ByType,
    ByVehicle,
    ByPlate,
    PerDiemByDriver,
    Monthly,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 5] = [
        ChartSlot::ByType,
        ChartSlot::ByVehicle,
        ChartSlot::ByPlate,
        ChartSlot::PerDiemByDriver,
        ChartSlot::Monthly,
    ];

    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::ByType => "graficoPorTipo",
            ChartSlot::ByVehicle => "graficoPorVeiculo",
            ChartSlot::ByPlate => "graficoPorPlaca",
            ChartSlot::PerDiemByDriver => "graficoDiariaMotorista",
            ChartSlot::Monthly => "graficoMensal",
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSlot::ByType => ChartKind::Pie,
            ChartSlot::ByVehicle => ChartKind::Bar,
            ChartSlot::ByPlate => ChartKind::HorizontalBar,
            ChartSlot::PerDiemByDriver => ChartKind::Doughnut,
            ChartSlot::Monthly => ChartKind::Line,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::ByType => "Gastos por Tipo",
            ChartSlot::ByVehicle => "Gastos por Veículo",
            ChartSlot::ByPlate => "Gastos por Placa",
            ChartSlot::PerDiemByDriver => "Diárias por Motorista",
            ChartSlot::Monthly => "Evolução Mensal - Gastos vs Diárias",
        }
    }

    /// Message shown in place of the canvas when the slot has no data
    pub fn empty_message(&self) -> &'static str {
        match self {
            ChartSlot::Monthly => "Sem dados mensais para este filtro.",
            _ => "Sem dados para este filtro.",
        }
    }

    /// Build this slot's chart, or `None` when its data is empty
    pub fn config(&self, analysis: &AnalysisResult) -> Option<ChartConfig> {
        let bucket = match self {
            ChartSlot::ByType => &analysis.gastos.por_tipo,
            ChartSlot::ByVehicle => &analysis.gastos.por_veiculo,
            ChartSlot::ByPlate => &analysis.gastos.por_placa,
            ChartSlot::PerDiemByDriver => &analysis.diarias.por_motorista,
            ChartSlot::Monthly => {
                return ChartConfig::monthly(&analysis.gastos.mensal, &analysis.diarias.mensal);
            }
        };
        ChartConfig::category(self.kind(), self.title(), bucket)
    }

    pub fn has_data(&self, analysis: &AnalysisResult) -> bool {
        match self {
            ChartSlot::ByType => !analysis.gastos.por_tipo.is_empty(),
            ChartSlot::ByVehicle => !analysis.gastos.por_veiculo.is_empty(),
            ChartSlot::ByPlate => !analysis.gastos.por_placa.is_empty(),
            ChartSlot::PerDiemByDriver => !analysis.diarias.por_motorista.is_empty(),
            ChartSlot::Monthly => {
                !analysis.gastos.mensal.is_empty() || !analysis.diarias.mensal.is_empty()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    /// One color per value for category charts, a single color for lines
    pub background: Vec<Rgba>,
    pub border: Vec<Rgba>,
    pub border_width: u32,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub show_legend: bool,
    pub show_axes: bool,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
}

const EXPENSE_LINE: Rgba = Rgba::new(0, 123, 255, 1.0);
const PER_DIEM_LINE: Rgba = Rgba::new(40, 167, 69, 1.0);

impl ChartConfig {
    /// Single-dataset chart over a category bucket
    pub fn category(kind: ChartKind, title: &str, bucket: &Bucket) -> Option<Self> {
        if bucket.is_empty() {
            return None;
        }
        let labels: Vec<String> = bucket.keys().cloned().collect();
        let values: Vec<f64> = bucket.values().copied().collect();
        let total: f64 = values.iter().sum();
        let background = palette_colors(labels.len());
        let border = background.iter().map(|c| c.opaque()).collect();

        Some(Self {
            kind,
            title: format!("{} - Total: R$ {:.2}", title, total),
            labels,
            datasets: vec![Dataset {
                label: title.to_string(),
                values,
                background,
                border,
                border_width: 1,
                fill: false,
            }],
            show_legend: kind.is_radial(),
            show_axes: !kind.is_radial(),
            x_axis_title: None,
            y_axis_title: None,
        })
    }

    /// Two-series line chart over the union of both buckets' months.
    /// A month missing from one series counts as zero there.
    pub fn monthly(expenses: &Bucket, per_diems: &Bucket) -> Option<Self> {
        let months: BTreeSet<&String> = expenses.keys().chain(per_diems.keys()).collect();
        if months.is_empty() {
            return None;
        }
        let series = |bucket: &Bucket| -> Vec<f64> {
            months.iter().map(|m| bucket.get(*m).copied().unwrap_or(0.0)).collect()
        };
        let line = |label: &str, color: Rgba, values: Vec<f64>| Dataset {
            label: label.to_string(),
            values,
            background: vec![color.with_alpha(0.1)],
            border: vec![color],
            border_width: 2,
            fill: true,
        };

        Some(Self {
            kind: ChartKind::Line,
            title: ChartSlot::Monthly.title().to_string(),
            labels: months.iter().map(|m| format_month_year(m)).collect(),
            datasets: vec![
                line("Gastos", EXPENSE_LINE, series(expenses)),
                line("Diárias", PER_DIEM_LINE, series(per_diems)),
            ],
            show_legend: true,
            show_axes: true,
            x_axis_title: Some("Mês".to_string()),
            y_axis_title: Some("Valor (R$)".to_string()),
        })
    }

    /// Labels as drawn on the category axis; bar charts truncate long names
    pub fn axis_labels(&self) -> Vec<String> {
        match self.kind {
            ChartKind::Bar | ChartKind::HorizontalBar => {
                self.labels.iter().map(|l| truncate_label(l)).collect()
            }
            _ => self.labels.clone(),
        }
    }

    /// Largest value across every dataset, used to size the value axis
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// A chart drawn on some canvas
pub trait ChartHandle {
    /// Release the chart and clear whatever it drew
    fn destroy(self);
}

/// Anything able to draw a [`ChartConfig`] on a canvas
pub trait ChartBackend {
    type Handle: ChartHandle;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<Self::Handle, ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Absent,
    Rendered,
}

/// Owns the chart backend, the last analysis result and the live charts.
pub struct ChartController<B: ChartBackend> {
    backend: B,
    current: Option<AnalysisResult>,
    live: BTreeMap<ChartSlot, B::Handle>,
}

impl<B: ChartBackend> ChartController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            live: BTreeMap::new(),
        }
    }

    /// Replace the current dataset without drawing
    pub fn store(&mut self, analysis: AnalysisResult) {
        self.current = Some(analysis);
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    /// Whether the view should lay out a canvas (true) or a placeholder for `slot`
    pub fn has_data(&self, slot: ChartSlot) -> bool {
        self.current.as_ref().map(|a| slot.has_data(a)).unwrap_or(false)
    }

    /// Redraw every slot from the current dataset.
    ///
    /// Returns the slots whose chart could not be created; those stay absent.
    pub fn redraw(&mut self) -> Vec<(ChartSlot, ChartError)> {
        let mut failures = Vec::new();
        for slot in ChartSlot::ALL {
            if let Some(handle) = self.live.remove(&slot) {
                handle.destroy();
            }
            let config = match self.current.as_ref().and_then(|a| slot.config(a)) {
                Some(config) => config,
                None => continue,
            };
            match self.backend.create(slot.canvas_id(), &config) {
                Ok(handle) => {
                    self.live.insert(slot, handle);
                }
                Err(err) => failures.push((slot, err)),
            }
        }
        failures
    }

    /// Store and draw in one step
    pub fn render(&mut self, analysis: AnalysisResult) -> Vec<(ChartSlot, ChartError)> {
        self.store(analysis);
        self.redraw()
    }

    pub fn state(&self, slot: ChartSlot) -> SlotState {
        if self.live.contains_key(&slot) {
            SlotState::Rendered
        } else {
            SlotState::Absent
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Destroy every live chart, keeping the dataset
    pub fn destroy_all(&mut self) {
        for (_, handle) in std::mem::take(&mut self.live) {
            handle.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Live chart count per canvas, shared between the fake backend and its handles
    type Registry = Rc<RefCell<HashMap<String, i32>>>;

    struct FakeHandle {
        canvas: String,
        registry: Registry,
    }

    impl ChartHandle for FakeHandle {
        fn destroy(self) {
            *self.registry.borrow_mut().entry(self.canvas).or_insert(0) -= 1;
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        registry: Registry,
        fail_on: Option<&'static str>,
        created: usize,
    }

    impl ChartBackend for FakeBackend {
        type Handle = FakeHandle;

        fn create(&mut self, canvas_id: &str, _config: &ChartConfig) -> Result<FakeHandle, ChartError> {
            if self.fail_on == Some(canvas_id) {
                return Err(ChartError::CanvasNotFound(canvas_id.to_string()));
            }
            self.created += 1;
            *self.registry.borrow_mut().entry(canvas_id.to_string()).or_insert(0) += 1;
            Ok(FakeHandle {
                canvas: canvas_id.to_string(),
                registry: self.registry.clone(),
            })
        }
    }

    fn bucket(entries: &[(&str, f64)]) -> Bucket {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn full_analysis() -> AnalysisResult {
        let mut analysis = AnalysisResult::default();
        analysis.gastos.por_tipo = bucket(&[("Combustivel", 180.0), ("Manutencao", 350.5)]);
        analysis.gastos.por_veiculo = bucket(&[("Carro A", 530.5)]);
        analysis.gastos.por_placa = bucket(&[("ABC-1234", 530.5)]);
        analysis.gastos.mensal = bucket(&[("2024-01", 530.5)]);
        analysis.diarias.por_motorista = bucket(&[("João Silva", 450.0)]);
        analysis.diarias.mensal = bucket(&[("2024-02", 450.0)]);
        analysis
    }

    #[test]
    fn test_rendering_twice_keeps_one_chart_per_canvas() {
        let backend = FakeBackend::default();
        let registry = backend.registry.clone();
        let mut controller = ChartController::new(backend);

        controller.render(full_analysis());
        controller.render(full_analysis());

        assert_eq!(controller.live_count(), 5);
        for slot in ChartSlot::ALL {
            assert_eq!(registry.borrow().get(slot.canvas_id()), Some(&1), "{:?}", slot);
            assert_eq!(controller.state(slot), SlotState::Rendered);
        }
    }

    #[test]
    fn test_empty_bucket_leaves_slot_absent() {
        let backend = FakeBackend::default();
        let registry = backend.registry.clone();
        let mut controller = ChartController::new(backend);
        controller.render(full_analysis());

        let mut analysis = full_analysis();
        analysis.gastos.por_tipo = Bucket::new();
        controller.render(analysis);

        assert_eq!(controller.state(ChartSlot::ByType), SlotState::Absent);
        assert!(!controller.has_data(ChartSlot::ByType));
        assert_eq!(registry.borrow().get("graficoPorTipo"), Some(&0));
        assert_eq!(controller.live_count(), 4);
    }

    #[test]
    fn test_creation_failure_leaves_slot_absent() {
        let backend = FakeBackend {
            fail_on: Some("graficoPorPlaca"),
            ..Default::default()
        };
        let mut controller = ChartController::new(backend);
        let failures = controller.render(full_analysis());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, ChartSlot::ByPlate);
        assert_eq!(controller.state(ChartSlot::ByPlate), SlotState::Absent);
        assert_eq!(controller.live_count(), 4);
    }

    #[test]
    fn test_destroy_all() {
        let backend = FakeBackend::default();
        let registry = backend.registry.clone();
        let mut controller = ChartController::new(backend);
        controller.render(full_analysis());
        controller.destroy_all();
        assert_eq!(controller.live_count(), 0);
        assert!(registry.borrow().values().all(|count| *count == 0));
        assert!(controller.current().is_some());
    }

    #[test]
    fn test_category_config() {
        let config = ChartSlot::ByType.config(&full_analysis()).unwrap();
        assert_eq!(config.kind, ChartKind::Pie);
        assert_eq!(config.title, "Gastos por Tipo - Total: R$ 530.50");
        assert!(config.show_legend);
        assert!(!config.show_axes);
        assert_eq!(config.datasets[0].background[0].a, 0.6);
        assert_eq!(config.datasets[0].border[0].a, 1.0);
    }

    #[test]
    fn test_bar_labels_truncate() {
        let config = ChartConfig::category(
            ChartKind::Bar,
            "Gastos por Veículo",
            &bucket(&[("Caminhão Baú Refrigerado", 10.0)]),
        )
        .unwrap();
        assert!(config.show_axes);
        assert_eq!(config.axis_labels(), vec!["Caminhão Baú Re...".to_string()]);
        assert_eq!(config.labels[0], "Caminhão Baú Refrigerado");
    }

    #[test]
    fn test_monthly_merges_union_of_months() {
        let config = ChartConfig::monthly(
            &bucket(&[("2024-03", 100.0), ("2024-01", 50.0)]),
            &bucket(&[("2024-02", 30.0), ("2024-03", 20.0)]),
        )
        .unwrap();
        assert_eq!(config.labels, vec!["jan. de 2024", "fev. de 2024", "mar. de 2024"]);
        assert_eq!(config.datasets[0].label, "Gastos");
        assert_eq!(config.datasets[0].values, vec![50.0, 0.0, 100.0]);
        assert_eq!(config.datasets[1].values, vec![0.0, 30.0, 20.0]);
        assert_eq!(config.max_value(), 100.0);
        assert_eq!(config.y_axis_title.as_deref(), Some("Valor (R$)"));
    }

    #[test]
    fn test_monthly_with_only_per_diems_still_renders() {
        let mut analysis = AnalysisResult::default();
        analysis.diarias.mensal = bucket(&[("2024-05", 300.0)]);
        assert!(ChartSlot::Monthly.has_data(&analysis));
        assert!(ChartSlot::Monthly.config(&analysis).is_some());
        assert!(ChartSlot::ByType.config(&analysis).is_none());
    }
}
