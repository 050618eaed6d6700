//! Transport records and view logic shared by the fleet dashboard front end.
//!
//! The types in this file mirror the JSON the fleet backend sends. Field names
//! keep the backend's Portuguese keys so serde can map them one to one; the
//! Rust-facing names are the English ones.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod api;
pub mod charts;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod format;
pub mod forms;
pub mod generation;
pub mod live;
pub mod notifications;
pub mod per_diem;
pub mod query;
pub mod tables;
pub mod tabs;
pub mod workflow;

pub use error::{ChartError, RequestFailure};

/// Identifier assigned by the backend.
///
/// Expenses use sequential integers while per-diem records have historically
/// been keyed by a timestamp string, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(value.trim().to_string()),
        }
    }
}

/// The two record collections the dashboard can mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Expenses,
    PerDiems,
}

impl Resource {
    /// Collection path relative to the API base
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Expenses => "/gastos",
            Resource::PerDiems => "/diarias",
        }
    }

    pub fn item_path(&self, id: &RecordId) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Noun used in user-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            Resource::Expenses => "gasto",
            Resource::PerDiems => "diária",
        }
    }

    /// Noun with its definite article ("o gasto", "a diária")
    pub fn noun_with_article(&self) -> &'static str {
        match self {
            Resource::Expenses => "o gasto",
            Resource::PerDiems => "a diária",
        }
    }
}

/// Warranty state derived by the backend for maintenance expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum WarrantyStatus {
    Vigente,
    Vencida,
    #[default]
    SemData,
    DataInvalida,
}

impl WarrantyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WarrantyStatus::Vigente => "Vigente",
            WarrantyStatus::Vencida => "Vencida",
            WarrantyStatus::SemData => "Sem Data",
            WarrantyStatus::DataInvalida => "Data Inválida",
        }
    }

    /// Status of a warranty expiring on `expiry`, as of `today`.
    /// The expiry day itself still counts as covered.
    pub fn from_expiry(expiry: Option<&str>, today: NaiveDate) -> Self {
        let expiry = match expiry.map(str::trim).filter(|v| !v.is_empty()) {
            Some(expiry) => expiry,
            None => return WarrantyStatus::SemData,
        };
        match format::parse_iso_date(expiry) {
            Some(date) if date < today => WarrantyStatus::Vencida,
            Some(_) => WarrantyStatus::Vigente,
            None => WarrantyStatus::DataInvalida,
        }
    }

    /// CSS class used for the status badge
    pub fn css_class(&self) -> &'static str {
        match self {
            WarrantyStatus::Vigente => "status-vigente",
            WarrantyStatus::Vencida => "status-vencida",
            WarrantyStatus::SemData => "status-sem-data",
            WarrantyStatus::DataInvalida => "status-invalida",
        }
    }
}

impl From<Option<String>> for WarrantyStatus {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some("Vigente") => WarrantyStatus::Vigente,
            Some("Vencida") => WarrantyStatus::Vencida,
            Some("Data Inválida") => WarrantyStatus::DataInvalida,
            _ => WarrantyStatus::SemData,
        }
    }
}

impl From<WarrantyStatus> for String {
    fn from(value: WarrantyStatus) -> Self {
        value.label().to_string()
    }
}

/// Expense (gasto) as listed by `GET /gastos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    #[serde(rename = "data", default)]
    pub date: String,
    #[serde(rename = "veiculo", default)]
    pub vehicle: String,
    #[serde(rename = "placa", default)]
    pub plate: String,
    #[serde(rename = "motorista", default)]
    pub driver: String,
    #[serde(rename = "tipo_gasto", default)]
    pub expense_type: String,
    /// The backend stores whatever the form posted, so this may arrive as a string
    #[serde(rename = "valor", default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(rename = "nf_numero", default, deserialize_with = "lenient_opt_string")]
    pub invoice_number: Option<String>,
    #[serde(rename = "os_numero", default, deserialize_with = "lenient_opt_string")]
    pub service_order: Option<String>,
    #[serde(rename = "garantia_validade", default, deserialize_with = "lenient_opt_string")]
    pub warranty_expiry: Option<String>,
    #[serde(rename = "observacoes", default, deserialize_with = "lenient_opt_string")]
    pub notes: Option<String>,
    #[serde(rename = "data_registro", default, deserialize_with = "lenient_opt_string")]
    pub registered_at: Option<String>,
    /// `None` when the backend did not compute a status
    #[serde(rename = "status_garantia", default, skip_serializing_if = "Option::is_none")]
    pub warranty_status: Option<WarrantyStatus>,
}

impl Expense {
    pub fn is_maintenance(&self) -> bool {
        matches!(
            self.expense_type.trim().to_lowercase().as_str(),
            "manutencao" | "manutenção"
        )
    }

    /// Status sent by the backend, or derived from the warranty date
    pub fn warranty_status_on(&self, today: NaiveDate) -> WarrantyStatus {
        self.warranty_status
            .unwrap_or_else(|| WarrantyStatus::from_expiry(self.warranty_expiry.as_deref(), today))
    }

    fn has_warranty_date(&self) -> bool {
        self.warranty_expiry
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }
}

/// Per-diem (diária) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerDiem {
    pub id: RecordId,
    #[serde(rename = "motorista", default)]
    pub driver: String,
    #[serde(rename = "data_inicio", default)]
    pub start_date: String,
    #[serde(rename = "data_fim", default)]
    pub end_date: String,
    #[serde(rename = "valor_diaria_unitaria", default, deserialize_with = "lenient_f64")]
    pub daily_rate: f64,
    #[serde(rename = "dias_uteis", default, deserialize_with = "lenient_f64")]
    pub day_count: f64,
    #[serde(rename = "valor_total", default, deserialize_with = "lenient_f64")]
    pub total: f64,
    #[serde(rename = "observacoes", default, deserialize_with = "lenient_opt_string")]
    pub notes: Option<String>,
}

/// Warranty counts shown above the maintenance table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaintenanceSummary {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub vigentes: u32,
    #[serde(default)]
    pub vencidas: u32,
    #[serde(default)]
    pub sem_data: u32,
}

impl MaintenanceSummary {
    /// Count warranties locally when the backend did not send a summary.
    /// `sem_data` counts records without a warranty date.
    pub fn from_expenses(expenses: &[Expense], today: NaiveDate) -> Self {
        let mut summary = MaintenanceSummary {
            total: Some(expenses.len() as u32),
            ..Default::default()
        };
        for expense in expenses {
            match expense.warranty_status_on(today) {
                WarrantyStatus::Vigente => summary.vigentes += 1,
                WarrantyStatus::Vencida => summary.vencidas += 1,
                WarrantyStatus::SemData | WarrantyStatus::DataInvalida => {}
            }
            if !expense.has_warranty_date() {
                summary.sem_data += 1;
            }
        }
        summary
    }
}

/// Payload of `GET /gastos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseList {
    #[serde(rename = "gastos", default)]
    pub expenses: Vec<Expense>,
    #[serde(rename = "resumo", default)]
    pub summary: Option<MaintenanceSummary>,
}

impl ExpenseList {
    /// Records and counts for the maintenance view.
    ///
    /// A backend summary is taken as is. Without one, the plain expense list is
    /// narrowed to maintenance records and counted here.
    pub fn maintenance_view(&self, today: NaiveDate) -> (Vec<Expense>, MaintenanceSummary) {
        match &self.summary {
            Some(summary) => (self.expenses.clone(), summary.clone()),
            None => {
                let services: Vec<Expense> =
                    self.expenses.iter().filter(|e| e.is_maintenance()).cloned().collect();
                let summary = MaintenanceSummary::from_expenses(&services, today);
                (services, summary)
            }
        }
    }
}

/// Payload of `GET /diarias`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerDiemList {
    #[serde(rename = "diarias", default)]
    pub per_diems: Vec<PerDiem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_gastos: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_diarias: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gastos_mes_atual: f64,
    #[serde(default)]
    pub diarias_mes_atual: Option<f64>,
    #[serde(default)]
    pub total_veiculos: u32,
    #[serde(default)]
    pub total_motoristas: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardAlerts {
    #[serde(default)]
    pub servicos_vencidos: u32,
    #[serde(default)]
    pub servicos_sem_garantia: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub resumo: DashboardSummary,
    #[serde(default)]
    pub alertas: DashboardAlerts,
}

/// Payload of `GET /dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub dashboard: Dashboard,
}

/// Category or month label mapped to a summed amount
pub type Bucket = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseAnalysis {
    #[serde(default)]
    pub por_tipo: Bucket,
    #[serde(default)]
    pub por_veiculo: Bucket,
    #[serde(default)]
    pub por_placa: Bucket,
    #[serde(default)]
    pub mensal: Bucket,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerDiemAnalysis {
    #[serde(default)]
    pub por_motorista: Bucket,
    #[serde(default)]
    pub mensal: Bucket,
}

/// Server-computed aggregation used to drive the charts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub gastos: ExpenseAnalysis,
    #[serde(default)]
    pub diarias: PerDiemAnalysis,
}

/// Payload of `GET /analise`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analise: AnalysisResult,
}

/// Known values for the analysis filter selectors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub veiculos: Vec<String>,
    #[serde(default)]
    pub placas: Vec<String>,
    #[serde(default)]
    pub motoristas_gastos: Vec<String>,
    #[serde(default)]
    pub motoristas_diarias: Vec<String>,
    #[serde(default)]
    pub anos: Vec<String>,
}

/// Payload of `GET /filtros`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub filtros: FilterOptions,
}

/// Body of a successful POST/PUT/DELETE
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub mensagem: Option<String>,
    #[serde(default)]
    pub id: Option<RecordId>,
}

impl MutationAck {
    pub fn message_or_default(&self) -> String {
        self.mensagem
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Operação realizada com sucesso!".to_string())
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Optional text that may arrive as null, a number or an empty string.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_accepts_string_amount_and_missing_status() {
        let json = r#"{
            "id": 3,
            "data": "2024-02-01",
            "veiculo": "Carro A",
            "placa": "ABC-1234",
            "motorista": "João Silva",
            "tipo_gasto": "Manutencao",
            "valor": "350.50",
            "os_numero": "",
            "garantia_validade": null
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, RecordId::Number(3));
        assert_eq!(expense.amount, 350.5);
        assert_eq!(expense.service_order, None);
        assert_eq!(expense.warranty_expiry, None);
        assert_eq!(expense.warranty_status, None);
        assert_eq!(expense.warranty_status_on(NaiveDate::default()), WarrantyStatus::SemData);
        assert!(expense.is_maintenance());
    }

    #[test]
    fn test_warranty_status_decoding() {
        let status: WarrantyStatus = serde_json::from_str("\"Vencida\"").unwrap();
        assert_eq!(status, WarrantyStatus::Vencida);
        let status: WarrantyStatus = serde_json::from_str("\"Data Inválida\"").unwrap();
        assert_eq!(status, WarrantyStatus::DataInvalida);
        assert_eq!(serde_json::to_string(&WarrantyStatus::SemData).unwrap(), "\"Sem Data\"");
    }

    #[test]
    fn test_per_diem_with_text_id() {
        let json = r#"{
            "id": "20240115103000",
            "motorista": "João Silva",
            "data_inicio": "2024-01-10",
            "data_fim": "2024-01-12",
            "dias_uteis": 3,
            "valor_diaria_unitaria": 150.0,
            "valor_total": 450.0,
            "observacoes": "Viagem para clientes"
        }"#;
        let per_diem: PerDiem = serde_json::from_str(json).unwrap();
        assert_eq!(per_diem.id, RecordId::Text("20240115103000".to_string()));
        assert_eq!(per_diem.day_count, 3.0);
        assert_eq!(per_diem.total, 450.0);
    }

    #[test]
    fn test_record_id_from_str() {
        assert_eq!(RecordId::from("42"), RecordId::Number(42));
        assert_eq!(RecordId::from("abc"), RecordId::Text("abc".to_string()));
        assert_eq!(Resource::PerDiems.item_path(&RecordId::from(7)), "/diarias/7");
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_warranty_status_from_expiry() {
        let today = day(2024, 6, 1);
        assert_eq!(WarrantyStatus::from_expiry(Some("2024-05-31"), today), WarrantyStatus::Vencida);
        assert_eq!(WarrantyStatus::from_expiry(Some("2024-06-01"), today), WarrantyStatus::Vigente);
        assert_eq!(WarrantyStatus::from_expiry(Some("2099-01-01"), today), WarrantyStatus::Vigente);
        assert_eq!(WarrantyStatus::from_expiry(Some(""), today), WarrantyStatus::SemData);
        assert_eq!(WarrantyStatus::from_expiry(None, today), WarrantyStatus::SemData);
        assert_eq!(WarrantyStatus::from_expiry(Some("31/12/2024"), today), WarrantyStatus::DataInvalida);
    }

    #[test]
    fn test_maintenance_view_without_summary_keeps_only_maintenance() {
        let list: ExpenseList = serde_json::from_str(
            r#"{"gastos": [
                {"id": 1, "tipo_gasto": "Manutencao", "garantia_validade": "2099-01-01"},
                {"id": 2, "tipo_gasto": "Combustivel", "valor": "180"},
                {"id": 3, "tipo_gasto": "manutenção", "garantia_validade": "2020-03-10"},
                {"id": 4, "tipo_gasto": "MANUTENCAO"},
                {"id": 5, "tipo_gasto": "Pedagio", "garantia_validade": "2099-01-01"}
            ]}"#,
        )
        .unwrap();
        let (services, summary) = list.maintenance_view(day(2024, 6, 1));
        let ids: Vec<RecordId> = services.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::Number(1), RecordId::Number(3), RecordId::Number(4)]);
        assert_eq!(summary.total, Some(3));
        assert_eq!(summary.vigentes, 1);
        assert_eq!(summary.vencidas, 1);
        assert_eq!(summary.sem_data, 1);
    }

    #[test]
    fn test_sent_status_wins_over_expiry() {
        let list: ExpenseList = serde_json::from_str(
            r#"{"gastos": [
                {"id": 1, "tipo_gasto": "Manutencao", "garantia_validade": "2099-01-01", "status_garantia": "Vencida"},
                {"id": 2, "tipo_gasto": "Manutencao", "status_garantia": "Vigente"}
            ]}"#,
        )
        .unwrap();
        let (_, summary) = list.maintenance_view(day(2024, 6, 1));
        assert_eq!(summary.vigentes, 1);
        assert_eq!(summary.vencidas, 1);
        assert_eq!(summary.sem_data, 1);
    }

    #[test]
    fn test_backend_summary_taken_as_is() {
        let list: ExpenseList = serde_json::from_str(
            r#"{"gastos": [{"id": 1, "tipo_gasto": "Combustivel"}],
                "resumo": {"vigentes": 4, "vencidas": 2, "sem_data": 1}}"#,
        )
        .unwrap();
        let (services, summary) = list.maintenance_view(day(2024, 6, 1));
        assert_eq!(services.len(), 1);
        assert_eq!((summary.vigentes, summary.vencidas, summary.sem_data), (4, 2, 1));
    }

    #[test]
    fn test_analysis_missing_buckets_default_empty() {
        let analysis: AnalysisResult =
            serde_json::from_str(r#"{"gastos": {"por_tipo": {"Combustivel": 180.0}}}"#).unwrap();
        assert_eq!(analysis.gastos.por_tipo.len(), 1);
        assert!(analysis.gastos.mensal.is_empty());
        assert!(analysis.diarias.por_motorista.is_empty());
    }
}
