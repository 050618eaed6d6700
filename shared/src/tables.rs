//! Row models for the maintenance and per-diem tables.
//!
//! Components render these directly; every cell is already a display string so
//! the markup carries no formatting logic.

use chrono::NaiveDate;

use crate::format::{format_currency, format_date, format_optional_date};
use crate::{Expense, MaintenanceSummary, PerDiem, RecordId, WarrantyStatus};

pub const MAINTENANCE_COLUMNS: [&str; 10] = [
    "ID",
    "Data",
    "Veículo",
    "Placa",
    "Motorista",
    "Valor (R$)",
    "Nº OS",
    "Validade Garantia",
    "Status",
    "Ações",
];

pub const PER_DIEM_COLUMNS: [&str; 7] = [
    "Motorista",
    "Período",
    "Dias",
    "Valor Diária",
    "Valor Total",
    "Observações",
    "Ações",
];

pub const EMPTY_MAINTENANCE: &str = "Nenhum serviço de manutenção registrado.";
pub const EMPTY_PER_DIEMS: &str = "Nenhuma diária registrada.";

/// Table body: either data rows or one placeholder row spanning every column
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<R> {
    Placeholder { message: &'static str, colspan: usize },
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    fn build(rows: Vec<R>, message: &'static str, colspan: usize) -> Self {
        if rows.is_empty() {
            TableBody::Placeholder { message, colspan }
        } else {
            TableBody::Rows(rows)
        }
    }

    /// Number of `<tr>` elements the body renders
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder { .. } => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }
}

fn or_dash(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRow {
    pub id: RecordId,
    pub date: String,
    pub vehicle: String,
    pub plate: String,
    pub driver: String,
    pub amount: String,
    pub service_order: String,
    pub warranty_expiry: String,
    pub status: WarrantyStatus,
}

impl MaintenanceRow {
    /// A missing backend status is derived from the warranty date as of `today`
    pub fn new(expense: &Expense, today: NaiveDate) -> Self {
        Self {
            id: expense.id.clone(),
            date: format_date(&expense.date),
            vehicle: or_dash(Some(&expense.vehicle)),
            plate: or_dash(Some(&expense.plate)),
            driver: or_dash(Some(&expense.driver)),
            amount: format_currency(expense.amount),
            service_order: or_dash(expense.service_order.as_deref()),
            warranty_expiry: format_optional_date(expense.warranty_expiry.as_deref()),
            status: expense.warranty_status_on(today),
        }
    }
}

pub fn maintenance_body(expenses: &[Expense], today: NaiveDate) -> TableBody<MaintenanceRow> {
    TableBody::build(
        expenses.iter().map(|e| MaintenanceRow::new(e, today)).collect(),
        EMPTY_MAINTENANCE,
        MAINTENANCE_COLUMNS.len(),
    )
}

/// "2 vigentes • 1 vencidas • 0 sem data"
pub fn maintenance_summary_line(summary: &MaintenanceSummary) -> String {
    format!(
        "{} vigentes • {} vencidas • {} sem data",
        summary.vigentes, summary.vencidas, summary.sem_data
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerDiemRow {
    /// Kept whole so the edit action can load it into the form
    pub record: PerDiem,
    pub driver: String,
    pub period: String,
    pub days: String,
    pub daily_rate: String,
    pub total: String,
    pub notes: String,
}

impl From<&PerDiem> for PerDiemRow {
    fn from(per_diem: &PerDiem) -> Self {
        Self {
            record: per_diem.clone(),
            driver: or_dash(Some(&per_diem.driver)),
            period: format!(
                "{} a {}",
                format_date(&per_diem.start_date),
                format_date(&per_diem.end_date)
            ),
            days: per_diem.day_count.to_string(),
            daily_rate: format_currency(per_diem.daily_rate),
            total: format_currency(per_diem.total),
            notes: or_dash(per_diem.notes.as_deref()),
        }
    }
}

pub fn per_diem_body(per_diems: &[PerDiem]) -> TableBody<PerDiemRow> {
    TableBody::build(
        per_diems.iter().map(PerDiemRow::from).collect(),
        EMPTY_PER_DIEMS,
        PER_DIEM_COLUMNS.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExpenseList;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn expense(id: i64, status: WarrantyStatus) -> Expense {
        Expense {
            id: RecordId::Number(id),
            date: "2024-01-15".to_string(),
            vehicle: "Carro A".to_string(),
            plate: "ABC-1234".to_string(),
            driver: "João Silva".to_string(),
            expense_type: "Manutencao".to_string(),
            amount: 350.5,
            invoice_number: None,
            service_order: None,
            warranty_expiry: None,
            notes: None,
            registered_at: None,
            warranty_status: Some(status),
        }
    }

    #[test]
    fn test_empty_maintenance_has_single_placeholder_row() {
        let body = maintenance_body(&[], today());
        assert_eq!(body.row_count(), 1);
        assert_eq!(
            body,
            TableBody::Placeholder { message: EMPTY_MAINTENANCE, colspan: MAINTENANCE_COLUMNS.len() }
        );
    }

    #[test]
    fn test_maintenance_row_cells() {
        let mut record = expense(7, WarrantyStatus::Vigente);
        record.warranty_expiry = Some("2024-07-15".to_string());
        let row = MaintenanceRow::new(&record, today());
        assert_eq!(row.date, "15/01/2024");
        assert_eq!(row.amount, "R$ 350.50");
        assert_eq!(row.service_order, "-");
        assert_eq!(row.warranty_expiry, "15/07/2024");
        assert_eq!(row.status.css_class(), "status-vigente");
    }

    #[test]
    fn test_summary_line() {
        let mut records = vec![
            expense(1, WarrantyStatus::Vigente),
            expense(2, WarrantyStatus::Vigente),
            expense(3, WarrantyStatus::Vencida),
        ];
        for record in &mut records {
            record.warranty_expiry = Some("2024-07-15".to_string());
        }
        let summary = MaintenanceSummary::from_expenses(&records, today());
        assert_eq!(maintenance_summary_line(&summary), "2 vigentes • 1 vencidas • 0 sem data");
    }

    #[test]
    fn test_rows_derive_missing_status_from_expiry() {
        let list: ExpenseList = serde_json::from_str(
            r#"{"gastos": [
                {"id": 1, "tipo_gasto": "Manutencao", "garantia_validade": "2099-01-01"},
                {"id": 2, "tipo_gasto": "Combustivel", "valor": "180"},
                {"id": 3, "tipo_gasto": "Manutencao", "garantia_validade": "2024-05-31"}
            ]}"#,
        )
        .unwrap();
        let (services, summary) = list.maintenance_view(today());
        assert_eq!(maintenance_summary_line(&summary), "1 vigentes • 1 vencidas • 0 sem data");
        match maintenance_body(&services, today()) {
            TableBody::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].id, RecordId::Number(1));
                assert_eq!(rows[0].status, WarrantyStatus::Vigente);
                assert_eq!(rows[0].warranty_expiry, "01/01/2099");
                assert_eq!(rows[1].status, WarrantyStatus::Vencida);
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_per_diem_rows() {
        assert_eq!(
            per_diem_body(&[]),
            TableBody::Placeholder { message: EMPTY_PER_DIEMS, colspan: 7 }
        );
        let record = PerDiem {
            id: RecordId::Number(1),
            driver: "Maria Santos".to_string(),
            start_date: "2024-01-10".to_string(),
            end_date: "2024-01-12".to_string(),
            daily_rate: 150.0,
            day_count: 3.0,
            total: 450.0,
            notes: None,
        };
        match per_diem_body(std::slice::from_ref(&record)) {
            TableBody::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].period, "10/01/2024 a 12/01/2024");
                assert_eq!(rows[0].days, "3");
                assert_eq!(rows[0].total, "R$ 450.00");
                assert_eq!(rows[0].notes, "-");
                assert_eq!(rows[0].record, record);
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }
}
