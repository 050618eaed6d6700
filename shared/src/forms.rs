//! Form models for expenses and per-diems.
//!
//! A form is in create mode while `editing_id` is `None` and in edit mode
//! otherwise. Submitting produces a [`Submission`]: POST to the collection in
//! create mode, PUT to the item in edit mode, with the fields flattened into a
//! string map the way a browser serializes a form.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::format::strip_numeric_display;
use crate::per_diem::DerivedDisplay;
use crate::{Expense, PerDiem, RecordId, Resource};

/// Flat field-name → value mapping sent as the JSON body
pub type FormPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Post,
    Put,
}

impl SubmitMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitMethod::Post => "POST",
            SubmitMethod::Put => "PUT",
        }
    }
}

/// A ready-to-send create or update request
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub resource: Resource,
    pub id: Option<RecordId>,
    pub payload: FormPayload,
}

impl Submission {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn method(&self) -> SubmitMethod {
        if self.is_edit() {
            SubmitMethod::Put
        } else {
            SubmitMethod::Post
        }
    }

    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => self.resource.item_path(id),
            None => self.resource.path().to_string(),
        }
    }

    /// "registrar" or "editar", for error messages
    pub fn verb(&self) -> &'static str {
        if self.is_edit() {
            "editar"
        } else {
            "registrar"
        }
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn number_input(value: f64) -> String {
    value.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Date,
    Vehicle,
    Plate,
    Driver,
    ExpenseType,
    Amount,
    InvoiceNumber,
    ServiceOrder,
    WarrantyExpiry,
    Notes,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 10] = [
        ExpenseField::Date,
        ExpenseField::Vehicle,
        ExpenseField::Plate,
        ExpenseField::Driver,
        ExpenseField::ExpenseType,
        ExpenseField::Amount,
        ExpenseField::InvoiceNumber,
        ExpenseField::ServiceOrder,
        ExpenseField::WarrantyExpiry,
        ExpenseField::Notes,
    ];

    /// Form field name, which is also the backend key
    pub fn name(&self) -> &'static str {
        match self {
            ExpenseField::Date => "data",
            ExpenseField::Vehicle => "veiculo",
            ExpenseField::Plate => "placa",
            ExpenseField::Driver => "motorista",
            ExpenseField::ExpenseType => "tipo_gasto",
            ExpenseField::Amount => "valor",
            ExpenseField::InvoiceNumber => "nf_numero",
            ExpenseField::ServiceOrder => "os_numero",
            ExpenseField::WarrantyExpiry => "garantia_validade",
            ExpenseField::Notes => "observacoes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseField::Date => "Data",
            ExpenseField::Vehicle => "Veículo",
            ExpenseField::Plate => "Placa",
            ExpenseField::Driver => "Motorista",
            ExpenseField::ExpenseType => "Tipo de Gasto",
            ExpenseField::Amount => "Valor (R$)",
            ExpenseField::InvoiceNumber => "Nº NF",
            ExpenseField::ServiceOrder => "Nº OS",
            ExpenseField::WarrantyExpiry => "Validade da Garantia",
            ExpenseField::Notes => "Observações",
        }
    }
}

/// Expense types offered by the form's selector
pub const EXPENSE_TYPES: [&str; 5] = ["Manutencao", "Combustivel", "Pedagio", "Multa", "Outros"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseForm {
    pub editing_id: Option<RecordId>,
    values: BTreeMap<&'static str, String>,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self::default();
        form.set(ExpenseField::Date, iso(today));
        form
    }

    pub fn get(&self, field: ExpenseField) -> &str {
        self.values.get(field.name()).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: ExpenseField, value: impl Into<String>) {
        self.values.insert(field.name(), value.into());
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn legend(&self) -> String {
        match &self.editing_id {
            Some(id) => format!("✏️ Editando Gasto ID {}", id),
            None => "📝 Registrar Novo Gasto".to_string(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "💾 Salvar Edição"
        } else {
            "✅ Registrar Gasto"
        }
    }

    /// Enter edit mode, copying every field the record actually has.
    /// Fields the record lacks keep whatever the form held.
    pub fn load_from(&mut self, expense: &Expense) {
        self.editing_id = Some(expense.id.clone());
        let present = [
            (ExpenseField::Date, Some(expense.date.clone())),
            (ExpenseField::Vehicle, Some(expense.vehicle.clone())),
            (ExpenseField::Plate, Some(expense.plate.clone())),
            (ExpenseField::Driver, Some(expense.driver.clone())),
            (ExpenseField::ExpenseType, Some(expense.expense_type.clone())),
            (ExpenseField::Amount, Some(number_input(expense.amount)).filter(|_| expense.amount != 0.0)),
            (ExpenseField::InvoiceNumber, expense.invoice_number.clone()),
            (ExpenseField::ServiceOrder, expense.service_order.clone()),
            (ExpenseField::WarrantyExpiry, expense.warranty_expiry.clone()),
            (ExpenseField::Notes, expense.notes.clone()),
        ];
        for (field, value) in present {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                self.set(field, value);
            }
        }
    }

    /// Back to create mode with blank fields and today's date
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn payload(&self) -> FormPayload {
        ExpenseField::ALL
            .iter()
            .map(|field| (field.name().to_string(), self.get(*field).to_string()))
            .collect()
    }

    pub fn submission(&self) -> Submission {
        Submission {
            resource: Resource::Expenses,
            id: self.editing_id.clone(),
            payload: self.payload(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerDiemField {
    Driver,
    StartDate,
    EndDate,
    DailyRate,
    Notes,
}

impl PerDiemField {
    pub const ALL: [PerDiemField; 5] = [
        PerDiemField::Driver,
        PerDiemField::StartDate,
        PerDiemField::EndDate,
        PerDiemField::DailyRate,
        PerDiemField::Notes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PerDiemField::Driver => "motorista",
            PerDiemField::StartDate => "data_inicio",
            PerDiemField::EndDate => "data_fim",
            PerDiemField::DailyRate => "valor_diaria_unitaria",
            PerDiemField::Notes => "observacoes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerDiemField::Driver => "Motorista",
            PerDiemField::StartDate => "Data de Início",
            PerDiemField::EndDate => "Data de Fim",
            PerDiemField::DailyRate => "Valor da Diária (R$)",
            PerDiemField::Notes => "Observações",
        }
    }

    /// Changing one of these recomputes the derived fields
    pub fn affects_calculation(&self) -> bool {
        matches!(
            self,
            PerDiemField::StartDate | PerDiemField::EndDate | PerDiemField::DailyRate
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerDiemForm {
    pub editing_id: Option<RecordId>,
    editing_driver: Option<String>,
    values: BTreeMap<&'static str, String>,
    derived: DerivedDisplay,
}

impl PerDiemForm {
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self {
            editing_id: None,
            editing_driver: None,
            values: BTreeMap::new(),
            derived: DerivedDisplay::default(),
        };
        form.set(PerDiemField::StartDate, iso(today));
        form.set(PerDiemField::EndDate, iso(today));
        form
    }

    pub fn get(&self, field: PerDiemField) -> &str {
        self.values.get(field.name()).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: PerDiemField, value: impl Into<String>) {
        self.values.insert(field.name(), value.into());
        if field.affects_calculation() {
            self.recalculate();
        }
    }

    /// Recompute the day count and total displays from the current inputs
    pub fn recalculate(&mut self) {
        self.derived = DerivedDisplay::from_inputs(
            self.get(PerDiemField::StartDate),
            self.get(PerDiemField::EndDate),
            self.get(PerDiemField::DailyRate),
        );
    }

    pub fn derived(&self) -> &DerivedDisplay {
        &self.derived
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn legend(&self) -> String {
        match &self.editing_driver {
            Some(driver) if self.is_editing() => format!("✏️ Editando Diária de {}", driver),
            _ => "💰 Registrar Diária".to_string(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "💾 Salvar Edição da Diária"
        } else {
            "💰 Registrar Diária"
        }
    }

    /// Enter edit mode from a rendered row; no network round-trip needed
    pub fn load_from(&mut self, per_diem: &PerDiem) {
        self.editing_id = Some(per_diem.id.clone());
        self.editing_driver = Some(per_diem.driver.clone());
        self.values.insert(PerDiemField::Driver.name(), per_diem.driver.clone());
        self.values.insert(PerDiemField::StartDate.name(), per_diem.start_date.clone());
        self.values.insert(PerDiemField::EndDate.name(), per_diem.end_date.clone());
        self.values.insert(PerDiemField::DailyRate.name(), number_input(per_diem.daily_rate));
        self.values.insert(PerDiemField::Notes.name(), per_diem.notes.clone().unwrap_or_default());
        self.recalculate();
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Form fields plus the calculated `dias_uteis` and `valor_total`
    pub fn payload(&self) -> FormPayload {
        let mut payload: FormPayload = PerDiemField::ALL
            .iter()
            .map(|field| (field.name().to_string(), self.get(*field).to_string()))
            .collect();
        if let Some(days) = strip_numeric_display(&self.derived.days) {
            payload.insert("dias_uteis".to_string(), days);
        }
        if let Some(total) = strip_numeric_display(&self.derived.total) {
            payload.insert("valor_total".to_string(), total);
        }
        payload
    }

    pub fn submission(&self) -> Submission {
        Submission {
            resource: Resource::PerDiems,
            id: self.editing_id.clone(),
            payload: self.payload(),
        }
    }
}
