pub mod expense_form;
pub mod per_diem_form;

pub use expense_form::ExpenseFormView;
pub use per_diem_form::PerDiemFormView;
