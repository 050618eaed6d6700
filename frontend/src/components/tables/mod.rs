pub mod maintenance_table;
pub mod per_diem_table;

pub use maintenance_table::MaintenanceTable;
pub use per_diem_table::PerDiemTable;
