//! Calculation logic for the payroll engine.
//!
//! Every function here is pure. It reads the values it is given, returns a
//! new value or an [`EngineError`](crate::error::EngineError), and performs
//! no I/O. Calculators are layered leaves first: hours and pay feed the
//! report assembler, whose reports feed the manager report and KPIs.

mod attendance;
mod hours;
mod kpi;
mod manager_report;
mod overtime_suggestion;
mod pay;
mod report_assembler;

pub use attendance::{
    PERCENTAGE_SCALE, attendance_percentage, classify_attendance, monthly_attendance_percentage,
    resolve_status,
};
pub use hours::calculate_hours;
pub use kpi::calculate_manager_kpis;
pub use manager_report::{calculate_manager_report, summarize_employee};
pub use overtime_suggestion::suggest_overtime;
pub use pay::{PayCalculation, PayInput, calculate_pay};
pub use report_assembler::assemble_report;
