pub mod auth;
pub use auth::AuthService;
pub mod commission;
pub mod payment_service;
pub use payment_service::PaymentService;
pub mod expense_service;
pub use expense_service::ExpenseService;
pub mod attendant_service;
pub use attendant_service::AttendantService;
pub mod tripeiro_service;
pub use tripeiro_service::TripeiroService;
pub mod note_service;
pub use note_service::NoteService;
pub mod reminder_service;
pub use reminder_service::ReminderService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod report_service;
pub use report_service::ReportService;
pub mod admin_service;
pub use admin_service::AdminService;
