// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Payments ---
        handlers::payments::list_payments,
        handlers::payments::get_payment,
        handlers::payments::create_payment,
        handlers::payments::update_payment,
        handlers::payments::delete_payment,
        handlers::payments::payment_stats,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,

        // --- Reports ---
        handlers::reports::generate_report,
    ),
    components(
        schemas(
            // --- Payments ---
            models::payment::PaymentType,
            models::payment::PaymentStatus,
            models::payment::Payment,
            models::payment::PaymentWithNames,
            models::payment::CreatePaymentPayload,
            models::payment::UpdatePaymentPayload,
            models::payment::PaymentStats,

            // --- Dashboard ---
            models::dashboard::DashboardMetrics,
            models::dashboard::TopAttendant,
            models::dashboard::LatestPayment,
            models::dashboard::LatestExpense,
            models::dashboard::DashboardResponse,

            // --- Notas e lembretes (aparecem no painel) ---
            models::note::Note,
            models::reminder::Reminder,
            models::reminder::ReminderPriority,
            models::reminder::ReminderStatus,

            // --- Reports ---
            models::report::ReportSummary,
            models::report::CategoryBreakdown,
            models::report::AttendantBreakdown,
            models::report::TripeiroBreakdown,
            models::report::MonthlyTrendEntry,
            models::report::ReportResponse,
        )
    ),
    tags(
        (name = "Payments", description = "Pagamentos e comissões"),
        (name = "Dashboard", description = "Métricas financeiras do tenant"),
        (name = "Reports", description = "Relatórios consolidados")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
