// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::OnceLock, time::Duration};

use crate::db::{
    AdminRepository, AttendantRepository, AuditRepository, DashboardRepository, ExpenseRepository,
    NoteRepository, PaymentRepository, ReminderRepository, ReportRepository, TenantRepository,
    TripeiroRepository, UserRepository,
};
use crate::services::{
    AdminService, AttendantService, AuthService, DashboardService, ExpenseService, NoteService,
    PaymentService, ReminderService, ReportService, TripeiroService,
};

// Liga o detalhe de erro nas respostas 500 (equivalente ao modo de
// desenvolvimento); definido uma única vez na inicialização.
static DEV_MODE: OnceLock<bool> = OnceLock::new();

pub fn dev_mode() -> bool {
    DEV_MODE.get().copied().unwrap_or(false)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub payment_service: PaymentService,
    pub expense_service: ExpenseService,
    pub attendant_service: AttendantService,
    pub tripeiro_service: TripeiroService,
    pub note_service: NoteService,
    pub reminder_service: ReminderService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
    pub admin_service: AdminService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let dev = env::var("APP_ENV").map(|v| v == "development").unwrap_or(false);
        let _ = DEV_MODE.set(dev);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());
        let attendant_repo = AttendantRepository::new(db_pool.clone());
        let tripeiro_repo = TripeiroRepository::new(db_pool.clone());
        let note_repo = NoteRepository::new(db_pool.clone());
        let reminder_repo = ReminderRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());
        let admin_repo = AdminRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            tenant_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let payment_service = PaymentService::new(payment_repo, attendant_repo.clone());
        let expense_service = ExpenseService::new(expense_repo);
        let attendant_service = AttendantService::new(attendant_repo);
        let tripeiro_service = TripeiroService::new(tripeiro_repo);
        let note_service = NoteService::new(note_repo);
        let reminder_service = ReminderService::new(reminder_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);
        let report_service = ReportService::new(report_repo);
        let admin_service = AdminService::new(
            admin_repo,
            user_repo,
            tenant_repo,
            audit_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            auth_service,
            payment_service,
            expense_service,
            attendant_service,
            tripeiro_service,
            note_service,
            reminder_service,
            dashboard_service,
            report_service,
            admin_service,
        })
    }
}
