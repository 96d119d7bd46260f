// src/main.rs

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let me_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let payment_routes = Router::new()
        .route("/",
            get(handlers::payments::list_payments)
                .post(handlers::payments::create_payment),
        )
        .route("/stats", get(handlers::payments::payment_stats))
        .route("/{id}",
            get(handlers::payments::get_payment)
                .put(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let expense_routes = Router::new()
        .route("/",
            get(handlers::expenses::list_expenses)
                .post(handlers::expenses::create_expense),
        )
        .route("/stats", get(handlers::expenses::expense_stats))
        .route("/{id}",
            get(handlers::expenses::get_expense)
                .put(handlers::expenses::update_expense)
                .delete(handlers::expenses::delete_expense),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let attendant_routes = Router::new()
        .route("/",
            get(handlers::attendants::list_attendants)
                .post(handlers::attendants::create_attendant),
        )
        .route("/{id}",
            get(handlers::attendants::get_attendant)
                .put(handlers::attendants::update_attendant)
                .delete(handlers::attendants::delete_attendant),
        )
        .route("/{id}/commissions", get(handlers::attendants::attendant_commissions))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let tripeiro_routes = Router::new()
        .route("/",
            get(handlers::tripeiros::list_tripeiros)
                .post(handlers::tripeiros::create_tripeiro),
        )
        .route("/{id}",
            get(handlers::tripeiros::get_tripeiro)
                .put(handlers::tripeiros::update_tripeiro)
                .delete(handlers::tripeiros::delete_tripeiro),
        )
        .route("/{id}/accounts",
            get(handlers::tripeiros::list_accounts)
                .post(handlers::tripeiros::create_account),
        )
        .route("/{id}/payments", get(handlers::tripeiros::tripeiro_payments))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let note_routes = Router::new()
        .route("/",
            get(handlers::notes::list_notes)
                .post(handlers::notes::create_note),
        )
        .route("/{id}",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .route("/{id}/pin", patch(handlers::notes::toggle_pin))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let reminder_routes = Router::new()
        .route("/",
            get(handlers::reminders::list_reminders)
                .post(handlers::reminders::create_reminder),
        )
        .route("/upcoming", get(handlers::reminders::upcoming_reminders))
        .route("/{id}",
            get(handlers::reminders::get_reminder)
                .put(handlers::reminders::update_reminder)
                .delete(handlers::reminders::delete_reminder),
        )
        .route("/{id}/complete", patch(handlers::reminders::complete_reminder))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let dashboard_routes = Router::new()
        .route("/metrics", get(handlers::dashboard::get_metrics))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let report_routes = Router::new()
        .route("/generate", get(handlers::reports::generate_report))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Admin: auth primeiro, depois o guard de role (camadas rodam de fora para dentro)
    let admin_routes = Router::new()
        .route("/dashboard", get(handlers::admin::admin_dashboard))
        .route("/users",
            get(handlers::admin::list_users)
                .post(handlers::admin::create_user),
        )
        .route("/users/{id}",
            axum::routing::put(handlers::admin::update_user)
                .delete(handlers::admin::deactivate_user),
        )
        .route("/users/{id}/metrics", get(handlers::admin::user_metrics))
        .route("/tenants", get(handlers::admin::list_tenants))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let cors = CorsLayer::new()
        .allow_origin(frontend_url.parse::<HeaderValue>().expect("FRONTEND_URL inválida"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async {
            Json(json!({ "status": "OK", "timestamp": chrono::Utc::now() }))
        }))
        .nest("/api/auth", auth_routes.merge(me_routes))
        .nest("/api/payments", payment_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/attendants", attendant_routes)
        .nest("/api/tripeiros", tripeiro_routes)
        .nest("/api/notes", note_routes)
        .nest("/api/reminders", reminder_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3333".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
