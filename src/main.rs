use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use tracing::{error, info, warn};

use trucking_portal::config::environment::EnvironmentConfig;
use trucking_portal::state::AppState;
use trucking_portal::views::console::{render_calendar, render_day_panel, render_management};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚚 Trucking Portal ({})", config.environment);
    info!("================================================");

    let state = AppState::new(config)?;

    let mut user = state.auth.init().await?;
    if user.is_none() {
        user = login_from_env(&state).await?;
    }

    let Some(user) = user else {
        warn!("🔓 Sin sesión: define PORTAL_EMAIL y PORTAL_PASSWORD para iniciar sesión");
        return Ok(());
    };
    info!("👤 {} ({})", user.name, user.role.as_str());

    let today = Local::now().date_naive();
    let schedule = state.schedule_view(today).await;
    println!("{}", render_calendar(schedule.current_month(), &schedule.calendar()));
    println!("{}", render_day_panel(&schedule));

    if user.is_admin() {
        let management = state.management_view();
        management.load().await;
        println!("{}", render_management(&management));
    }

    Ok(())
}

/// Inicia sesión con `PORTAL_EMAIL` / `PORTAL_PASSWORD` si están definidas
async fn login_from_env(state: &AppState) -> Result<Option<trucking_portal::models::user::User>> {
    let (Ok(email), Ok(password)) = (
        std::env::var("PORTAL_EMAIL"),
        std::env::var("PORTAL_PASSWORD"),
    ) else {
        return Ok(None);
    };

    match state.auth.login(&email, &password).await {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            error!("❌ Login fallido para {}: {}", email, e.user_message("Login failed"));
            Ok(None)
        }
    }
}
