mod config;
mod conversation;
mod model;
mod session;
#[cfg(test)]
mod testing;
mod web;

use actix_web::{App, HttpServer, web::Data};
use actix_files as fs;
use anyhow::Context as _;
use dotenv::dotenv;
use log::{info, error};
use tera::Tera;
use tokio::sync::Mutex;

use config::Settings;
use model::OllamaClient;
use session::ChatSession;
use web::routes;

// App state structure
pub struct AppState {
    tera: Tera,
    client: OllamaClient,
    settings: Settings,
    session: Mutex<ChatSession>,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let pattern = format!("{}/**/*", settings.templates_dir);
        let mut tera = Tera::new(&pattern)
            .with_context(|| format!("failed to parse templates in {}", settings.templates_dir))?;
        tera.autoescape_on(vec![".html"]);

        Ok(Self {
            tera,
            client: OllamaClient::new(settings.ollama_url.clone()),
            session: Mutex::new(ChatSession::new(settings.default_choice())),
            settings,
        })
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Ollama chat");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Models: {} (default {})",
        settings.models.join(", "),
        settings.default_model
    );

    let bind = (settings.bind_address.clone(), settings.port);
    let static_dir = settings.static_dir.clone();

    let app_state = match AppState::new(settings) {
        Ok(state) => Data::new(state),
        Err(e) => {
            error!("Template parsing error: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Listening on http://{}:{}", bind.0, bind.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", &static_dir))
    })
    .bind(bind)?
    .run()
    .await
}
