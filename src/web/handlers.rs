use actix_web::{http::header, web, HttpResponse, Responder};
use serde_json::json;
use tera::Context;
use log::{info, warn, error};

use crate::model::{ModelChoice, ModelError, CUSTOM};
use crate::session::ChatSession;
use crate::web::markdown::render_markdown;
use crate::web::models::{ChatForm, ChatRequest, ChatResponse, HistoryResponse, TurnView};
use crate::AppState;

fn resolve_model(
    data: &AppState,
    model: Option<&str>,
    custom_model: Option<&str>,
) -> Result<ModelChoice, ModelError> {
    match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(selected) => ModelChoice::resolve(selected, custom_model, &data.settings.models),
        None => Ok(data.settings.default_choice()),
    }
}

fn render_page(
    data: &AppState,
    session: &ChatSession,
    error: Option<String>,
    draft: &str,
) -> HttpResponse {
    let selected = session.selected_model();
    let turns: Vec<TurnView> = session
        .store()
        .render()
        .map(|turn| TurnView {
            role: turn.role(),
            html: render_markdown(turn.text()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("turns", &turns);
    context.insert("empty", &session.store().is_empty());
    context.insert("models", &data.settings.models);
    context.insert("custom", CUSTOM);
    context.insert("selected", selected.select_value());
    context.insert("custom_name", selected.custom_name().unwrap_or_default());
    context.insert("error", &error);
    context.insert("draft", draft);
    context.insert("session_id", &session.id());

    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

fn back_to_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let session = data.session.lock().await;
    render_page(&data, &session, None, "")
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Form submission from the page
pub async fn chat_form(data: web::Data<AppState>, form: web::Form<ChatForm>) -> impl Responder {
    // Held until the exchange resolves, so only one request is ever in flight
    let mut session = data.session.lock().await;

    let model = match resolve_model(&data, form.model.as_deref(), form.custom_model.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            warn!("Rejected model selection: {}", e);
            return render_page(&data, &session, Some(e.to_string()), &form.message);
        }
    };

    match session.submit(&data.client, &form.message, model).await {
        Ok(_) => back_to_index(),
        Err(e) => {
            error!("Model error ({:?}): {}", e.kind, e);
            render_page(&data, &session, Some(format!("Error: {}", e)), &form.message)
        }
    }
}

pub async fn clear_form(data: web::Data<AppState>) -> impl Responder {
    data.session.lock().await.clear();
    back_to_index()
}

// Chat API endpoint
pub async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let mut session = data.session.lock().await;

    let model = match resolve_model(&data, req.model.as_deref(), req.custom_model.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            warn!("Rejected model selection: {}", e);
            return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }));
        }
    };

    info!(
        "Chat request from session {}: {} chars (model: {})",
        session.id(),
        req.message.len(),
        model.name()
    );

    match session.submit(&data.client, &req.message, model).await {
        Ok(Some(response)) => HttpResponse::Ok().json(ChatResponse {
            response,
            session_id: session.id(),
        }),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Model error ({:?}): {}", e.kind, e);
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}

pub async fn clear(data: web::Data<AppState>) -> impl Responder {
    let mut session = data.session.lock().await;
    session.clear();
    HttpResponse::Ok().json(json!({
        "status": "cleared",
        "session_id": session.id()
    }))
}

pub async fn history(data: web::Data<AppState>) -> impl Responder {
    let session = data.session.lock().await;
    HttpResponse::Ok().json(HistoryResponse {
        session_id: session.id(),
        turns: session.store().render().collect(),
    })
}

pub async fn models(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "models": data.settings.models,
        "default": data.settings.default_model,
        "custom": CUSTOM
    }))
}
