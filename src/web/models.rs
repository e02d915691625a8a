use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::{Role, Turn};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: Option<String>,
    pub custom_model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse<'a> {
    pub session_id: Uuid,
    pub turns: Vec<&'a Turn>,
}

// Fields posted by the page's input form
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
    pub model: Option<String>,
    pub custom_model: Option<String>,
}

// A turn as the page shows it
#[derive(Debug, Serialize)]
pub struct TurnView {
    pub role: Role,
    pub html: String,
}
