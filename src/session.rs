use log::{debug, info, warn};
use uuid::Uuid;

use crate::conversation::{ConversationStore, Turn};
use crate::model::{InferenceError, ModelChoice, OllamaClient};

/// One user's chat: the conversation log plus the sidebar state.
pub struct ChatSession {
    id: Uuid,
    store: ConversationStore,
    selected_model: ModelChoice,
}

impl ChatSession {
    pub fn new(default_model: ModelChoice) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: ConversationStore::new(),
            selected_model: default_model,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn selected_model(&self) -> &ModelChoice {
        &self.selected_model
    }

    /// Runs one exchange. Blank text is ignored and returns `Ok(None)`.
    /// On failure the user's turn is removed again, so the store ends up
    /// exactly as it was before the call.
    pub async fn submit(
        &mut self,
        client: &OllamaClient,
        text: &str,
        model: ModelChoice,
    ) -> Result<Option<String>, InferenceError> {
        self.selected_model = model;

        let user = match Turn::user(text) {
            Ok(turn) => turn,
            Err(_) => {
                debug!("Session {}: ignoring blank message", self.id);
                return Ok(None);
            }
        };

        info!(
            "Session {}: user turn {} -> model {}",
            self.id,
            self.store.len() + 1,
            self.selected_model.name()
        );

        let pending = self.store.begin_exchange(user);
        let result = client
            .generate(
                pending.history(),
                pending.input().text(),
                self.selected_model.name(),
            )
            .await
            .and_then(|reply| {
                // generate already rejects blank replies
                Turn::assistant(&reply).map_err(|_| InferenceError::empty_reply())
            });

        match result {
            Ok(reply) => {
                let text = reply.text().to_string();
                pending.commit(reply);
                Ok(Some(text))
            }
            Err(e) => {
                drop(pending);
                warn!(
                    "Session {}: exchange failed, rolled back user turn: {}",
                    self.id, e
                );
                Err(e)
            }
        }
    }

    /// Empties the conversation and starts a new session id.
    pub fn clear(&mut self) {
        info!(
            "Session {}: cleared {} turns",
            self.id,
            self.store.len()
        );
        self.store.clear();
        self.id = Uuid::new_v4();
    }
}
