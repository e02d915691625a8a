use thiserror::Error;

/// Select-box value that switches to a free-form model name.
pub const CUSTOM: &str = "custom";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown model '{0}'")]
    Unknown(String),
    #[error("custom model name is empty")]
    EmptyCustom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Listed(String),
    Custom(String),
}

impl ModelChoice {
    pub fn resolve(
        selected: &str,
        custom_name: Option<&str>,
        allowed: &[String],
    ) -> Result<Self, ModelError> {
        let selected = selected.trim();
        if selected == CUSTOM {
            let name = custom_name.map(str::trim).unwrap_or_default();
            if name.is_empty() {
                return Err(ModelError::EmptyCustom);
            }
            return Ok(ModelChoice::Custom(name.to_string()));
        }

        if allowed.iter().any(|m| m == selected) {
            Ok(ModelChoice::Listed(selected.to_string()))
        } else {
            Err(ModelError::Unknown(selected.to_string()))
        }
    }

    /// Name sent to the inference server.
    pub fn name(&self) -> &str {
        match self {
            ModelChoice::Listed(name) | ModelChoice::Custom(name) => name,
        }
    }

    /// Value the select box should show for this choice.
    pub fn select_value(&self) -> &str {
        match self {
            ModelChoice::Listed(name) => name,
            ModelChoice::Custom(_) => CUSTOM,
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            ModelChoice::Listed(_) => None,
            ModelChoice::Custom(name) => Some(name),
        }
    }
}
