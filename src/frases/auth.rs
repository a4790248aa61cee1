use crate::error::{FrasesError, Result};

/// Shared-secret gate for the submission path.
///
/// A credential is authorized iff the `Authorization` header is exactly
/// `Bearer <token>` for one of the accepted tokens. A missing header, a
/// malformed header, and a wrong token all produce the same unauthorized
/// error, so callers cannot tell which check failed.
pub struct AccessGate {
    tokens: Vec<String>,
}

impl AccessGate {
    /// At least one non-empty token must be configured; there is no
    /// compiled-in default.
    pub fn new(tokens: Vec<String>) -> Result<Self> {
        let tokens: Vec<String> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            return Err(FrasesError::Config(
                "at least one submit token must be configured".into(),
            ));
        }
        Ok(Self { tokens })
    }

    pub fn authorize(&self, header: Option<&str>) -> Result<()> {
        let credential = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(FrasesError::Unauthorized)?;

        if self.tokens.iter().any(|t| t == credential) {
            Ok(())
        } else {
            Err(FrasesError::Unauthorized)
        }
    }
}
