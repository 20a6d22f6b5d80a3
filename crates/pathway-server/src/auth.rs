//! Admin login gate.

use pathway_core::AssessmentError;

/// Checks admin credentials against the configured shared secret.
///
/// With no secret configured every attempt is rejected.
#[derive(Clone, Default)]
pub struct AdminGate {
    secret: Option<String>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AdminGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Accept or reject one login attempt. Has no side effects.
    pub fn verify(&self, attempt: &str) -> Result<(), AssessmentError> {
        match &self.secret {
            Some(secret) if constant_time_eq(secret.as_bytes(), attempt.as_bytes()) => Ok(()),
            Some(_) => {
                tracing::warn!("admin login rejected");
                Err(AssessmentError::AuthFailure)
            }
            None => {
                tracing::warn!("admin login attempted but no admin secret is configured");
                Err(AssessmentError::AuthFailure)
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_is_accepted() {
        let gate = AdminGate::new(Some("sophia@123".into()));
        assert!(gate.is_enabled());
        assert!(gate.verify("sophia@123").is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let gate = AdminGate::new(Some("sophia@123".into()));
        assert!(matches!(gate.verify("sophia@12"), Err(AssessmentError::AuthFailure)));
        assert!(matches!(gate.verify(""), Err(AssessmentError::AuthFailure)));
    }

    #[test]
    fn no_secret_rejects_everything() {
        for gate in [AdminGate::new(None), AdminGate::new(Some(String::new()))] {
            assert!(!gate.is_enabled());
            assert!(gate.verify("").is_err());
            assert!(gate.verify("anything").is_err());
        }
    }

    #[test]
    fn debug_masks_secret() {
        let gate = AdminGate::new(Some("sophia@123".into()));
        assert!(!format!("{gate:?}").contains("sophia"));
    }
}
