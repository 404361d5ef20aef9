/// Password check in front of the session
use crate::error::{ConsoleError, Result};
use gallery_console::SessionContext;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hash: Option<String>,
}

impl Authenticator {
    pub fn new(password_hash: Option<String>) -> Self {
        Self { password_hash }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ConsoleError::from)
    }

    /// Verify a password against the configured hash
    pub fn verify_password(&self, password: &str) -> Result<bool> {
        let hash = self.password_hash.as_deref().ok_or_else(|| {
            ConsoleError::Config(
                "no password hash configured (set GALLERY__SESSION__PASSWORD_HASH)".to_string(),
            )
        })?;
        bcrypt::verify(password, hash).map_err(ConsoleError::from)
    }

    /// Check the password and mark the session as logged in.
    pub fn login(&self, session: &SessionContext, password: &str) -> Result<()> {
        if !self.verify_password(password)? {
            warn!("Login rejected");
            return Err(ConsoleError::Auth("invalid password".to_string()));
        }

        session.login()?;
        info!("Login accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::Session;

    fn hashed(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn test_login_with_correct_password() {
        let auth = Authenticator::new(Some(hashed("hunter2")));
        let session = SessionContext::in_memory();

        auth.login(&session, "hunter2").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_login_with_wrong_password() {
        let auth = Authenticator::new(Some(hashed("hunter2")));
        let session = SessionContext::in_memory();

        let err = auth.login(&session, "letmein").unwrap_err();
        assert!(matches!(err, ConsoleError::Auth(_)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_without_configured_hash() {
        let auth = Authenticator::new(None);
        let err = auth.verify_password("anything").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_hash_round_trips() {
        let hash = Authenticator::hash_password("s3cret").unwrap();
        let auth = Authenticator::new(Some(hash));
        assert!(auth.verify_password("s3cret").unwrap());
    }
}
