//! Identity and access gate: signup, the two login paths, token
//! authentication, and the admin predicate.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::{self, FEDERATED_SENTINEL};
use crate::auth::{FederatedVerifier, TokenService};
use crate::domain::models::user::{Identity, User};
use crate::error::DomainError;
use crate::storage::UserStorage;

#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStorage>,
    tokens: TokenService,
    federation: FederatedVerifier,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserStorage>,
        tokens: TokenService,
        federation: FederatedVerifier,
    ) -> Self {
        Self {
            users,
            tokens,
            federation,
        }
    }

    /// Create an account with a password credential and issue a token.
    pub async fn signup(
        &self,
        email: &str,
        raw_password: &str,
        name: Option<String>,
    ) -> Result<(User, String), DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("A valid email is required".into()));
        }
        if raw_password.is_empty() {
            return Err(DomainError::Validation("A password is required".into()));
        }

        let user = User {
            id: shared::User::generate_id(),
            email,
            password_hash: password::hash_password(raw_password)?,
            name,
            is_admin: false,
            created_at: Utc::now().to_rfc3339(),
        };

        // DuplicateEmail surfaces from the store's unique constraint
        self.users.store_user(&user).await?;
        info!("Created account {} for {}", user.id, user.email);

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password produce the same error; callers never
    /// learn which check failed.
    pub async fn login(
        &self,
        email: &str,
        raw_password: &str,
    ) -> Result<(User, String), DomainError> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .get_user_by_email(&email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !password::verify_password(raw_password, &user.password_hash) {
            warn!("Failed login attempt for {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Authenticate with a third-party identity assertion.
    ///
    /// On first sight of an email the account is auto-provisioned with a
    /// sentinel credential that can never verify as a password.
    pub async fn login_federated(&self, assertion: &str) -> Result<(User, String), DomainError> {
        let identity = self.federation.verify(assertion)?;
        let email = identity.email.trim().to_lowercase();

        let user = match self.users.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                let user = User {
                    id: shared::User::generate_id(),
                    email,
                    password_hash: FEDERATED_SENTINEL.to_string(),
                    name: identity.name,
                    is_admin: false,
                    created_at: Utc::now().to_rfc3339(),
                };
                self.users.store_user(&user).await?;
                info!("Provisioned federated account {} for {}", user.id, user.email);
                user
            }
        };

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Resolve the identity carried by an Authorization header.
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<Identity, DomainError> {
        let header = auth_header.ok_or(DomainError::Unauthenticated)?;
        let token =
            crate::auth::token::extract_bearer(Some(header)).ok_or(DomainError::Unauthenticated)?;
        let claims = self.tokens.verify(token)?;
        Ok(Identity {
            id: claims.sub,
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }

    /// Admin gate: the stored flag decides, not the token's stale copy.
    pub async fn require_admin(&self, user_id: &str) -> Result<User, DomainError> {
        match self.users.get_user(user_id).await? {
            Some(user) if user.is_admin => Ok(user),
            _ => Err(DomainError::Forbidden),
        }
    }

    /// Flip a user's admin flag. Calling twice restores the original state.
    pub async fn toggle_admin(&self, target_id: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .get_user(target_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        let flipped = !user.is_admin;
        self.users.set_admin(target_id, flipped).await?;
        info!("Toggled admin for {} -> {}", target_id, flipped);

        Ok(User {
            is_admin: flipped,
            ..user
        })
    }

    /// All accounts, newest first. Admin-only at the HTTP layer.
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.list_users().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{DbConnection, UserRepository};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const FED_SECRET: &str = "federation-secret-for-tests-32-chars!!";
    const FED_AUDIENCE: &str = "taskpoint-web";

    async fn test_service() -> IdentityService {
        let db = DbConnection::init_test().await.unwrap();
        IdentityService::new(
            Arc::new(UserRepository::new(db)),
            TokenService::new("test-secret-that-is-at-least-32-characters-long", 3600),
            FederatedVerifier::new(FED_SECRET, FED_AUDIENCE),
        )
    }

    fn fed_assertion(email: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = crate::auth::federated::AssertionClaims {
            email: email.to_string(),
            name: Some("Fed User".to_string()),
            aud: FED_AUDIENCE.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(FED_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let service = test_service().await;
        let (user, token) = service
            .signup("alice@example.com", "hunter2", Some("Alice".into()))
            .await
            .unwrap();
        assert!(!user.is_admin);
        assert!(!token.is_empty());

        let (logged_in, _) = service.login("alice@example.com", "hunter2").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_signup_leaves_original_credentials_working() {
        let service = test_service().await;
        service
            .signup("bob@example.com", "original-pass", None)
            .await
            .unwrap();

        let err = service
            .signup("bob@example.com", "other-pass", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail));

        // The first credential still logs in
        assert!(service.login("bob@example.com", "original-pass").await.is_ok());
        assert!(matches!(
            service.login("bob@example.com", "other-pass").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_does_not_reveal_which_check_failed() {
        let service = test_service().await;
        service
            .signup("carol@example.com", "secret", None)
            .await
            .unwrap();

        let unknown = service.login("nobody@example.com", "secret").await;
        let wrong = service.login("carol@example.com", "wrong").await;
        assert!(matches!(unknown, Err(DomainError::InvalidCredentials)));
        assert!(matches!(wrong, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_federated_login_provisions_once() {
        let service = test_service().await;
        let (first, _) = service
            .login_federated(&fed_assertion("fed@example.com"))
            .await
            .unwrap();
        let (second, _) = service
            .login_federated(&fed_assertion("fed@example.com"))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);

        // Federated accounts can never password-login
        assert!(matches!(
            service.login("fed@example.com", "").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("fed@example.com", FEDERATED_SENTINEL).await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_federated_login_bad_assertion() {
        let service = test_service().await;
        assert!(matches!(
            service.login_federated("garbage").await,
            Err(DomainError::FederationVerificationFailed)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_roundtrip() {
        let service = test_service().await;
        let (user, token) = service
            .signup("dave@example.com", "pw", None)
            .await
            .unwrap();

        let header = format!("Bearer {}", token);
        let identity = service.authenticate(Some(&header)).unwrap();
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.email, "dave@example.com");

        assert!(matches!(
            service.authenticate(None),
            Err(DomainError::Unauthenticated)
        ));
        assert!(matches!(
            service.authenticate(Some("Bearer forged")),
            Err(DomainError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_require_admin_checks_stored_state_not_token() {
        let service = test_service().await;
        let (user, _) = service
            .signup("eve@example.com", "pw", None)
            .await
            .unwrap();

        // Freshly signed up: not an admin
        assert!(matches!(
            service.require_admin(&user.id).await,
            Err(DomainError::Forbidden)
        ));

        // Flag flipped in the store: the same token-era identity now passes
        service.toggle_admin(&user.id).await.unwrap();
        assert!(service.require_admin(&user.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_toggle_admin_twice_restores_state() {
        let service = test_service().await;
        let (user, _) = service
            .signup("frank@example.com", "pw", None)
            .await
            .unwrap();

        let once = service.toggle_admin(&user.id).await.unwrap();
        assert!(once.is_admin);
        let twice = service.toggle_admin(&user.id).await.unwrap();
        assert!(!twice.is_admin);
    }

    #[tokio::test]
    async fn test_toggle_admin_unknown_user() {
        let service = test_service().await;
        assert!(matches!(
            service.toggle_admin("user::missing").await,
            Err(DomainError::NotFound("User"))
        ));
    }
}
