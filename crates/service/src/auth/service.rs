use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, error, info, instrument};

use super::domain::{LoginInput, LoginOutcome, RegisterInput, User};
use super::errors::AuthError;
use super::repository::UserRepository;

/// Auth business service independent of web framework
pub struct AuthService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, InMemoryUserRepository, UserRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryUserRepository::new());
    /// let svc = AuthService::new(repo.clone());
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into() };
    /// tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(tokio_test::block_on(repo.count()).unwrap(), 1);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<(), AuthError> {
        input.validate()?;

        let RegisterInput { name, email, password } = input;
        let password_hash = hash_password(password).await?;

        self.repo.add(User { name, email, password_hash }).await?;
        info!("user_registered");
        Ok(())
    }

    /// Check credentials and hand back the stored display name.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, InMemoryUserRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryUserRepository::new()));
    /// tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// let outcome = tokio_test::block_on(svc.login(LoginInput { email: "U@E.COM".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(outcome.name, "N");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, AuthError> {
        input.validate()?;

        let user = match self.repo.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                debug!("no user for email");
                return Err(AuthError::Unauthorized);
            }
        };

        if !verify_password(input.password, user.password_hash).await? {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }

        info!("user_logged_in");
        Ok(LoginOutcome { name: user.name })
    }
}

/// Argon2id with the crate's default parameters and a fresh random salt.
/// Runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))?
}

/// `Ok(false)` for a mismatch and for a stored hash that cannot be parsed.
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed = match PasswordHash::new(&stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, "stored password hash is malformed");
                return false;
            }
        };
        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))
}
