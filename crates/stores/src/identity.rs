//! Identity store: registered users, the current session, password reset
//! and referral crediting.
//!
//! Passwords are stored and compared in plaintext. That is the product's
//! explicit prototype contract — state lives in client-local storage and
//! none of this is a security boundary. Do not reuse this flow anywhere
//! credentials matter.
//!
//! The session is a smaller projection of the user record (no password),
//! persisted under its own key so a reload stays logged in, and cleared on
//! logout. Pending password-reset codes live only in memory: there is no
//! real email channel, so losing them on restart is acceptable.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{SessionUser, UserRecord, UserRole};

/// Credit granted to a referrer per successful registration, in the smallest
/// currency unit.
pub const REFERRAL_BONUS: i64 = 5000;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// Registered and auto-logged-in.
    Registered(SessionUser),
    /// The email is already taken; nothing was changed.
    EmailTaken,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    session: Option<SessionUser>,
    /// Pending one-time reset codes, keyed by email. In-memory only.
    pending_otps: HashMap<String, String>,
}

/// Store owning user records and the current session.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    storage: Storage,
    inner: Arc<RwLock<Inner>>,
}

impl IdentityStore {
    /// Load users and any persisted session from storage.
    pub async fn load(storage: Storage) -> Result<Self> {
        let users = storage
            .load::<Vec<UserRecord>>(keys::USERS)
            .await?
            .unwrap_or_default();
        let session = storage.load::<SessionUser>(keys::SESSION).await?;

        Ok(Self {
            storage,
            inner: Arc::new(RwLock::new(Inner {
                users,
                session,
                pending_otps: HashMap::new(),
            })),
        })
    }

    /// Current session, if someone is logged in.
    pub async fn current_session(&self) -> Option<SessionUser> {
        self.inner.read().await.session.clone()
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Log in with an exact, case-sensitive email + password match.
    ///
    /// On success the session projection is established and persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<SessionUser>> {
        let mut inner = self.inner.write().await;

        let Some(record) = inner
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
        else {
            return Ok(None);
        };

        let session = SessionUser::from_record(record);
        self.storage.save(keys::SESSION, &session).await?;
        inner.session = Some(session.clone());

        tracing::info!(user_id = %session.id, "Logged in");
        Ok(Some(session))
    }

    /// Register a new user and auto-log them in.
    ///
    /// Fails with [`RegisterOutcome::EmailTaken`] if the email is already
    /// registered. A supplied referral code that resolves to an existing
    /// user credits that referrer by [`REFERRAL_BONUS`] and bumps their
    /// count; an unknown code is simply ignored.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        referral_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == email) {
            return Ok(RegisterOutcome::EmailTaken);
        }

        if let Some(code) = referral_code {
            if let Some(referrer) = inner.users.iter_mut().find(|u| u.referral_code == code) {
                referrer.referral_balance += REFERRAL_BONUS;
                referrer.referral_count += 1;
                tracing::info!(referrer_id = %referrer.id, "Credited referral");
            }
        }

        let record = UserRecord {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::User,
            referral_code: generate_referral_code(name),
            referral_balance: 0,
            referral_count: 0,
            used_referral: referral_code.map(str::to_string),
            registered_at: now,
        };
        let session = SessionUser::from_record(&record);

        inner.users.push(record);
        self.storage.save(keys::USERS, &inner.users).await?;

        self.storage.save(keys::SESSION, &session).await?;
        inner.session = Some(session.clone());

        tracing::info!(user_id = %session.id, "Registered user");
        Ok(RegisterOutcome::Registered(session))
    }

    /// Clear the session in memory and in storage.
    pub async fn logout(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.session = None;
        self.storage.remove(keys::SESSION).await?;
        Ok(())
    }

    /// Start a password reset. Returns the generated 6-digit code when the
    /// email matches an account, `None` otherwise.
    ///
    /// The code would normally leave through an email channel; the prototype
    /// hands it straight back to the caller to display.
    pub async fn request_password_reset(&self, email: &str) -> Option<String> {
        let mut inner = self.inner.write().await;

        if !inner.users.iter().any(|u| u.email == email) {
            return None;
        }

        let otp = generate_otp();
        inner.pending_otps.insert(email.to_string(), otp.clone());
        Some(otp)
    }

    /// Check a reset code without consuming it. Re-verifying the same code
    /// keeps succeeding until the reset completes.
    pub async fn verify_otp(&self, email: &str, code: &str) -> bool {
        self.inner
            .read()
            .await
            .pending_otps
            .get(email)
            .map(|pending| pending == code)
            .unwrap_or(false)
    }

    /// Complete a password reset. A wrong or expired code returns `false`
    /// and never mutates the stored password; success persists the new
    /// password and clears the pending code.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<bool> {
        let mut inner = self.inner.write().await;

        if inner.pending_otps.get(email).map(String::as_str) != Some(code) {
            return Ok(false);
        }

        let Some(record) = inner.users.iter_mut().find(|u| u.email == email) else {
            return Ok(false);
        };
        record.password = new_password.to_string();

        self.storage.save(keys::USERS, &inner.users).await?;
        inner.pending_otps.remove(email);

        tracing::info!(email, "Password reset");
        Ok(true)
    }

    /// Look up a user's public projection by referral code.
    pub async fn find_by_referral_code(&self, code: &str) -> Option<SessionUser> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.referral_code == code)
            .map(SessionUser::from_record)
    }
}

/// Referral code: up to 4 uppercase letters from the name plus 4 random
/// digits. Collisions are not checked — a known weakness kept from the
/// product's prototype behavior.
fn generate_referral_code(name: &str) -> String {
    let prefix: String = name
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .take(4)
        .collect();
    let digits = rand::thread_rng().gen_range(1000..10000);
    format!("{prefix}{digits}")
}

/// 6-digit numeric one-time code.
fn generate_otp() -> String {
    rand::thread_rng().gen_range(100000..1000000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_identity() -> IdentityStore {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        IdentityStore::load(storage).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let identity = test_identity().await;

        let outcome = identity
            .register("Alice", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();
        let RegisterOutcome::Registered(session) = outcome else {
            panic!("registration failed");
        };
        assert_eq!(session.name, "Alice");
        assert_eq!(session.referral_balance, 0);

        // Registration auto-logs-in.
        assert!(identity.current_session().await.is_some());

        identity.logout().await.unwrap();
        assert!(identity.current_session().await.is_none());

        let session = identity.login("a@x.com", "p1").await.unwrap();
        assert!(session.is_some());

        // Case-sensitive, exact match only.
        assert!(identity.login("a@x.com", "P1").await.unwrap().is_none());
        assert!(identity.login("b@x.com", "p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_original_intact() {
        let identity = test_identity().await;

        identity
            .register("A", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();
        let outcome = identity
            .register("B", "a@x.com", "p2", None, Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, RegisterOutcome::EmailTaken);

        assert_eq!(identity.user_count().await, 1);
        // The stored record still carries A's name and password.
        let session = identity.login("a@x.com", "p1").await.unwrap().unwrap();
        assert_eq!(session.name, "A");
        assert!(identity.login("a@x.com", "p2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_referral_credits_referrer_exactly_once() {
        let identity = test_identity().await;

        let RegisterOutcome::Registered(referrer) = identity
            .register("Uma", "u@x.com", "pw", None, Utc::now())
            .await
            .unwrap()
        else {
            panic!("registration failed");
        };

        identity
            .register(
                "Vic",
                "v@x.com",
                "pw",
                Some(referrer.referral_code.as_str()),
                Utc::now(),
            )
            .await
            .unwrap();

        let credited = identity
            .find_by_referral_code(&referrer.referral_code)
            .await
            .unwrap();
        assert_eq!(credited.referral_balance, REFERRAL_BONUS);
        assert_eq!(credited.referral_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_referral_code_is_ignored() {
        let identity = test_identity().await;

        let outcome = identity
            .register("Walt", "w@x.com", "pw", Some("NOPE0000"), Utc::now())
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::Registered(_)));
        assert_eq!(identity.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_session_survives_reload() {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();

        let identity = IdentityStore::load(storage.clone()).await.unwrap();
        identity
            .register("Alice", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();

        let reloaded = IdentityStore::load(storage).await.unwrap();
        let session = reloaded.current_session().await.unwrap();
        assert_eq!(session.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_otp_verify_is_repeatable() {
        let identity = test_identity().await;
        identity
            .register("Alice", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();

        assert!(identity.request_password_reset("nobody@x.com").await.is_none());

        let otp = identity.request_password_reset("a@x.com").await.unwrap();
        assert_eq!(otp.len(), 6);

        // Non-consuming: verifies any number of times while pending.
        assert!(identity.verify_otp("a@x.com", &otp).await);
        assert!(identity.verify_otp("a@x.com", &otp).await);
        assert!(!identity.verify_otp("a@x.com", "000000").await);
    }

    #[tokio::test]
    async fn test_reset_password_with_wrong_code_never_mutates() {
        let identity = test_identity().await;
        identity
            .register("Alice", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();
        identity.request_password_reset("a@x.com").await.unwrap();

        let ok = identity
            .reset_password("a@x.com", "999999", "p2")
            .await
            .unwrap();
        assert!(!ok);
        assert!(identity.login("a@x.com", "p1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reset_password_persists_and_clears_code() {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();

        let identity = IdentityStore::load(storage.clone()).await.unwrap();
        identity
            .register("Alice", "a@x.com", "p1", None, Utc::now())
            .await
            .unwrap();
        let otp = identity.request_password_reset("a@x.com").await.unwrap();

        let ok = identity.reset_password("a@x.com", &otp, "p2").await.unwrap();
        assert!(ok);

        // Pending entry is consumed by a completed reset.
        assert!(!identity.verify_otp("a@x.com", &otp).await);

        // The new password is what persists.
        let reloaded = IdentityStore::load(storage).await.unwrap();
        assert!(reloaded.login("a@x.com", "p2").await.unwrap().is_some());
        assert!(reloaded.login("a@x.com", "p1").await.unwrap().is_none());
    }

    #[test]
    fn test_referral_code_shape() {
        let code = generate_referral_code("Alice Smith");
        assert!(code.starts_with("ALIC"));
        assert_eq!(code.len(), 8);
        assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
    }
}
