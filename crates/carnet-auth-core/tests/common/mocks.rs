//! Mock collaborators for auth-flow testing

use async_trait::async_trait;
use carnet_auth_core::{AvatarStore, AvatarStoreError, MailError, Mailer};
use carnet_db::{CreateUser, DbError, DbResult, UserRepository, UserRow};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::UniqueViolation);
        }
        let row = UserRow {
            id: user.id,
            email: user.email.clone(),
            password_hash: user.password_hash,
            avatar_url: None,
            is_verified: false,
            verification_code: Some(user.verification_code),
            created_at: Utc::now(),
        };
        self.by_email.insert(user.email, user.id);
        self.users.insert(user.id, row.clone());
        Ok(row)
    }

    async fn consume_verification_code(&self, id: Uuid, code: &str) -> DbResult<bool> {
        if let Some(mut user) = self.users.get_mut(&id) {
            let matches = user
                .verification_code
                .as_deref()
                .is_some_and(|stored| carnet_auth_core::verification::codes_match(code, stored));
            if !user.is_verified && matches {
                user.is_verified = true;
                user.verification_code = None;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn update_avatar_url(&self, id: Uuid, avatar_url: &str) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.avatar_url = Some(avatar_url.to_string());
        }
        Ok(())
    }
}

/// Mailer that records every send
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent_to(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, to: &str, code: &str) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("smtp unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// Avatar store returning a canned URL
#[derive(Default)]
pub struct StubAvatarStore {
    pub fail: AtomicBool,
    pub uploads: Mutex<Vec<String>>,
}

impl StubAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvatarStore for StubAvatarStore {
    async fn upload(&self, _bytes: Vec<u8>, content_type: &str) -> Result<String, AvatarStoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AvatarStoreError::Upload("storage unavailable".to_string()));
        }
        self.uploads.lock().unwrap().push(content_type.to_string());
        Ok("https://images.example.com/avatars/abc123".to_string())
    }
}
