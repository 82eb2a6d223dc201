//! In-memory repository semantics tests
//!
//! Exercises the repository traits against dashmap-backed stores: owner
//! scoping, partial patch application, and atomic verification-code
//! consumption. The PostgreSQL implementations mirror these semantics in
//! SQL (owner-bound WHERE clauses, COALESCE patches, conditional UPDATE).

use async_trait::async_trait;
use carnet_db::{
    ContactPatch, ContactRepository, ContactRow, CreateContact, CreateUser, DbResult,
    UserRepository, UserRow,
};
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository
#[derive(Default, Clone)]
struct MemoryUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
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
            return Err(carnet_db::DbError::UniqueViolation);
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
        // Entry lock makes the compare-and-clear atomic, like the SQL
        // conditional UPDATE.
        if let Some(mut user) = self.users.get_mut(&id) {
            if !user.is_verified && user.verification_code.as_deref() == Some(code) {
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

/// In-memory contact repository
#[derive(Default, Clone)]
struct MemoryContactRepository {
    contacts: Arc<DashMap<Uuid, ContactRow>>,
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> DbResult<Vec<ContactRow>> {
        let mut rows: Vec<ContactRow> = self
            .contacts
            .iter()
            .filter(|r| r.value().owner_id == owner_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>> {
        Ok(self
            .contacts
            .get(&id)
            .filter(|r| r.value().owner_id == owner_id)
            .map(|r| r.value().clone()))
    }

    async fn create(&self, contact: CreateContact) -> DbResult<ContactRow> {
        let row = ContactRow {
            id: contact.id,
            owner_id: contact.owner_id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone_number: contact.phone_number,
            birthday: contact.birthday,
            additional_info: contact.additional_info,
            created_at: Utc::now(),
        };
        self.contacts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ContactPatch,
    ) -> DbResult<Option<ContactRow>> {
        if let Some(mut row) = self.contacts.get_mut(&id) {
            if row.owner_id == owner_id {
                patch.apply(&mut row);
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>> {
        let owned = self
            .contacts
            .get(&id)
            .map(|r| r.value().owner_id == owner_id)
            .unwrap_or(false);
        if !owned {
            return Ok(None);
        }
        Ok(self.contacts.remove(&id).map(|(_, row)| row))
    }
}

fn new_contact(owner_id: Uuid, email: &str) -> CreateContact {
    CreateContact {
        id: Uuid::new_v4(),
        owner_id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone_number: "+44 20 7946 0000".to_string(),
        birthday: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
        additional_info: Some("mathematician".to_string()),
    }
}

#[tokio::test]
async fn contact_is_invisible_to_other_owners() {
    let repo = MemoryContactRepository::default();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    let contact = repo.create(new_contact(owner_a, "ada@x.com")).await.unwrap();

    // Owner A sees it
    assert!(repo.find_by_id(contact.id, owner_a).await.unwrap().is_some());

    // Owner B cannot read, update, or delete it
    assert!(repo.find_by_id(contact.id, owner_b).await.unwrap().is_none());
    let patch = ContactPatch {
        first_name: Some("Eve".to_string()),
        ..Default::default()
    };
    assert!(repo
        .update(contact.id, owner_b, patch)
        .await
        .unwrap()
        .is_none());
    assert!(repo.delete(contact.id, owner_b).await.unwrap().is_none());

    // Still intact for owner A
    let row = repo.find_by_id(contact.id, owner_a).await.unwrap().unwrap();
    assert_eq!(row.first_name, "Ada");
}

#[tokio::test]
async fn list_is_scoped_and_paged() {
    let repo = MemoryContactRepository::default();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    for i in 0..5 {
        repo.create(new_contact(owner_a, &format!("a{i}@x.com")))
            .await
            .unwrap();
    }
    repo.create(new_contact(owner_b, "b@x.com")).await.unwrap();

    assert_eq!(repo.list_by_owner(owner_a, 0, 100).await.unwrap().len(), 5);
    assert_eq!(repo.list_by_owner(owner_b, 0, 100).await.unwrap().len(), 1);
    assert_eq!(repo.list_by_owner(owner_a, 2, 2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn partial_patch_changes_only_set_fields() {
    let repo = MemoryContactRepository::default();
    let owner = Uuid::new_v4();
    let created = repo.create(new_contact(owner, "ada@x.com")).await.unwrap();

    let patch = ContactPatch {
        phone_number: Some("+1 555 0100".to_string()),
        ..Default::default()
    };
    let updated = repo.update(created.id, owner, patch).await.unwrap().unwrap();

    assert_eq!(updated.phone_number, "+1 555 0100");
    assert_eq!(updated.first_name, created.first_name);
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.birthday, created.birthday);
    assert_eq!(updated.additional_info, created.additional_info);
}

#[tokio::test]
async fn empty_patch_is_a_no_op() {
    let repo = MemoryContactRepository::default();
    let owner = Uuid::new_v4();
    let created = repo.create(new_contact(owner, "ada@x.com")).await.unwrap();

    let patch = ContactPatch::default();
    assert!(patch.is_empty());
    let updated = repo.update(created.id, owner, patch).await.unwrap().unwrap();
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone_number, created.phone_number);
}

#[tokio::test]
async fn delete_returns_row_then_not_found() {
    let repo = MemoryContactRepository::default();
    let owner = Uuid::new_v4();
    let created = repo.create(new_contact(owner, "ada@x.com")).await.unwrap();

    let deleted = repo.delete(created.id, owner).await.unwrap().unwrap();
    assert_eq!(deleted.id, created.id);

    assert!(repo.find_by_id(created.id, owner).await.unwrap().is_none());
    assert!(repo.delete(created.id, owner).await.unwrap().is_none());
}

#[tokio::test]
async fn verification_code_consumes_exactly_once() {
    let repo = MemoryUserRepository::default();
    let user = repo
        .create(CreateUser {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            verification_code: "QZ7K2M9PL4XW8RT1".to_string(),
        })
        .await
        .unwrap();

    assert!(!user.is_verified);

    // Wrong code leaves state unchanged
    assert!(!repo
        .consume_verification_code(user.id, "WRONGCODE0000000")
        .await
        .unwrap());
    let row = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!row.is_verified);
    assert!(row.verification_code.is_some());

    // Correct code consumes
    assert!(repo
        .consume_verification_code(user.id, "QZ7K2M9PL4XW8RT1")
        .await
        .unwrap());
    let row = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(row.is_verified);
    assert!(row.verification_code.is_none());

    // Second consumption of the same code fails
    assert!(!repo
        .consume_verification_code(user.id, "QZ7K2M9PL4XW8RT1")
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let repo = MemoryUserRepository::default();
    let create = |email: &str| CreateUser {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$2b$12$hash".to_string(),
        verification_code: "QZ7K2M9PL4XW8RT1".to_string(),
    };

    repo.create(create("a@x.com")).await.unwrap();
    let err = repo.create(create("a@x.com")).await.unwrap_err();
    assert!(matches!(err, carnet_db::DbError::UniqueViolation));
}
