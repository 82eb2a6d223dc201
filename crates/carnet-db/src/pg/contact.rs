//! PostgreSQL contact repository implementation
//!
//! All queries bind the owner id, so a contact owned by another user is
//! indistinguishable from a missing one.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::ContactRow;
use crate::repo::{ContactPatch, ContactRepository, CreateContact};

/// PostgreSQL contact repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> DbResult<Vec<ContactRow>> {
        let contacts = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, owner_id, first_name, last_name, email, phone_number,
                   birthday, additional_info, created_at
            FROM contacts
            WHERE owner_id = $1
            ORDER BY created_at
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>> {
        let contact = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, owner_id, first_name, last_name, email, phone_number,
                   birthday, additional_info, created_at
            FROM contacts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn create(&self, contact: CreateContact) -> DbResult<ContactRow> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (id, owner_id, first_name, last_name, email,
                                  phone_number, birthday, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, first_name, last_name, email, phone_number,
                      birthday, additional_info, created_at
            "#,
        )
        .bind(contact.id)
        .bind(contact.owner_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone_number)
        .bind(contact.birthday)
        .bind(&contact.additional_info)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ContactPatch,
    ) -> DbResult<Option<ContactRow>> {
        // COALESCE keeps the stored value for every unset patch field.
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts
            SET first_name      = COALESCE($3, first_name),
                last_name       = COALESCE($4, last_name),
                email           = COALESCE($5, email),
                phone_number    = COALESCE($6, phone_number),
                birthday        = COALESCE($7, birthday),
                additional_info = COALESCE($8, additional_info)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, first_name, last_name, email, phone_number,
                      birthday, additional_info, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.email)
        .bind(&patch.phone_number)
        .bind(patch.birthday)
        .bind(&patch.additional_info)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, first_name, last_name, email, phone_number,
                      birthday, additional_info, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
