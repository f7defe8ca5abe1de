// ============================================================================
// PetFinder Infrastructure - PostgreSQL Pet Repository
// File: crates/petfinder-infrastructure/src/database/postgres/pet_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use petfinder_core::domain::{NewPet, Pet, PetChanges};
use petfinder_core::error::DomainError;
use petfinder_core::repositories::PetRepository;

pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PetRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub description: Option<String>,
    pub microchip_id: Option<String>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Pet {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            species: row.species,
            breed: row.breed,
            description: row.description,
            microchip_id: row.microchip_id,
            qr_code_url: row.qr_code_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn persistence(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::Persistence(e.to_string())
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn create(&self, owner_id: &Uuid, input: &NewPet) -> Result<Pet, DomainError> {
        let row: PetRow = sqlx::query_as(
            r#"
            INSERT INTO pets (owner_id, name, species, breed, description, microchip_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, owner_id, name, species, breed,
                description, microchip_id, qr_code_url,
                created_at, updated_at
            "#
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.species)
        .bind(&input.breed)
        .bind(&input.description)
        .bind(&input.microchip_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence("creating pet", e))?;

        info!("Pet created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Pet>, DomainError> {
        let rows: Vec<PetRow> = sqlx::query_as(
            r#"
            SELECT
                id, owner_id, name, species, breed,
                description, microchip_id, qr_code_url,
                created_at, updated_at
            FROM pets
            WHERE owner_id = $1
            ORDER BY created_at DESC, insert_seq DESC
            "#
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence("listing pets", e))?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    async fn get_by_id(&self, pet_id: &Uuid) -> Result<Pet, DomainError> {
        let row: Option<PetRow> = sqlx::query_as(
            r#"
            SELECT
                id, owner_id, name, species, breed,
                description, microchip_id, qr_code_url,
                created_at, updated_at
            FROM pets
            WHERE id = $1
            "#
        )
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence("finding pet by id", e))?;

        row.map(Pet::from).ok_or(DomainError::NotFound(*pet_id))
    }

    async fn update(&self, pet_id: &Uuid, changes: &PetChanges) -> Result<Pet, DomainError> {
        let row: Option<PetRow> = sqlx::query_as(
            r#"
            UPDATE pets
            SET
                name = COALESCE($2, name),
                species = COALESCE($3, species),
                breed = COALESCE($4, breed),
                description = CASE WHEN $5::text IS NULL THEN description ELSE NULLIF(BTRIM($5), '') END,
                microchip_id = CASE WHEN $6::text IS NULL THEN microchip_id ELSE NULLIF(BTRIM($6), '') END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, owner_id, name, species, breed,
                description, microchip_id, qr_code_url,
                created_at, updated_at
            "#
        )
        .bind(pet_id)
        .bind(&changes.name)
        .bind(&changes.species)
        .bind(&changes.breed)
        .bind(&changes.description)
        .bind(&changes.microchip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence("updating pet", e))?;

        row.map(Pet::from).ok_or(DomainError::NotFound(*pet_id))
    }

    async fn delete(&self, pet_id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(pet_id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence("deleting pet", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(*pet_id));
        }
        Ok(())
    }

    async fn attach_qr_url(&self, pet_id: &Uuid, url: &str) -> Result<Pet, DomainError> {
        let row: Option<PetRow> = sqlx::query_as(
            r#"
            UPDATE pets
            SET qr_code_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, owner_id, name, species, breed,
                description, microchip_id, qr_code_url,
                created_at, updated_at
            "#
        )
        .bind(pet_id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence("attaching QR url", e))?;

        row.map(Pet::from).ok_or(DomainError::NotFound(*pet_id))
    }
}
