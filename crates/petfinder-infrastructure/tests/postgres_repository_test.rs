//! Runs against a real database: `DATABASE_URL=... cargo test -- --ignored`

use petfinder_core::domain::{NewPet, PetChanges};
use petfinder_core::repositories::PetRepository;
use petfinder_infrastructure::{create_pool, run_migrations, PgPetRepository};
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&url, 2, 1).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_same_timestamp_lists_newest_insert_first() {
    let pool = pool().await;
    let owner = Uuid::new_v4();

    // NOW() is fixed for the whole transaction, so all three rows tie on created_at
    let mut tx = pool.begin().await.unwrap();
    for name in ["First", "Second", "Third"] {
        sqlx::query("INSERT INTO pets (owner_id, name, species, breed) VALUES ($1, $2, 'Dog', 'Lab')")
            .bind(owner)
            .bind(name)
            .execute(&mut *tx)
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let repo = PgPetRepository::new(pool);
    let names: Vec<String> = repo
        .list_by_owner(&owner)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_blank_optional_update_clears_column() {
    let repo = PgPetRepository::new(pool().await);
    let pet = repo
        .create(&Uuid::new_v4(), &NewPet::new("Max", "Dog", "Lab").with_description("Friendly"))
        .await
        .unwrap();

    let changes = PetChanges { description: Some("  ".into()), ..Default::default() };
    let updated = repo.update(&pet.id, &changes).await.unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.name, "Max");
}
