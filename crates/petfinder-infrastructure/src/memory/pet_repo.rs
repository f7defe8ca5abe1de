use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use petfinder_core::domain::{NewPet, Pet, PetChanges};
use petfinder_core::error::DomainError;
use petfinder_core::repositories::PetRepository;
use petfinder_shared::new_id;

#[derive(Default)]
struct Table {
    pets: Vec<Pet>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Table {
    /// Creation times never repeat, so newest-first ordering is total.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }

    fn find_mut(&mut self, pet_id: &Uuid) -> Result<&mut Pet, DomainError> {
        self.pets
            .iter_mut()
            .find(|p| &p.id == pet_id)
            .ok_or(DomainError::NotFound(*pet_id))
    }
}

#[derive(Default)]
pub struct InMemoryPetRepository {
    table: RwLock<Table>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create(&self, owner_id: &Uuid, input: &NewPet) -> Result<Pet, DomainError> {
        let mut table = self.table.write();
        let created_at = table.next_created_at();
        let pet = Pet::from_new(new_id(), *owner_id, input, created_at);
        table.pets.push(pet.clone());
        info!("Pet created successfully: {}", pet.id);
        Ok(pet)
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Pet>, DomainError> {
        let table = self.table.read();
        let mut pets: Vec<Pet> = table
            .pets
            .iter()
            .filter(|p| p.is_owned_by(owner_id))
            .cloned()
            .collect();
        pets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pets)
    }

    async fn get_by_id(&self, pet_id: &Uuid) -> Result<Pet, DomainError> {
        self.table
            .read()
            .pets
            .iter()
            .find(|p| &p.id == pet_id)
            .cloned()
            .ok_or(DomainError::NotFound(*pet_id))
    }

    async fn update(&self, pet_id: &Uuid, changes: &PetChanges) -> Result<Pet, DomainError> {
        let mut table = self.table.write();
        let pet = table.find_mut(pet_id)?;
        pet.apply_changes(changes, Utc::now());
        Ok(pet.clone())
    }

    async fn delete(&self, pet_id: &Uuid) -> Result<(), DomainError> {
        let mut table = self.table.write();
        let before = table.pets.len();
        table.pets.retain(|p| &p.id != pet_id);
        if table.pets.len() == before {
            return Err(DomainError::NotFound(*pet_id));
        }
        Ok(())
    }

    async fn attach_qr_url(&self, pet_id: &Uuid, url: &str) -> Result<Pet, DomainError> {
        let mut table = self.table.write();
        let pet = table.find_mut(pet_id)?;
        pet.qr_code_url = Some(url.to_string());
        pet.updated_at = Utc::now();
        Ok(pet.clone())
    }
}
