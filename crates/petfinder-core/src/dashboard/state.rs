//! Cached pet list, changed only through typed events

use petfinder_shared::PetId;
use serde::Serialize;

use crate::domain::Pet;

/// Confirmed changes to the owner's pets.
#[derive(Debug, Clone, PartialEq)]
pub enum PetListEvent {
    /// Wholesale replacement after a (re)load.
    Loaded(Vec<Pet>),
    Added(Pet),
    Updated(Pet),
    QrAttached { pet_id: PetId, url: String },
    Removed(PetId),
}

/// Newest-first list of the owner's pets as last confirmed by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PetList {
    pets: Vec<Pet>,
}

impl PetList {
    pub fn apply(&mut self, event: PetListEvent) {
        match event {
            PetListEvent::Loaded(pets) => self.pets = pets,
            PetListEvent::Added(pet) => {
                self.pets.retain(|p| p.id != pet.id);
                self.pets.insert(0, pet);
            }
            PetListEvent::Updated(pet) => {
                if let Some(slot) = self.pets.iter_mut().find(|p| p.id == pet.id) {
                    *slot = pet;
                }
            }
            PetListEvent::QrAttached { pet_id, url } => {
                if let Some(slot) = self.pets.iter_mut().find(|p| p.id == pet_id) {
                    slot.qr_code_url = Some(url);
                }
            }
            PetListEvent::Removed(pet_id) => self.pets.retain(|p| p.id != pet_id),
        }
    }

    pub fn as_slice(&self) -> &[Pet] {
        &self.pets
    }

    pub fn get(&self, pet_id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| &p.id == pet_id)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}
