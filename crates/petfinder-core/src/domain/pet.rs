// ============================================================================
// PetFinder Core - Pet Entity
// File: crates/petfinder-core/src/domain/pet.rs
// Description: Pet record, its input shapes, and the public scan projection
// ============================================================================

use chrono::{DateTime, Utc};
use petfinder_shared::{OwnerId, PetId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

/// A persisted pet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub description: Option<String>,
    pub microchip_id: Option<String>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Builds a fresh record the way a store would on insert.
    pub fn from_new(id: PetId, owner_id: OwnerId, input: &NewPet, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name.clone(),
            species: input.species.clone(),
            breed: input.breed.clone(),
            description: input.description.clone(),
            microchip_id: input.microchip_id.clone(),
            qr_code_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the supplied fields; absent fields keep their value.
    pub fn apply_changes(&mut self, changes: &PetChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(species) = &changes.species {
            self.species = species.clone();
        }
        if let Some(breed) = &changes.breed {
            self.breed = breed.clone();
        }
        if let Some(description) = &changes.description {
            self.description = non_blank(Some(description.clone()));
        }
        if let Some(microchip_id) = &changes.microchip_id {
            self.microchip_id = non_blank(Some(microchip_id.clone()));
        }
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, owner_id: &OwnerId) -> bool {
        &self.owner_id == owner_id
    }

    pub fn has_qr_code(&self) -> bool {
        self.qr_code_url.is_some()
    }
}

/// Fields an owner supplies when registering a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPet {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Species must be between 1 and 100 characters"))]
    pub species: String,

    #[validate(length(min = 1, max = 100, message = "Breed must be between 1 and 100 characters"))]
    pub breed: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(max = 64, message = "Microchip id too long"))]
    pub microchip_id: Option<String>,
}

impl NewPet {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        breed: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            breed: breed.into(),
            description: None,
            microchip_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_microchip_id(mut self, microchip_id: impl Into<String>) -> Self {
        self.microchip_id = Some(microchip_id.into());
        self
    }

    /// Trims every field, drops blank optionals, then validates.
    pub fn validated(self) -> Result<Self, DomainError> {
        let input = Self {
            name: self.name.trim().to_string(),
            species: self.species.trim().to_string(),
            breed: self.breed.trim().to_string(),
            description: non_blank(self.description),
            microchip_id: non_blank(self.microchip_id),
        };
        input.validate()?;
        Ok(input)
    }
}

/// A partial update. `None` means "not transmitted"; a blank optional
/// field clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PetChanges {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Species must be between 1 and 100 characters"))]
    pub species: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Breed must be between 1 and 100 characters"))]
    pub breed: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(max = 64, message = "Microchip id too long"))]
    pub microchip_id: Option<String>,
}

impl PetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.description.is_none()
            && self.microchip_id.is_none()
    }

    /// Trims supplied fields, then validates. Required fields stay required:
    /// a blank name is rejected rather than dropped, while a blank
    /// description or microchip id is kept as `""` to request clearing.
    pub fn validated(self) -> Result<Self, DomainError> {
        let changes = Self {
            name: self.name.map(|s| s.trim().to_string()),
            species: self.species.map(|s| s.trim().to_string()),
            breed: self.breed.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            microchip_id: self.microchip_id.map(|s| s.trim().to_string()),
        };
        changes.validate()?;
        Ok(changes)
    }
}

/// What a finder sees after scanning a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanProfile {
    pub id: PetId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub description: Option<String>,
}

impl From<&Pet> for ScanProfile {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            description: pet.description.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_new_pet_trims_and_drops_blank_optionals() {
        let input = NewPet::new("  Max ", "Dog", " Lab")
            .with_description("   ")
            .with_microchip_id(" 985112 ")
            .validated()
            .unwrap();

        assert_eq!(input.name, "Max");
        assert_eq!(input.breed, "Lab");
        assert_eq!(input.description, None);
        assert_eq!(input.microchip_id.as_deref(), Some("985112"));
    }

    #[test]
    fn test_new_pet_requires_name_species_breed() {
        let err = NewPet::new("", "Dog", "Lab").validated().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = NewPet::new("Max", "  ", "Lab").validated().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_changes_reject_blank_required_field() {
        let changes = PetChanges { name: Some(" ".into()), ..Default::default() };
        assert!(changes.validated().is_err());
    }

    #[test]
    fn test_blank_optional_update_matches_create() {
        let now = Utc::now();
        let input = NewPet::new("Max", "Dog", "Lab").with_description("   ").validated().unwrap();
        let created = Pet::from_new(Uuid::new_v4(), Uuid::new_v4(), &input, now);

        let changes = PetChanges { description: Some("   ".into()), ..Default::default() }
            .validated()
            .unwrap();
        let mut updated = created.clone();
        updated.apply_changes(&changes, now);

        assert_eq!(updated.description, created.description);
        assert_eq!(ScanProfile::from(&updated).description, None);
    }

    #[test]
    fn test_blank_optional_update_clears_value() {
        let mut pet = Pet::from_new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &NewPet::new("Max", "Dog", "Lab")
                .with_description("Brown collar")
                .with_microchip_id("985112"),
            Utc::now(),
        );

        let changes = PetChanges {
            description: Some(String::new()),
            microchip_id: Some(" ".into()),
            ..Default::default()
        }
        .validated()
        .unwrap();
        pet.apply_changes(&changes, Utc::now());

        assert_eq!(pet.description, None);
        assert_eq!(pet.microchip_id, None);
        assert_eq!(pet.name, "Max");
    }

    #[test]
    fn test_apply_changes_only_touches_supplied_fields() {
        let created = Utc::now();
        let mut pet = Pet::from_new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &NewPet::new("Max", "Dog", "Lab").with_description("Friendly"),
            created,
        );
        let before = pet.clone();

        let later = created + chrono::Duration::seconds(5);
        pet.apply_changes(&PetChanges { breed: Some("Labrador".into()), ..Default::default() }, later);

        assert_eq!(pet.breed, "Labrador");
        assert_eq!(pet.name, before.name);
        assert_eq!(pet.description, before.description);
        assert_eq!(pet.created_at, before.created_at);
        assert_eq!(pet.updated_at, later);
    }

    #[test]
    fn test_changes_reject_unknown_fields() {
        let parsed: Result<PetChanges, _> =
            serde_json::from_str(r#"{"qr_code_url":"http://evil"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_scan_profile_hides_owner_data() {
        let pet = Pet::from_new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &NewPet::new("Max", "Dog", "Lab").with_microchip_id("123"),
            Utc::now(),
        );
        let json = serde_json::to_value(ScanProfile::from(&pet)).unwrap();
        assert!(json.get("owner_id").is_none());
        assert!(json.get("microchip_id").is_none());
        assert_eq!(json["name"], "Max");
    }
}
