// ============================================================================
// PetFinder Core - Dashboard Controller
// File: crates/petfinder-core/src/dashboard/controller.rs
// Description: Single-screen state machine driving the pet services
// ============================================================================

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use petfinder_shared::PetId;
use tracing::{debug, error};

use crate::dashboard::state::{PetList, PetListEvent};
use crate::domain::{NewPet, Pet, PetChanges};
use crate::error::DomainError;
use crate::repositories::PetRepository;
use crate::services::{PetService, QrService};
use crate::session::Session;
use crate::storage::ObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Generating(PetId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Completed,
    Failed(DomainError),
    /// The action is not accepted in the current phase.
    Ignored,
}

#[derive(Debug)]
struct DashboardState {
    phase: Phase,
    pets: PetList,
    generating: HashSet<PetId>,
    notifications: VecDeque<Notification>,
}

impl DashboardState {
    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push_back(Notification { level, message: message.into() });
    }

    fn settle_generating(&mut self) {
        self.phase = match self.generating.iter().next() {
            Some(pet_id) => Phase::Generating(*pet_id),
            None => Phase::Ready,
        };
    }
}

/// Drives one owner's dashboard.
///
/// State lives in a `RefCell` and is never borrowed across an `.await`, so
/// actions can be interleaved on a single task without locks.
pub struct DashboardController<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> {
    session: Session,
    pets: Arc<PetService<R, S>>,
    qr: Arc<QrService<R, S>>,
    state: RefCell<DashboardState>,
}

impl<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> DashboardController<R, S> {
    pub fn new(session: Session, pets: Arc<PetService<R, S>>, qr: Arc<QrService<R, S>>) -> Self {
        Self {
            session,
            pets,
            qr,
            state: RefCell::new(DashboardState {
                phase: Phase::Idle,
                pets: PetList::default(),
                generating: HashSet::new(),
                notifications: VecDeque::new(),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn pets(&self) -> Vec<Pet> {
        self.state.borrow().pets.as_slice().to_vec()
    }

    pub fn is_generating(&self, pet_id: &PetId) -> bool {
        self.state.borrow().generating.contains(pet_id)
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.state.borrow_mut().notifications.drain(..).collect()
    }

    /// `Idle|Ready → Loading → Ready`
    pub async fn load(&self) -> ActionOutcome {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !matches!(state.phase, Phase::Idle | Phase::Ready) {
                debug!("load ignored in phase {:?}", state.phase);
                return ActionOutcome::Ignored;
            }
            std::mem::replace(&mut state.phase, Phase::Loading)
        };

        let result = self.pets.list(&self.session).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(pets) => {
                state.pets.apply(PetListEvent::Loaded(pets));
                state.phase = Phase::Ready;
                ActionOutcome::Completed
            }
            Err(e) => {
                error!("Failed to load pets for owner {}: {}", self.session.owner_id, e);
                state.phase = previous;
                state.notify(NotificationLevel::Error, "Failed to load pets");
                ActionOutcome::Failed(e)
            }
        }
    }

    /// `Ready → Submitting → Ready`; the list changes only once the store confirms.
    pub async fn add_pet(&self, input: NewPet) -> ActionOutcome {
        if !self.enter(Phase::Submitting) {
            return ActionOutcome::Ignored;
        }

        let result = self.pets.register(&self.session, input).await;

        let mut state = self.state.borrow_mut();
        state.phase = Phase::Ready;
        match result {
            Ok(pet) => {
                state.pets.apply(PetListEvent::Added(pet));
                state.notify(NotificationLevel::Success, "Pet added successfully!");
                ActionOutcome::Completed
            }
            Err(e) => {
                error!("Failed to add pet: {}", e);
                let message = match &e {
                    DomainError::Validation(msg) => msg.clone(),
                    _ => "Failed to add pet".to_string(),
                };
                state.notify(NotificationLevel::Error, message);
                ActionOutcome::Failed(e)
            }
        }
    }

    /// `Ready → Submitting → Ready`
    pub async fn update_pet(&self, pet_id: PetId, changes: PetChanges) -> ActionOutcome {
        if !self.enter(Phase::Submitting) {
            return ActionOutcome::Ignored;
        }

        let result = self.pets.update(&self.session, &pet_id, changes).await;

        let mut state = self.state.borrow_mut();
        state.phase = Phase::Ready;
        match result {
            Ok(pet) => {
                state.pets.apply(PetListEvent::Updated(pet));
                state.notify(NotificationLevel::Success, "Pet updated successfully");
                ActionOutcome::Completed
            }
            Err(e) => {
                error!("Failed to update pet {}: {}", pet_id, e);
                state.notify(NotificationLevel::Error, "Failed to update pet");
                ActionOutcome::Failed(e)
            }
        }
    }

    /// `Ready → Submitting → Ready`. A reload cannot start until the removal
    /// is confirmed, so it never brings the pet back.
    pub async fn delete_pet(&self, pet_id: PetId) -> ActionOutcome {
        if !self.enter(Phase::Submitting) {
            return ActionOutcome::Ignored;
        }

        let result = self.pets.remove(&self.session, &pet_id).await;

        let mut state = self.state.borrow_mut();
        state.phase = Phase::Ready;
        match result {
            Ok(()) => {
                state.pets.apply(PetListEvent::Removed(pet_id));
                state.notify(NotificationLevel::Success, "Pet deleted successfully");
                ActionOutcome::Completed
            }
            Err(e) => {
                error!("Failed to delete pet {}: {}", pet_id, e);
                state.notify(NotificationLevel::Error, "Failed to delete pet");
                ActionOutcome::Failed(e)
            }
        }
    }

    /// `Ready → Generating(pet) → Ready`. A pet already in flight is a no-op.
    pub async fn generate_qr(&self, pet_id: PetId) -> ActionOutcome {
        {
            let mut state = self.state.borrow_mut();
            if !matches!(state.phase, Phase::Ready | Phase::Generating(_)) {
                return ActionOutcome::Ignored;
            }
            if !state.generating.insert(pet_id) {
                debug!("QR generation already running for pet {}", pet_id);
                return ActionOutcome::Ignored;
            }
            state.phase = Phase::Generating(pet_id);
        }

        let result = self.qr.generate(&self.session, &pet_id).await;

        let mut state = self.state.borrow_mut();
        state.generating.remove(&pet_id);
        state.settle_generating();
        match result {
            Ok(pet) => {
                if let Some(url) = pet.qr_code_url {
                    state.pets.apply(PetListEvent::QrAttached { pet_id, url });
                }
                state.notify(NotificationLevel::Success, "QR code generated!");
                ActionOutcome::Completed
            }
            Err(e) => {
                error!("Failed to generate QR code for pet {}: {}", pet_id, e);
                state.notify(NotificationLevel::Error, "Failed to generate QR code");
                ActionOutcome::Failed(e)
            }
        }
    }

    fn enter(&self, next: Phase) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase != Phase::Ready {
            debug!("{:?} ignored in phase {:?}", next, state.phase);
            return false;
        }
        state.phase = next;
        true
    }
}
