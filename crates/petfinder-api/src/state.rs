use std::sync::Arc;

use petfinder_infrastructure::{Backends, DynPetService, DynQrService};
use petfinder_shared::config::AppConfig;

use crate::auth::JwtVerifier;

#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<DynPetService>,
    pub qr: Arc<DynQrService>,
    pub jwt: Arc<JwtVerifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, backends: &Backends) -> Self {
        let (pets, qr) = backends.services(config.scan_base_url());
        let jwt = Arc::new(JwtVerifier::new(&config.auth.jwt_secret, &config.auth.audience));
        Self { pets, qr, jwt, config: Arc::new(config) }
    }
}
