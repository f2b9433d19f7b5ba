pub mod medivision;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> BackendBox {
        return Box::new(medivision::MediVision::new(
            &Config::get(ConfigKey::ServerURL),
            &Config::get(ConfigKey::HealthCheckTimeout),
        ));
    }
}
