use std::sync::Arc;

use crate::config::Config;
use crate::db::ActivityLog;
use crate::platform::{EventTrigger, JourneyCatalog, TokenProvider};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ActivityLog>,
    pub tokens: TokenProvider,
    pub events: EventTrigger,
    pub journeys: JourneyCatalog,
}
