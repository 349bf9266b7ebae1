use std::sync::Arc;

use crate::config::Config;
use crate::relay::Notifier;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub notifier: Arc<dyn Notifier>,
}
