use std::sync::Arc;

use crate::config::PageConfig;
use crate::fallback::FallbackDataset;
use crate::steam::SteamGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn SteamGateway>,
    pub fallback: Arc<FallbackDataset>,
    pub page: Arc<PageConfig>,
    /// Both Steam credentials are present
    pub configured: bool,
}
