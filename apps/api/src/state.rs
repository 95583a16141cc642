use std::sync::Arc;

use crate::config::Config;
use crate::export::{ExportPipeline, Snapshotter};
use crate::session::Sessions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Sessions,
    /// Snapshot + PDF assembly. Default capture: `LayoutRasterizer`.
    pub exporter: ExportPipeline,
}

impl AppState {
    pub fn new(config: Config, snapshotter: Arc<dyn Snapshotter>) -> Self {
        Self {
            sessions: Sessions::new(config.max_sessions, config.session_idle_ttl()),
            exporter: ExportPipeline::new(snapshotter, config.export_pixel_ratio),
            config,
        }
    }
}
