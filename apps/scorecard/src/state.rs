use crate::config::Config;
use crate::gateway::AnalysisGateway;
use crate::report::ReportLayout;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: AnalysisGateway,
    /// Per-session result slot. Backed by Redis or in-process memory.
    pub store: ResultStore,
    pub config: Config,
    /// Page geometry and overflow policy for exported reports.
    pub report_layout: ReportLayout,
}
