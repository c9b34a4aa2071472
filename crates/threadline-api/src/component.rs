//! Spin entry point.

use spin_sdk::http_component;

use crate::{ApiConfig, ApiRequest, ApiResponse, App};

#[http_component]
fn handle_threadline(req: ApiRequest) -> anyhow::Result<ApiResponse> {
    let config = ApiConfig::default().with_env_overrides();
    let app = App::from_config(config)?;
    Ok(app.handle(req))
}
