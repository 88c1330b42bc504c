//! Settings API endpoints - JSON API

use axum::extract::State;
use axum::Json;
use ezpay_config::Config;

use crate::AppState;

pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezpay_core::Registries;

    #[tokio::test]
    async fn test_settings_echo_config() {
        let mut config = Config::default();
        config.registry.success_probability = 0.5;
        let state = AppState::new(Registries::from_config(&config.registry).unwrap(), config);
        let Json(body) = api_settings(State(state)).await;
        assert_eq!(body.registry.success_probability, 0.5);
        assert_eq!(body.server.port, 8080);
    }
}
