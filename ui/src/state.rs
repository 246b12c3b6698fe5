use safari_business::{BusinessConfig, build_state_ctx};
use safari_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let config = BusinessConfig::from_env();
        #[cfg(target_arch = "wasm32")]
        let config = BusinessConfig::default();

        Self {
            ctx: build_state_ctx(config),
        }
    }
}

impl State {
    pub fn test(base_url: String) -> Self {
        Self {
            ctx: build_state_ctx(BusinessConfig::new(base_url)),
        }
    }
}
