pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
