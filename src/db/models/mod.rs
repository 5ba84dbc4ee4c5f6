// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod leaderboard;
pub mod quiz;
pub mod roadmap;

// API response structures
pub use api::*;

// Authentication and user models
pub use auth::*;

pub use leaderboard::*;
pub use quiz::*;
pub use roadmap::*;
