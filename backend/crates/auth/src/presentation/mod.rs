//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{AuthAppState, GoogleAppState};
pub use router::{auth_router, auth_router_generic, google_router, google_router_generic};
