// Core gate exports
pub mod cors;
pub mod gate;

pub use cors::{CorsHeaders, OriginAllowlist, ALLOW_HEADERS, ALLOW_METHODS};
pub use gate::{Gate, GateError, GateResponse, InboundRequest, Outcome, RequestMethod};
