//! # API Gateway Handler
//!
//! Maps transport requests onto the inbound ports and back.
//!
//! ## Modules
//!
//! - `handler`: ApiGatewayHandler struct and methods
//! - `types`: request and response payloads (camelCase JSON)

mod handler;
mod types;

pub use handler::{messages, ApiGatewayHandler};
pub use types::{QueryAction, QueryRequest, QueryResponse, SubmitVoteRequest, SubmitVoteResponse};
