//! HTTP API module for the scheduling engine.
//!
//! This module exposes headcount estimation, labor aggregation and cell
//! coloring to presentation clients as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CellColorsRequest, HeadcountRequest, LaborRequest};
pub use response::{
    ApiError, CellColorRow, CellColorsResponse, HeadcountResponse, LaborResponse,
};
pub use state::AppState;
