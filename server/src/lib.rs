//! Reference implementation of the `BlockMultService` compute backend.

pub mod compute;
pub mod grpc;

pub use grpc::{create_server, BlockMultServiceImpl};
