//! Types shared by the block-mult client, server and orchestrator.
//!
//! - [`blockmult`]: the generated protobuf messages and gRPC stubs for the
//!   `BlockMultService` contract (`MultiplyBlock`, `AddBlock`).
//! - [`Matrix`]: a square, row-major matrix of `f64`, convertible to and from
//!   the wire [`blockmult::Block`].

mod error;
mod matrix;
mod wire;

pub mod blockmult {
    tonic::include_proto!("blockmult");
}

pub use error::MatrixError;
pub use matrix::Matrix;
