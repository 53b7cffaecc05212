//! Client for the remote block multiply/add compute service.
//!
//! `block-client` exposes the two block primitives the matrix orchestrator
//! relies on, `multiply_block` and `add_block`, behind the [`BlockPrimitives`]
//! trait. [`BlockClient`] implements it over gRPC.
//!
//! # Features
//!
//! - One HTTP/2 channel shared by any number of overlapping calls
//! - Optional per-request deadline
//! - Replies are validated before they are handed back: a failed call never
//!   yields a block
//!
//! # Example
//!
//! ```no_run
//! use block_client::{BlockClient, BlockPrimitives};
//! use block_mult_types::Matrix;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlockClient::connect("localhost:30043").await?;
//!
//!     let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//!     let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]])?;
//!
//!     let c = client.multiply_block(&a, &b).await?;
//!     assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod primitives;

pub use client::{BlockClient, ServerAddr};
pub use error::Error;
pub use primitives::BlockPrimitives;
