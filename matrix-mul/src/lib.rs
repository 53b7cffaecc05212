//! Recursive block matrix multiplication over a remote compute service.
//!
//! `matrix-mul` multiplies square matrices by splitting them into quadrants
//! until they reach the block size, sending each block product and block sum
//! to a [`BlockPrimitives`](block_client::BlockPrimitives) backend, and
//! stitching the partial results back together.
//!
//! # Algorithm
//!
//! For `N > block_size`, with `A` and `B` split into quadrants:
//!
//! - `R_tl = A_tl·B_tl + A_tr·B_bl`
//! - `R_tr = A_tl·B_tr + A_tr·B_br`
//! - `R_bl = A_bl·B_tl + A_br·B_bl`
//! - `R_br = A_bl·B_tr + A_br·B_br`
//!
//! The four result quadrants are computed as concurrent tasks, the two
//! products inside each quadrant run concurrently, and every `+` is itself a
//! recursive block add. `N` must be `block_size · 2^k`.
//!
//! # Example
//!
//! ```no_run
//! use block_client::BlockClient;
//! use matrix_mul::BlockMultiplier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlockClient::connect("localhost:30043").await?;
//!     let multiplier = BlockMultiplier::with_block_size(client, 2)?;
//!
//!     let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
//!     let b = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
//!
//!     let result = multiplier.multiply_rows(a, b).await?;
//!     assert_eq!(result.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod multiplier;
pub mod quadrant;

pub use config::Config;
pub use error::{Error, Result};
pub use multiplier::{BlockMultiplier, DEFAULT_BLOCK_SIZE};
pub use quadrant::{Quadrant, Quadrants, decompose, recombine};
