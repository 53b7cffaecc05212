//! Recursive block multiplication driver.

use std::sync::Arc;

use block_client::BlockPrimitives;
use block_mult_types::Matrix;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::task::JoinSet;

use crate::error::{Error, Result};
use crate::quadrant::{Quadrant, QuadrantSlots, Quadrants, decompose, recombine};

/// Block size used when none is configured.
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Multiplies square matrices by recursive quadrant decomposition, sending
/// every block-sized product and sum to a [`BlockPrimitives`] backend.
///
/// The backend is injected and shared by all concurrent branches of a
/// multiplication, so it must accept overlapping calls.
///
/// # Concurrency
///
/// Each recursion level spawns its four result quadrants as tasks on a
/// [`JoinSet`]. Every task is tagged with its [`Quadrant`] and results are
/// placed by tag, so completion order never affects the output. Inside a
/// quadrant the two products run concurrently and the sum waits for both.
///
/// The first failure aborts the whole multiplication: sibling tasks are
/// aborted, and no partial result is recombined.
pub struct BlockMultiplier<C> {
    client: Arc<C>,
    block_size: usize,
}

impl<C: BlockPrimitives + 'static> BlockMultiplier<C> {
    /// Creates a multiplier with [`DEFAULT_BLOCK_SIZE`].
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Creates a multiplier whose recursion stops at `block_size`.
    ///
    /// Fails with [`Error::Config`] unless `block_size` is a power of two.
    pub fn with_block_size(client: C, block_size: usize) -> Result<Self> {
        Self::from_shared(Arc::new(client), block_size)
    }

    /// Like [`with_block_size`](Self::with_block_size), for a backend that is
    /// already shared.
    pub fn from_shared(client: Arc<C>, block_size: usize) -> Result<Self> {
        if !block_size.is_power_of_two() {
            return Err(Error::Config(format!(
                "block size must be a power of two, got {block_size}"
            )));
        }
        Ok(Self { client, block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Multiplies two matrices given as nested rows.
    ///
    /// Missing, ragged or non-square input is [`Error::InvalidInput`].
    pub async fn multiply_rows(&self, a: Vec<Vec<f64>>, b: Vec<Vec<f64>>) -> Result<Matrix> {
        let a = Matrix::from_rows(a).map_err(|e| Error::InvalidInput(format!("matrix A: {e}")))?;
        let b = Matrix::from_rows(b).map_err(|e| Error::InvalidInput(format!("matrix B: {e}")))?;
        self.multiply(&a, &b).await
    }

    /// Computes `a · b`.
    pub async fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        self.validate(a, b)?;
        tracing::info!(dim = a.dim(), block_size = self.block_size, "multiplying");

        let result =
            multiply_recursive(Arc::clone(&self.client), a.clone(), b.clone(), self.block_size)
                .await;
        if let Err(err) = &result {
            tracing::warn!(%err, "multiplication aborted");
        }
        result
    }

    /// Computes `a + b`, one block-sized [`add_block`](BlockPrimitives::add_block)
    /// per block.
    pub async fn add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        self.validate(a, b)?;
        add_recursive(Arc::clone(&self.client), a.clone(), b.clone(), self.block_size).await
    }

    fn validate(&self, a: &Matrix, b: &Matrix) -> Result<()> {
        if a.dim() != b.dim() {
            return Err(Error::InvalidInput(format!(
                "dimension mismatch: A is {0}x{0}, B is {1}x{1}",
                a.dim(),
                b.dim()
            )));
        }

        let n = a.dim();
        let bs = self.block_size;
        if n < bs || n % bs != 0 || !(n / bs).is_power_of_two() {
            return Err(Error::InvalidShape(format!(
                "{n}x{n} does not reduce to {bs}x{bs} blocks by halving"
            )));
        }
        Ok(())
    }
}

fn multiply_recursive<C>(
    client: Arc<C>,
    a: Matrix,
    b: Matrix,
    block_size: usize,
) -> BoxFuture<'static, Result<Matrix>>
where
    C: BlockPrimitives + 'static,
{
    async move {
        let n = a.dim();
        if n == block_size {
            tracing::debug!(dim = n, "multiply_block");
            return Ok(client.multiply_block(&a, &b).await?);
        }

        let a = decompose(&a)?;
        let b = decompose(&b)?;
        tracing::debug!(dim = n, half = n / 2, "split operands into quadrants");

        // R[r][c] = A[r][left]·B[top][c] + A[r][right]·B[bottom][c]
        let mut branches = JoinSet::new();
        for quadrant in Quadrant::ALL {
            let (bottom, right) = (quadrant.is_bottom(), quadrant.is_right());
            let a1 = a.get(Quadrant::at(bottom, false)).clone();
            let b1 = b.get(Quadrant::at(false, right)).clone();
            let a2 = a.get(Quadrant::at(bottom, true)).clone();
            let b2 = b.get(Quadrant::at(true, right)).clone();
            let client = Arc::clone(&client);

            branches.spawn(async move {
                let result = async {
                    let (p1, p2) = tokio::try_join!(
                        multiply_recursive(Arc::clone(&client), a1, b1, block_size),
                        multiply_recursive(Arc::clone(&client), a2, b2, block_size),
                    )?;
                    add_recursive(client, p1, p2, block_size).await
                }
                .await;
                (quadrant, result)
            });
        }

        let mut slots = QuadrantSlots::default();
        while let Some(joined) = branches.join_next().await {
            let (quadrant, result) = joined?;
            slots.insert(quadrant, result?);
        }

        recombine(slots.into_quadrants()?)
    }
    .boxed()
}

fn add_recursive<C>(
    client: Arc<C>,
    a: Matrix,
    b: Matrix,
    block_size: usize,
) -> BoxFuture<'static, Result<Matrix>>
where
    C: BlockPrimitives + 'static,
{
    async move {
        let n = a.dim();
        if n == block_size {
            tracing::debug!(dim = n, "add_block");
            return Ok(client.add_block(&a, &b).await?);
        }

        let a = decompose(&a)?;
        let b = decompose(&b)?;

        let (top_left, top_right, bottom_left, bottom_right) = tokio::try_join!(
            add_recursive(Arc::clone(&client), a.top_left, b.top_left, block_size),
            add_recursive(Arc::clone(&client), a.top_right, b.top_right, block_size),
            add_recursive(Arc::clone(&client), a.bottom_left, b.bottom_left, block_size),
            add_recursive(Arc::clone(&client), a.bottom_right, b.bottom_right, block_size),
        )?;

        recombine(Quadrants {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        })
    }
    .boxed()
}
