//! gRPC implementation of the block primitives.

use std::time::Duration;

use async_trait::async_trait;
use block_mult_types::{Matrix, MatrixError};
use block_mult_types::blockmult::block_mult_service_client::BlockMultServiceClient;
use block_mult_types::blockmult::{BlockReply, BlockRequest};
use tonic::transport::{Channel, Endpoint};

use crate::error::Error;
use crate::primitives::BlockPrimitives;

#[derive(Debug, Clone, Copy)]
enum Op {
    Multiply,
    Add,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Op::Multiply => "multiply_block",
            Op::Add => "add_block",
        }
    }
}

/// Connection to a remote `BlockMultService`.
///
/// `BlockClient` is cheap to clone. All clones share one HTTP/2 channel,
/// which multiplexes concurrent requests, so a single client can serve every
/// branch of a parallel multiplication without locking.
///
/// # Failure Handling
///
/// A call either returns a block that was checked against the request, or an
/// error. Empty operands are refused before sending. In particular:
/// 1. A non-OK status is returned as [`Error::Status`]; the reply is dropped
/// 2. A reply without a block is [`Error::MissingBlock`]
/// 3. A ragged or non-square block is [`Error::Malformed`]
/// 4. A block of the wrong size is [`Error::UnexpectedSize`]
///
/// Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use block_client::{BlockClient, BlockPrimitives};
/// use block_mult_types::Matrix;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client =
///         BlockClient::connect_with_timeout("localhost:30043", Duration::from_secs(5)).await?;
///
///     let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
///     let sum = client.add_block(&a, &a).await?;
///     assert_eq!(sum.to_rows(), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BlockClient {
    client: BlockMultServiceClient<Channel>,
}

impl BlockClient {
    /// Connects to a block-mult server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Server address (e.g., `"localhost:30043"`)
    pub async fn connect(addr: impl Into<ServerAddr>) -> Result<Self, Error> {
        let endpoint = Self::endpoint(addr.into())?;
        Self::connect_endpoint(endpoint).await
    }

    /// Connects to a block-mult server, applying `timeout` to every request.
    ///
    /// A request that exceeds the deadline fails with a `DeadlineExceeded`
    /// or `Cancelled` status.
    pub async fn connect_with_timeout(
        addr: impl Into<ServerAddr>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let endpoint = Self::endpoint(addr.into())?.timeout(timeout);
        Self::connect_endpoint(endpoint).await
    }

    fn endpoint(addr: ServerAddr) -> Result<Endpoint, Error> {
        Ok(Endpoint::from_shared(format!("http://{}", addr.0))?)
    }

    async fn connect_endpoint(endpoint: Endpoint) -> Result<Self, Error> {
        tracing::debug!(uri = %endpoint.uri(), "connecting to block-mult server");
        let channel = endpoint.connect().await?;
        Ok(Self {
            client: BlockMultServiceClient::new(channel),
        })
    }

    async fn call(&self, op: Op, a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
        if a.dim() != b.dim() {
            return Err(Error::ShapeMismatch(a.dim(), b.dim()));
        }
        let size = a.dim();
        if size == 0 {
            return Err(Error::Malformed(MatrixError::Empty));
        }

        let request = BlockRequest {
            a: Some(a.into()),
            b: Some(b.into()),
            size: size as u32,
        };

        tracing::debug!(op = op.name(), size, "dispatching block request");

        let mut client = self.client.clone();
        let response = match op {
            Op::Multiply => client.multiply_block(request).await,
            Op::Add => client.add_block(request).await,
        };

        let reply = match response {
            Ok(response) => response.into_inner(),
            Err(status) => {
                tracing::warn!(op = op.name(), %status, "block request failed");
                return Err(status.into());
            }
        };

        decode_reply(reply, size)
    }
}

fn decode_reply(reply: BlockReply, size: usize) -> Result<Matrix, Error> {
    let block = reply.block.ok_or(Error::MissingBlock)?;
    let matrix = Matrix::try_from(block)?;
    if matrix.dim() != size {
        return Err(Error::UnexpectedSize {
            expected: size,
            got: matrix.dim(),
        });
    }
    Ok(matrix)
}

#[async_trait]
impl BlockPrimitives for BlockClient {
    async fn multiply_block(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
        self.call(Op::Multiply, a, b).await
    }

    async fn add_block(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
        self.call(Op::Add, a, b).await
    }
}

/// Server address wrapper for type-safe connection.
#[derive(Clone)]
pub struct ServerAddr(pub String);

impl From<String> for ServerAddr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ServerAddr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
