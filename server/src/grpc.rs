use block_mult_types::blockmult::block_mult_service_server::{
    BlockMultService, BlockMultServiceServer,
};
use block_mult_types::blockmult::{Block, BlockReply, BlockRequest};
use block_mult_types::{Matrix, MatrixError};
use thiserror::Error;
use tonic::{Request, Response, Status};

use crate::compute;

#[derive(Debug, Error)]
enum RequestError {
    #[error("operand {0} is missing")]
    MissingOperand(&'static str),

    #[error("operand {operand} is malformed: {source}")]
    Malformed {
        operand: &'static str,
        source: MatrixError,
    },

    #[error("operand {operand} is {got}x{got}, request declares size {size}")]
    SizeMismatch {
        operand: &'static str,
        size: usize,
        got: usize,
    },

    #[error("block size {got} is not the agreed size {agreed}")]
    UnsupportedSize { agreed: usize, got: usize },
}

impl From<RequestError> for Status {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::UnsupportedSize { .. } => Status::failed_precondition(err.to_string()),
            _ => Status::invalid_argument(err.to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct BlockMultServiceImpl {
    block_size: Option<usize>,
}

impl BlockMultServiceImpl {
    /// Accepts blocks of any size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only `block_size`×`block_size` blocks.
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: Some(block_size),
        }
    }

    fn operands(&self, req: BlockRequest) -> Result<(Matrix, Matrix), RequestError> {
        let size = req.size as usize;
        if let Some(agreed) = self.block_size {
            if size != agreed {
                return Err(RequestError::UnsupportedSize { agreed, got: size });
            }
        }

        let a = operand("a", req.a, size)?;
        let b = operand("b", req.b, size)?;
        Ok((a, b))
    }
}

fn operand(name: &'static str, block: Option<Block>, size: usize) -> Result<Matrix, RequestError> {
    let block = block.ok_or(RequestError::MissingOperand(name))?;
    let matrix = Matrix::try_from(block).map_err(|source| RequestError::Malformed {
        operand: name,
        source,
    })?;
    if matrix.dim() != size {
        return Err(RequestError::SizeMismatch {
            operand: name,
            size,
            got: matrix.dim(),
        });
    }
    Ok(matrix)
}

#[tonic::async_trait]
impl BlockMultService for BlockMultServiceImpl {
    async fn multiply_block(
        &self,
        request: Request<BlockRequest>,
    ) -> Result<Response<BlockReply>, Status> {
        let req = request.into_inner();
        tracing::info!(size = req.size, "multiply_block");

        let (a, b) = self.operands(req)?;
        let c = compute::multiply(&a, &b);

        Ok(Response::new(BlockReply {
            block: Some(Block::from(&c)),
        }))
    }

    async fn add_block(
        &self,
        request: Request<BlockRequest>,
    ) -> Result<Response<BlockReply>, Status> {
        let req = request.into_inner();
        tracing::info!(size = req.size, "add_block");

        let (a, b) = self.operands(req)?;
        let c = compute::add(&a, &b);

        Ok(Response::new(BlockReply {
            block: Some(Block::from(&c)),
        }))
    }
}

pub fn create_server(service: BlockMultServiceImpl) -> BlockMultServiceServer<BlockMultServiceImpl> {
    BlockMultServiceServer::new(service)
}
