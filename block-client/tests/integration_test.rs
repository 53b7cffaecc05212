use std::net::SocketAddr;
use std::time::Duration;

use block_client::{BlockClient, BlockPrimitives, Error};
use block_mult_types::Matrix;
use block_mult_types::blockmult::block_mult_service_server::{
    BlockMultService, BlockMultServiceServer,
};
use block_mult_types::blockmult::{BlockReply, BlockRequest};
use block_server::{create_server, BlockMultServiceImpl};
use tokio::net::TcpListener;
use tokio::time::sleep;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

/// Answers every request only after `delay`.
struct SlowService {
    delay: Duration,
}

#[tonic::async_trait]
impl BlockMultService for SlowService {
    async fn multiply_block(
        &self,
        request: Request<BlockRequest>,
    ) -> Result<Response<BlockReply>, Status> {
        sleep(self.delay).await;
        Ok(Response::new(BlockReply {
            block: request.into_inner().a,
        }))
    }

    async fn add_block(
        &self,
        request: Request<BlockRequest>,
    ) -> Result<Response<BlockReply>, Status> {
        self.multiply_block(request).await
    }
}

async fn start_slow_server(delay: Duration) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(BlockMultServiceServer::new(SlowService { delay }))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    sleep(Duration::from_millis(100)).await;
    (addr, handle)
}

async fn start_test_server(
    service: BlockMultServiceImpl,
) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(create_server(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    sleep(Duration::from_millis(100)).await;
    (addr, handle)
}

fn sample() -> Matrix {
    Matrix::from_rows(vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
        vec![9.0, 10.0, 11.0, 12.0],
        vec![13.0, 14.0, 15.0, 16.0],
    ])
    .unwrap()
}

#[tokio::test]
async fn test_multiply_block() {
    let (addr, _handle) = start_test_server(BlockMultServiceImpl::with_block_size(4)).await;
    let client = BlockClient::connect(addr.to_string()).await.unwrap();

    let c = client.multiply_block(&sample(), &sample()).await.unwrap();

    assert_eq!(
        c.to_rows(),
        vec![
            vec![90.0, 100.0, 110.0, 120.0],
            vec![202.0, 228.0, 254.0, 280.0],
            vec![314.0, 356.0, 398.0, 440.0],
            vec![426.0, 484.0, 542.0, 600.0],
        ]
    );
}

#[tokio::test]
async fn test_add_block() {
    let (addr, _handle) = start_test_server(BlockMultServiceImpl::new()).await;
    let client = BlockClient::connect_with_timeout(addr.to_string(), Duration::from_secs(5))
        .await
        .unwrap();

    let c = client.add_block(&sample(), &sample()).await.unwrap();

    assert_eq!(c.get(0, 0), 2.0);
    assert_eq!(c.get(3, 3), 32.0);
}

#[tokio::test]
async fn test_overlapping_calls_share_one_client() {
    let (addr, _handle) = start_test_server(BlockMultServiceImpl::new()).await;
    let client = BlockClient::connect(addr.to_string()).await.unwrap();
    let a = sample();

    let (p, s) = tokio::join!(client.multiply_block(&a, &a), client.add_block(&a, &a));

    assert_eq!(p.unwrap().get(0, 0), 90.0);
    assert_eq!(s.unwrap().get(0, 0), 2.0);
}

#[tokio::test]
async fn test_rejected_request_surfaces_status() {
    let (addr, _handle) = start_test_server(BlockMultServiceImpl::with_block_size(2)).await;
    let client = BlockClient::connect(addr.to_string()).await.unwrap();

    let err = client.multiply_block(&sample(), &sample()).await.unwrap_err();

    match err {
        Error::Status(status) => assert_eq!(status.code(), tonic::Code::FailedPrecondition),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mismatched_operands_are_not_sent() {
    let (addr, _handle) = start_test_server(BlockMultServiceImpl::new()).await;
    let client = BlockClient::connect(addr.to_string()).await.unwrap();

    let err = client
        .add_block(&sample(), &Matrix::zeros(2))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ShapeMismatch(4, 2)));
}

#[tokio::test]
async fn test_expired_deadline_surfaces_status() {
    let (addr, _handle) = start_slow_server(Duration::from_secs(2)).await;
    let client = BlockClient::connect_with_timeout(addr.to_string(), Duration::from_millis(100))
        .await
        .unwrap();

    let err = client.multiply_block(&sample(), &sample()).await.unwrap_err();

    match err {
        Error::Status(status) => assert!(
            matches!(
                status.code(),
                tonic::Code::DeadlineExceeded | tonic::Code::Cancelled
            ),
            "unexpected status {status:?}"
        ),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_reply_within_deadline_succeeds() {
    let (addr, _handle) = start_slow_server(Duration::from_millis(50)).await;
    let client = BlockClient::connect_with_timeout(addr.to_string(), Duration::from_secs(5))
        .await
        .unwrap();

    let echoed = client.add_block(&sample(), &sample()).await.unwrap();
    assert_eq!(echoed, sample());
}
