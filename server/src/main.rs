use std::env;
use std::net::SocketAddr;

use tonic::transport::Server;

use block_server::{create_server, BlockMultServiceImpl};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "30043".to_string());

    let service = match env::var("BLOCK_SIZE") {
        Ok(size) => BlockMultServiceImpl::with_block_size(size.parse::<usize>()?),
        Err(_) => BlockMultServiceImpl::new(),
    };

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!(%addr, "block-mult server listening");
    Server::builder()
        .add_service(create_server(service))
        .serve(addr)
        .await?;

    Ok(())
}
