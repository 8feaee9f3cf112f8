use cobalt_dns_infrastructure::dns::server::DnsServerHandler;
use hickory_server::ServerFuture;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    tcp_timeout_secs: u64,
) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let udp_socket = UdpSocket::bind(&bind_addr).await?;
    let tcp_listener = TcpListener::bind(&bind_addr).await?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, Duration::from_secs(tcp_timeout_secs));

    info!(bind_address = %bind_addr, "DNS server ready");
    server.block_until_done().await?;
    Ok(())
}
