use clap::Parser;
use cobalt_dns_domain::CliOverrides;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "cobalt-dns")]
#[command(version)]
#[command(about = "Cobalt DNS - authoritative DNS server backed by SQL with a fail-open cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Fallback upstream server (ip:port)
    #[arg(long)]
    fallback: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        fallback_server: cli.fallback.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Cobalt DNS v{}", env!("CARGO_PKG_VERSION"));

    let database_url = format!("sqlite:{}", config.database.path);
    let pool = bootstrap::init_database(&database_url, &config.database).await?;

    let services = di::Services::new(&config, pool).await?;

    let refresh_job = Arc::new(
        cobalt_dns_infrastructure::jobs::ZoneRefreshJob::new(
            services.store.clone(),
            config.database.zone_refresh_interval_secs,
        ),
    );
    refresh_job.start().await;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    server::start_dns_server(dns_addr, services.handler, config.server.tcp_timeout_secs).await?;

    info!("Server shutdown complete");
    Ok(())
}
