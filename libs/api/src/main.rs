use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{serve, telemetry, Config};
use content::Content;
use repository::Repository;
use tokio::net::TcpListener;
use util::load_env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_name =
        std::env::args().nth(1).unwrap_or_else(|| "Config.toml".to_string());
    let config = Config::load(&config_name)
        .with_context(|| format!("failed to load {config_name}"))?;
    telemetry::init_tracing(&config.log)?;

    let secrets = load_env("Secrets.dev.toml")?;
    let conn_string = secrets
        .get("DATABASE_URL")
        .and_then(|v| v.as_str())
        .context("DATABASE_URL was not found")?;
    let jwt_secret = secrets
        .get("JWT_SECRET")
        .and_then(|v| v.as_str())
        .context("JWT_SECRET was not found")?;

    let repository = Repository::new(conn_string).await?;
    let port = config.server.port;
    let router = serve(Content::new(&repository), config, jwt_secret).await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(&address).await?;
    Ok(axum::serve(listener, router).await?)
}
