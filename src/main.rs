use api::{serve, telemetry, Config};
use content::Content;
use repository::Repository;
use shuttle_runtime::{Error, SecretStore, Secrets};
use tracing::info;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
    #[shuttle_shared_db::Postgres(local_uri = "{secrets.DATABASE_URL}")]
    conn_string: String,
) -> shuttle_axum::ShuttleAxum {
    let config = Config::load("Config.toml")
        .map_err(|e| Error::BuildPanic(e.to_string()))?;
    telemetry::init_tracing(&config.log)
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let Some(jwt_secret) = secret_store.get("JWT_SECRET") else {
        return Err(Error::BuildPanic("JWT_SECRET was not found".to_string()));
    };

    let repository = Repository::new(&conn_string)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;
    info!(task = "connected to database");

    let router = serve(Content::new(&repository), config, &jwt_secret)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
