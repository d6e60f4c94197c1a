//! Load a service account key, print its cache key and fetch an access token.
//!
//! ```shell
//! GOOGLE_APPLICATION_CREDENTIALS=/path/to/key.json cargo run --example service_account
//! ```

use log::info;

use gcred_core::{Context, OsEnv, Result};
use gcred_file_read_tokio::TokioFileRead;
use gcred_google::{CredentialLoader, DefaultCredentialProvider};
use gcred_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let provider = DefaultCredentialProvider::new();
    let Some(creds) = provider.load_credentials(&ctx).await? else {
        info!("GOOGLE_APPLICATION_CREDENTIALS is not set");
        return Ok(());
    };

    info!("client: {}", creds.client_name());
    info!("cache key: {}", creds.cache_key());

    let token = creds.fetch_token(&ctx).await?;
    info!("token expires at: {:?}", token.expires_at);
    Ok(())
}
