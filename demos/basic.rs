use backend_http::{BackendClient, BackendError};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // USE_AUTH0_AUTHORIZATION, NEXT_PUBLIC_BACKEND_API_URL and FRONTEND_URL
    // are read once here; unset values fall back to the local defaults.
    let client = BackendClient::from_env()?;

    match client.get_json::<Value>("/health").await {
        Ok(health) => println!("backend healthy: {health}"),
        Err(BackendError::NoConnection) => eprintln!("backend is not reachable"),
        Err(err) => return Err(err.into()),
    }

    let response = client
        .post_json("/v1/datasets", &serde_json::json!({ "name": "reports" }))
        .await?;
    println!("created dataset: {}", response.text().await?);

    Ok(())
}
