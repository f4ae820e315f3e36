//! Log in, run a bill query and log out.
//!
//! ```text
//! KDSVC_URL=http://erp.example.com/k3cloud/ \
//! KDSVC_DB_ID=5f1a KDSVC_USER=administrator KDSVC_PASSWORD=secret \
//! RUST_LOG=kdsvc_rpc=debug cargo run --example bill_query
//! ```

use serde_json::json;
use tracing_subscriber::EnvFilter;

use kdsvc_rpc::{
    //
    ClientConfig,
    LoginRequest,
    Result,
    WebApiClient,
};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::new(env_or("KDSVC_URL", "http://localhost/k3cloud/"));
    let client = WebApiClient::new(config)?;

    let login = client
        .login(LoginRequest::credentials(
            env_or("KDSVC_DB_ID", ""),
            env_or("KDSVC_USER", "administrator"),
            env_or("KDSVC_PASSWORD", ""),
        ))
        .await?;
    println!("login: {login}");

    let rows = client
        .execute_bill_query(&json!({
            "FormId": "BD_MATERIAL",
            "FieldKeys": "FNumber,FName",
            "FilterString": "",
            "TopRowCount": 10,
        }))
        .await?;
    println!("rows: {rows}");

    client.logout().await?;
    Ok(())
}
