//! Standalone runner for the gorest-flavored mock API.
//!
//! Binds 127.0.0.1 on `PORT` (default 3000) and serves the same router the
//! tests drive in-process. Point the `userhub` CLI at it with
//! `GOREST_API_URL=http://127.0.0.1:3000`.

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("gorest mock listening on http://{addr}");
    mock_server::run(listener).await
}
