//! Power Ranger API
//!
//! Run with: cargo run -p power-ranger
//! Then fetch: http://127.0.0.1:8000/api-spec.json
//!
//! `GENZ_HOST`, `GENZ_PORT`, `GENZ_BODY_LIMIT` and `GENZ_ENV` are read from
//! the environment or a `.env` file.

use genz_rs::prelude::*;
use power_ranger::MemoryStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    load_dotenv();

    let app = power_ranger::build(GenZApp::from_env()?, Arc::new(MemoryStore::seeded()));
    info!("Kneel before zod!!");

    app.run().await
}
