// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  // Seed the sample catalog on startup when the table is empty
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = get_env("PORT")
      .unwrap_or_else(|_| "5000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!(
      host = %server_host,
      port = server_port,
      max_connections = database_max_connections,
      seed_db,
      "Application configuration loaded."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
