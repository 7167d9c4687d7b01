//! Basic usage example

use envloader::Record;
use std::time::Duration;

#[derive(Debug, Default, Record)]
struct Config {
    // Loaded from DATABASE_URL
    #[tag(env = "DATABASE_URL")]
    pub database_url: String,

    // Numeric type, range-checked for u32
    #[tag(env = "MAX_CONNECTIONS")]
    pub max_connections: u32,

    // Boolean type (1/t/true/True/TRUE and 0/f/false/False/FALSE)
    #[tag(env = "DEBUG_MODE")]
    pub debug_mode: bool,

    // Duration with a unit, or plain seconds
    #[tag(env = "REQUEST_TIMEOUT")]
    pub request_timeout: Duration,

    // Comma separated list
    #[tag(env = "ALLOWED_ORIGINS")]
    pub allowed_origins: Vec<String>,

    // Untagged: keeps whatever the caller put here
    pub server_addr: String,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "\"postgres://localhost/mydb\"");
    std::env::set_var("MAX_CONNECTIONS", "10");
    std::env::set_var("DEBUG_MODE", "true");
    std::env::set_var("REQUEST_TIMEOUT", "30");
    std::env::set_var("ALLOWED_ORIGINS", "https://a.example, https://b.example");

    let mut config = Config {
        server_addr: "127.0.0.1:8080".to_string(),
        ..Default::default()
    };

    // Load configuration
    envloader::try_load_env(&mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Request Timeout: {:?}", config.request_timeout);
    println!("  Allowed Origins: {:?}", config.allowed_origins);
    println!("  Server Address: {}", config.server_addr);

    Ok(())
}
