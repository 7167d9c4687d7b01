//! Example demonstrating a variable name prefix

use envloader::{Loader, Record};

#[derive(Debug, Default, Record)]
struct Config {
    // Variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_API_KEY, etc.
    #[tag(env = "DATABASE_URL")]
    pub database_url: String,

    #[tag(env = "API_KEY")]
    pub api_key: String,

    #[tag(env = "PORT")]
    pub port: u16,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");

    let config: Config = Loader::new().prefix("MYAPP_").build()?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);

    Ok(())
}
