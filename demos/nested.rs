//! Example demonstrating nested records

use envloader::Record;

#[derive(Debug, Default, Record)]
struct DatabaseConfig {
    #[tag(env = "DB_HOST")]
    pub host: String,

    #[tag(env = "DB_PORT")]
    pub port: u16,
}

#[derive(Debug, Default, Record)]
struct Config {
    #[tag(env = "APP_NAME")]
    pub app_name: String,

    // No tag needed: nested records are always populated
    pub database: DatabaseConfig,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("DB_HOST", "localhost");
    std::env::set_var("DB_PORT", "5432");

    let mut config = Config::default();
    envloader::try_load_env(&mut config)?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!(
        "  Database: {}:{}",
        config.database.host, config.database.port
    );

    Ok(())
}
