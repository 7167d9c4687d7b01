//! Example demonstrating several tag names on one struct

use envloader::{Loader, Record};

#[derive(Debug, Default, Record)]
struct Config {
    // PORT in production, TEST_PORT under the "test" tag
    #[tag(env = "PORT", test = "TEST_PORT")]
    pub port: u16,

    // Only read in production; "-" opts out under the "test" tag
    #[tag(env = "API_KEY", test = "-")]
    pub api_key: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PORT", "8080");
    std::env::set_var("TEST_PORT", "18080");
    std::env::set_var("API_KEY", "secret-key-123");

    let mut production = Config::default();
    envloader::try_load_env(&mut production)?;

    let mut test = Config {
        api_key: "test-key".to_string(),
        ..Default::default()
    };
    Loader::new().tag("test").try_load(&mut test)?;

    println!("Tag 'env':  port={} api_key={}", production.port, production.api_key);
    println!("Tag 'test': port={} api_key={}", test.port, test.api_key);

    Ok(())
}
