//! Example showing that every field error is reported at once

use envloader::Record;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Record)]
struct Config {
    #[tag(env = "WORKERS")]
    pub workers: u8,

    #[tag(env = "VERBOSE")]
    pub verbose: bool,

    #[tag(env = "REGION")]
    pub region: String,
}

fn main() {
    // RUST_LOG=envloader=trace shows each field as it is visited
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    std::env::set_var("WORKERS", "512");
    std::env::set_var("VERBOSE", "maybe");
    std::env::remove_var("REGION");

    let mut config = Config::default();
    let errors = envloader::load_env(&mut config);

    println!("{} problem(s) found:", errors.len());
    for error in &errors {
        println!("  [{:?}] {}", error.kind(), error);
    }
}
