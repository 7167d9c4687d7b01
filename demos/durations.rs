//! Example demonstrating duration values

use envloader::Record;
use std::time::Duration;

#[derive(Debug, Default, Record)]
struct Timeouts {
    #[tag(env = "CONNECT_TIMEOUT")]
    pub connect: Duration,

    #[tag(env = "IDLE_TIMEOUT")]
    pub idle: Duration,

    #[tag(env = "SHUTDOWN_GRACE")]
    pub shutdown_grace: Duration,
}

fn main() -> anyhow::Result<()> {
    // Unit suffixes, compound literals, or plain seconds
    std::env::set_var("CONNECT_TIMEOUT", "250ms");
    std::env::set_var("IDLE_TIMEOUT", "1h30m");
    std::env::set_var("SHUTDOWN_GRACE", "10");

    let mut timeouts = Timeouts::default();
    envloader::try_load_env(&mut timeouts)?;

    println!("Timeouts loaded:");
    println!("  Connect: {:?}", timeouts.connect);
    println!("  Idle: {:?}", timeouts.idle);
    println!("  Shutdown Grace: {:?}", timeouts.shutdown_grace);

    Ok(())
}
