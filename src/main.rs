use aribaeats::{App, AppConfig};
use std::io;
use std::process;

fn main() {
    let config = AppConfig::default();

    // RUST_LOG wins over the configured level
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(config, stdin.lock(), stdout.lock());

    if let Err(e) = app.run() {
        log::error!("[Main] {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
