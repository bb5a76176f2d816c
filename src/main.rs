use clap::Parser;
use linkbio_lib::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = linkbio_lib::run(config).await {
        rolling_logger::error(&format!("Fatal: {}", e));
        eprintln!("linkbio: {}", e);
        std::process::exit(1);
    }
}
