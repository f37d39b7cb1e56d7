use clap::Parser;
use std::process::exit;
use togh::{togh_main, ToghCli};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = ToghCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .init();
    match togh_main(args).await {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            log::error!("{e}");
            exit(1);
        }
    };
}
