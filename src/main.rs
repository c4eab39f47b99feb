use gaejeong::cli;

#[tokio::main]
async fn main() {
    // Errors are already reported with hints by the CLI
    if cli::Cli::run().await.is_err() {
        std::process::exit(1);
    }
}
