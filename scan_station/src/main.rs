#[tokio::main]
async fn main() {
    // Errors are already logged by the framework layer.
    if scan_station::run_with_args(std::env::args().skip(1))
        .await
        .is_err()
    {
        std::process::exit(1);
    }
}
