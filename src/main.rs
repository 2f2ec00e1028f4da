#[tokio::main]
async fn main() {
    if let Err(e) = tasknest_lib::run().await {
        eprintln!("tasknest: {}", e);
        std::process::exit(1);
    }
}
