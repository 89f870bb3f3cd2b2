#[tokio::main]
async fn main() {
    if let Err(e) = resource_booking::run().await {
        eprintln!("resource-booking failed to start: {}", e);
        std::process::exit(1);
    }
}
