#[tokio::main]
async fn main() -> std::io::Result<()> {
    careloop_lib::run().await
}
