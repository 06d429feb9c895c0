#[tokio::main]
async fn main() -> std::io::Result<()> {
    tank_combat::run_with_config().await
}
