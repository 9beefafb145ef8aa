use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    workdesk::cli::run().await
}
