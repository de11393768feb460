use filemeta_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Connect, migrate, and build the router; an unreachable database stops startup here
    let (_state, router) = filemeta_api::setup::initialize_app(config.clone()).await?;

    filemeta_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
