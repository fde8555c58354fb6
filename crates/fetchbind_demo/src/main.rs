mod app;
mod directory;
mod logging;
mod render;
mod settings;

use std::path::Path;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let settings = settings::load(Path::new(settings::SETTINGS_FILENAME));

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(app::run(settings))
}
