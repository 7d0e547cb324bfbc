mod generate;
mod init;

use std::error::Error;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub use generate::Generate;
pub use init::Initialize;

fn init_logging(level: Level) -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn init_standard() -> Result<(), Box<dyn Error>> {
    init_logging(Level::WARN)
}

fn init_debug() -> Result<(), Box<dyn Error>> {
    init_logging(Level::INFO)
}
