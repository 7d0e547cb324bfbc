use std::error::Error;

use clap::Parser;

use crate::config::{CONFIG_FILE, CodeGenerator, RequestSource, TomlConfig};

#[derive(Parser, Debug, Clone)]
#[command(about = "Write a starter sqlgen.toml")]
pub struct Initialize {}

fn starter_config() -> TomlConfig {
    TomlConfig {
        path: RequestSource::Single("<path/to/request.json>".into()),
        target: Some("<path/to/output/directory>".into()),
        mode: CodeGenerator::TypeScript,
        skip_unsupported: false,
    }
}

impl Initialize {
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let exists = std::fs::exists(CONFIG_FILE)?;
        if exists {
            eprintln!("{CONFIG_FILE} already exists.\nExiting...");
            return Ok(());
        }

        let toml = toml::to_string_pretty(&starter_config())?;
        std::fs::write(CONFIG_FILE, toml)?;
        eprintln!("Written config to {CONFIG_FILE}!");
        Ok(())
    }
}
