pub mod codegen;
mod commands;
pub mod config;

use std::error::Error;

use clap::*;
use commands::{Generate, Initialize};

#[derive(Parser)]
#[command(name = "sqlgen", bin_name = "sqlgen", version, about)]
enum Command {
    Generate(Generate),
    Init(Initialize),
}

fn main() -> Result<(), Box<dyn Error>> {
    let command = Command::parse();
    match command {
        Command::Generate(args) => args.run(),
        Command::Init(args) => args.run(),
    }
}
