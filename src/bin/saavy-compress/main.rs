//! saavy-compress - compress an audio file from the command line
//!
//! Run with: cargo run --bin saavy-compress -- input.wav --ratio 4

mod cli;

use clap::Parser;
use cli::Cli;
use saavy_compressor::request;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match request::respond(&cli.request(), &cli.input, &cli.output_dir) {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(payload) => {
            println!("{}", payload.to_json()?);
            std::process::exit(1);
        }
    }
}
