//! Convert an .asdp scan file into a PCD or ASC point cloud.
//!
//! ```bash
//! # PCD to standard output
//! asdp-convert --input scan.asdp > scan.pcd
//!
//! # ASC to a file
//! asdp-convert --input scan.asdp --output-format asc --output scan.asc
//!
//! # The shaft-mounted scanner
//! asdp-convert --input scan.asdp --offset 1.7
//! ```
//!
//! Logs go to standard error; set `RUST_LOG` to change the level.

mod args;

use args::Args;
use asdp::Summary;
use clap::Parser;
use log::{debug, error};
use std::process::ExitCode;

fn run(args: &Args) -> asdp::Result<Summary> {
    // validate everything before anything is written
    let format = args.format()?;
    let options = args.options();
    debug!("converting {} to {} with {:?}", args.input.display(), format, options);
    asdp::convert_path(&args.input, args.output.as_deref(), format, options)
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}: {}", args.input.display(), err);
            ExitCode::FAILURE
        }
    }
}
