use asdp::{Format, Handedness, Options, ResolutionSource, Result};
use clap::Parser;
use std::{num::NonZeroU32, path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input .asdp scan file to convert.
    #[arg(long, env = "ASDP_INPUT")]
    pub input: PathBuf,

    /// Output format, either 'pcd' or 'asc'.
    #[arg(long, env = "ASDP_OUTPUT_FORMAT", default_value = "pcd")]
    pub output_format: String,

    /// Write the point cloud to this file instead of standard output.
    #[arg(long, short, env = "ASDP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Distance subtracted from every measurement, in scanner units.  The
    /// shaft-mounted scanner needs 1.7.
    #[arg(long, env = "ASDP_OFFSET", default_value = "0")]
    pub offset: f64,

    /// Negate the x axis.
    #[arg(long, env = "ASDP_FLIP_X")]
    pub flip_x: bool,

    /// Emit coordinates in scanner units instead of meters.
    #[arg(long, env = "ASDP_RAW_UNITS")]
    pub raw_units: bool,

    /// Use this horizontal and vertical resolution and ignore the resolution
    /// header lines.
    #[arg(long, num_args = 2, value_names = ["H", "V"])]
    pub fixed_resolution: Option<Vec<NonZeroU32>>,
}

impl Args {
    /// The output format, validated.
    pub fn format(&self) -> Result<Format> {
        self.output_format.parse()
    }

    pub fn options(&self) -> Options {
        let mut options = Options::default().with_offset(self.offset);
        if self.flip_x {
            options = options.with_handedness(Handedness::Left);
        }
        if self.raw_units {
            options = options.with_raw_units();
        }
        if let Some([horizontal, vertical]) = self.fixed_resolution.as_deref() {
            options = options.with_resolution(ResolutionSource::Fixed {
                horizontal: *horizontal,
                vertical: *vertical,
            });
        }
        options
    }
}
