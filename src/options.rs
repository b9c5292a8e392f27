use std::num::NonZeroU32;

/// The distance between the rotating mirror and the sensor housing on the shaft-mounted scanner,
/// in scanner units.
pub const SHAFT_OFFSET: f64 = 1.7;

/// Scanner units per meter.
pub const UNITS_PER_METER: f64 = 100.0;

/// The sign convention of the x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    /// `x = r cos(elevation) sin(azimuth)`.
    #[default]
    Right,
    /// `x = -r cos(elevation) sin(azimuth)`.
    Left,
}

impl Handedness {
    /// The factor applied to x.
    pub fn sign(&self) -> f64 {
        match self {
            Handedness::Right => 1.,
            Handedness::Left => -1.,
        }
    }
}

/// Where the angular resolutions come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Read from the `x-resolution` and `y-resolution` header lines.
    #[default]
    Header,
    /// Fixed for the scanner. Resolution header lines are still validated, but ignored.
    Fixed {
        /// Steps per horizontal rotation.
        horizontal: NonZeroU32,
        /// Steps per vertical sweep.
        vertical: NonZeroU32,
    },
}

/// Options for a conversion.
///
/// Every scanner deployment differs only in these values:
///
/// ```
/// use asdp::{Handedness, Options};
/// let options = Options::default()
///     .with_offset(1.7)
///     .with_handedness(Handedness::Left)
///     .with_scale(1.);
/// assert_eq!(1.7, options.offset);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Subtracted from every distance before the transform; the result is clamped at zero.
    pub offset: f64,
    /// The x axis convention.
    pub handedness: Handedness,
    /// Multiplies every coordinate, after the transform.
    pub scale: f64,
    /// Where the angular resolutions come from.
    pub resolution: ResolutionSource,
}

impl Options {
    /// Options for the shaft-mounted scanner, which measures from 1.7 units behind the mirror.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::Options;
    /// let options = Options::shaft_compensated();
    /// assert_eq!(1.7, options.offset);
    /// assert_eq!(0.01, options.scale);
    /// ```
    pub fn shaft_compensated() -> Options {
        Options::default().with_offset(SHAFT_OFFSET)
    }

    /// Sets the distance offset.
    pub fn with_offset(mut self, offset: f64) -> Options {
        self.offset = offset;
        self
    }

    /// Sets the x axis convention.
    pub fn with_handedness(mut self, handedness: Handedness) -> Options {
        self.handedness = handedness;
        self
    }

    /// Sets the coordinate scale.
    pub fn with_scale(mut self, scale: f64) -> Options {
        self.scale = scale;
        self
    }

    /// Emit coordinates in scanner units instead of meters.
    pub fn with_raw_units(self) -> Options {
        self.with_scale(1.)
    }

    /// Sets where the angular resolutions come from.
    pub fn with_resolution(mut self, resolution: ResolutionSource) -> Options {
        self.resolution = resolution;
        self
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            offset: 0.,
            handedness: Handedness::default(),
            scale: 1. / UNITS_PER_METER,
            resolution: ResolutionSource::default(),
        }
    }
}
