use thiserror::Error;

/// A coordinate component outside its valid range, or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Structural defects in a venue's distance range schedule.
///
/// Always caused by upstream data, never by the user placing the order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("distance ranges cannot be empty")]
    EmptyRanges,

    #[error("first distance range must start at min=0, got min={min}")]
    FirstRangeNotZero { min: u64 },

    #[error("last distance range must end with max=0, got max={max}")]
    LastRangeNotOpenEnded { max: u64 },

    #[error(
        "distance ranges must be sorted by min value: range {index} has min={min} \
         after min={previous_min}"
    )]
    UnsortedRanges {
        index: usize,
        previous_min: u64,
        min: u64,
    },

    #[error("range gap found between range {index} (max={max}) and the next range (min={next_min})")]
    RangeGap {
        index: usize,
        max: u64,
        next_min: u64,
    },
}

/// Reasons a quote cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("invalid delivery specs: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("delivery distance {distance}m is too long, delivery is available below {max_allowed}m")]
    OutOfServiceArea { distance: u64, max_allowed: u64 },

    /// The admission check was skipped before looking up a tier.
    #[error("no applicable distance range found for distance {distance}m")]
    NoApplicableRange { distance: u64 },

    /// A price component does not fit in `i64` cents.
    #[error("{component} overflows at distance {distance}m")]
    PriceOverflow {
        component: &'static str,
        distance: u64,
    },
}

/// Errors raised while loading process configuration or local specs files.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read specs file {path}: {source}")]
    SpecsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse specs file: {0}")]
    SpecsFileParse(#[from] serde_yaml::Error),

    #[error("specs file failed validation: {0}")]
    InvalidSpecs(#[from] ConfigurationError),

    #[error("specs file has an invalid venue location: {0}")]
    InvalidLocation(#[from] CoordinateError),
}
