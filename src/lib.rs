//! Closed-form solar geometry for a site and day of year.
//!
//! Every function is a pure transformation of its arguments, built on the
//! Spencer (1971) Fourier series for declination, equation of time and
//! sun–earth distance. Angles are radians unless a unit flag says otherwise;
//! times of day are minutes (UTC) unless stated.
//!
//! ```
//! use solar_geometry::{daylight_summary, solar_noon};
//!
//! let summary = daylight_summary(-23.55, -46.64, 172.0).unwrap();
//! assert!(summary.sunrise < solar_noon(-46.64, 172.0));
//! assert!(summary.sunset > summary.solar_noon);
//! ```
//!
//! The [`batch`] module evaluates the same formulas elementwise over
//! `ndarray` arrays, reporting out-of-domain elements as NaN.

pub mod angles;
pub mod batch;
pub mod daylight;
pub mod error;
pub mod types;

pub use angles::{
    azimuth, azimuth_full_circle, cosine_zenith, day_of_year, declination, deg_to_rad,
    equation_of_time, fold_azimuth, hour_angle, minute_of_day, normalize_radians, rad_to_deg,
    solar_elevation, solar_position, sun_earth_distance, true_solar_time, year_angle,
    zenith_angle, DAYS_PER_YEAR, DEGREES_PER_HOUR, EOT_MINUTES_PER_RADIAN,
    MEAN_SUN_EARTH_DISTANCE_KM, REFRACTION_CORRECTED_ZENITH_DEG,
};

pub use daylight::{
    classify_day, clock_time, day_length, daylight_summary, minutes_to_clock, solar_noon,
    sunrise, sunrise_hour_angle_cosine, sunset,
};

pub use error::{Result, SolarError};

pub use types::{
    AngleUnit, Clock, ClockFormat, ClockTime, DayKind, DaylightSummary, EquationOfTimeUnit,
    EventFormat, EventTime, Site, SolarPosition, SunEvent, TimeUnit, TrueSolarTimeOptions,
};
