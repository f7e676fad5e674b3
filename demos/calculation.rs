use chrono::{Offset, TimeZone};
use chrono_tz::America::Sao_Paulo;

use solar_geometry::{
    angles::rad_to_deg, classify_day, minutes_to_clock, solar_position, Clock, ClockFormat,
    Site, SolarError,
};

fn local_clock(utc_minutes: f64, offset_hours: f64) -> Result<String, SolarError> {
    match minutes_to_clock(utc_minutes + offset_hours * 60.0, ClockFormat::Text)? {
        Clock::Text(text) => Ok(text),
        Clock::Parts(parts) => Ok(parts.to_string()),
    }
}

fn main() -> Result<(), SolarError> {
    let site = Site::new(-23.55, -46.64)?;

    let dt = Sao_Paulo.with_ymd_and_hms(2026, 6, 21, 12, 0, 0).unwrap();
    let offset_hours = dt.offset().fix().local_minus_utc() as f64 / 3600.0;

    let pos = solar_position(&site, &dt)?;
    let daylight = site.daylight(pos.day_of_year)?;

    println!("=== Solar Geometry Example ===");
    println!(
        "Location: São Paulo ({:.2}°S, {:.2}°W)",
        -site.latitude, -site.longitude
    );
    println!("Date/Time: {}", dt);
    println!();
    println!("--- Solar Position ---");
    println!("Day of year: {}", pos.day_of_year);
    println!("Declination: {:.2}°", rad_to_deg(pos.declination));
    println!("Equation of Time: {:.2} minutes", pos.equation_of_time);
    println!("True Solar Time: {:.1} minutes", pos.true_solar_time);
    println!("Hour Angle: {:.2}°", rad_to_deg(pos.hour_angle));
    println!("Zenith Angle: {:.2}°", rad_to_deg(pos.zenith));
    println!("Elevation: {:.2}°", rad_to_deg(pos.elevation));
    println!(
        "Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)",
        rad_to_deg(pos.azimuth_full_circle)
    );
    println!();
    println!("--- Daylight ({:?}) ---", classify_day(site.latitude, pos.day_of_year));
    println!("Sunrise: {}", local_clock(daylight.sunrise, offset_hours)?);
    println!("Solar noon: {}", local_clock(daylight.solar_noon, offset_hours)?);
    println!("Sunset: {}", local_clock(daylight.sunset, offset_hours)?);
    println!("Day length: {:.1} minutes", daylight.day_length);

    Ok(())
}
