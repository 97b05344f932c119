use crate::error::Result;
use chargemap::core::color::calibration_stops;

pub fn run() -> Result<()> {
    for line in ramp_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn ramp_lines() -> Vec<String> {
    calibration_stops()
        .map(|(charge, name, color)| format!("{:>+6.2}  {:<7} {}", charge, name, color))
        .collect()
}
