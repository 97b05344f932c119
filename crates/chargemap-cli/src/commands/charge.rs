use crate::cli::ChargeArgs;
use crate::error::Result;
use chargemap::core::color::charge_to_color;

pub fn run(args: ChargeArgs) -> Result<()> {
    for line in format_charges(&args.charges) {
        println!("{}", line);
    }
    Ok(())
}

fn format_charges(charges: &[f64]) -> Vec<String> {
    charges
        .iter()
        .map(|&charge| format!("{:>+8.4}  {}", charge, charge_to_color(charge)))
        .collect()
}
