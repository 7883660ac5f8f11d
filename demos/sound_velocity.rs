// ============================================================================
// Sound Velocity Example
// Speed of sound and heat capacity ratio from tube resonances
// ============================================================================
//
// Resonance n (0-based) in a tube of length L closed at one end satisfies
// c = 2 f L / (n + 1). A missing reading (0 Hz) is skipped without
// renumbering the resonances after it. Velocities from every resonance are averaged, then
// γ = M c² / (R T).
//
// Run with `--features logging` and RUST_LOG=trace to see every propagation
// step.

use measurement::prelude::*;

/// Resonance frequencies in Hz, one list per (tube, gas) run
const RUNS: &[(&str, &str, &[i64])] = &[
    ("long", "air", &[344, 690, 1035, 1382, 1727]),
    ("short", "air", &[591, 1183, 1770]),
    ("long", "CO2", &[273, 545, 820, 1093]),
    ("short", "CO2", &[466, 935, 1401]),
];

/// Assumed uncertainty of every frequency reading, Hz
const FREQUENCY_UNCERTAINTY: &str = "4";

fn tube_length(name: &str) -> MeasurementResult<Measurement> {
    let (top, bottom) = match name {
        "long" => ("0.514", "0.023"),
        _ => ("0.574", "0.283"),
    };
    let top = Measurement::from_significant_digits(top, "0.005", 3)?;
    let bottom = Measurement::from_significant_digits(bottom, "0.005", 3)?;
    &top - &bottom
}

/// Molar mass in kg/mol
fn molar_mass(gas: &str) -> MeasurementResult<BigDecimal> {
    let grams = parse_decimal(match gas {
        "air" => "28.97",
        "Ar" => "39.948",
        "CO2" => "44.0095",
        _ => "146.055",
    })?;
    Ok(Context::default().div(&grams, &BigDecimal::from(1000))?)
}

fn sound_velocity(frequencies: &[i64], length: &Measurement) -> MeasurementResult<Measurement> {
    let velocities = frequencies
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f > 0)
        .map(|(n, &f)| {
            let f = Measurement::from_decimals(&f.to_string(), FREQUENCY_UNCERTAINTY, 0)?;
            let doubled = (2_i64 * &f)?;
            (&doubled * length)? / (n as u64 + 1)
        })
        .collect::<MeasurementResult<Vec<_>>>()?;
    Measurement::mean(&velocities)
}

fn gamma(velocity: &Measurement, molar_mass: &BigDecimal) -> MeasurementResult<Measurement> {
    let r = parse_decimal("8.31446261815324")?;
    let kelvin = parse_decimal("273.15")?;
    let temperature = (Measurement::from_decimals("22", "1", 0)? + kelvin)?;

    let numerator = (molar_mass * &velocity.checked_pow(2)?)?;
    let denominator = (&temperature * &r)?;
    &numerator / &denominator
}

fn main() -> MeasurementResult<()> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Sound Velocity Example ===\n");

    let mut per_gas: Vec<(&str, Measurement)> = Vec::new();
    for (tube, gas, frequencies) in RUNS {
        let length = tube_length(tube)?;
        let velocity = sound_velocity(frequencies, &length)?;
        println!("{:>5} tube ({} m), {:>3}: c = {} m/s", tube, length, gas, velocity);

        match per_gas.iter_mut().find(|(g, _)| g == gas) {
            Some((_, previous)) => {
                let combined = (&*previous + &velocity)?;
                *previous = (combined / 2)?;
            },
            None => per_gas.push((*gas, velocity)),
        }
    }

    println!();
    for (gas, velocity) in &per_gas {
        let gamma = gamma(velocity, &molar_mass(gas)?)?;
        println!("Mean sound velocity within {}: {} m/s", gas, velocity);
        println!("γ (Cp/Cv) value within {}: {}", gas, gamma);
    }

    Ok(())
}
