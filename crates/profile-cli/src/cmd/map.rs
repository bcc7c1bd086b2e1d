use crate::cmd::ConfigArgs;
use crate::output::{print_json, print_table};
use profile_core::intensity::MAPPING_EPSILON;
use std::path::Path;

pub fn run(dir: &Path, values: &[f64], args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let config = args.resolve(dir)?;
    let curve = config.motor;

    let mapped = values
        .iter()
        .map(|&pwm| curve.logical_from_pwm(pwm).map(|logical| (pwm, logical)))
        .collect::<profile_core::Result<Vec<(f64, f64)>>>()?;

    if json {
        let rows: Vec<serde_json::Value> = mapped
            .iter()
            .map(|&(pwm, logical)| {
                serde_json::json!({
                    "pwm": pwm,
                    "logical": logical,
                    "mapped": pwm > MAPPING_EPSILON,
                })
            })
            .collect();
        print_json(&rows)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = mapped
        .iter()
        .map(|(pwm, logical)| vec![pwm.to_string(), logical.to_string()])
        .collect();
    print_table(&["PWM", "Logical"], &rows);
    Ok(())
}
