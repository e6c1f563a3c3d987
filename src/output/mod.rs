//! Tab separated time series files of membrane potentials.

use std::path::{Path, PathBuf};
use csv::WriterBuilder;
use ndarray::Array2;
use crate::error::NeuronPerformanceError;
use crate::neuron::Regime;


/// Formats a number in scientific notation with eight decimals and a signed
/// exponent of at least three digits, e.g. `-6.25984492e+001`
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.8e}", value);

    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:03}", mantissa, sign, exponent.abs())
            },
            Err(_) => formatted,
        },
        // non finite values have no exponent
        None => formatted,
    }
}

/// Header of a time series with one potential column per neuron
pub fn time_series_header(neuron_count: usize) -> String {
    if neuron_count == 1 {
        return String::from("#t\tV");
    }

    let columns: Vec<String> = (1..=neuron_count).map(|i| format!("V{}", i)).collect();

    format!("#t\t{}", columns.join("\t"))
}

/// File name of the time series of a model in a regime
pub fn data_file_name(label: &str, regime: Regime) -> String {
    format!("{}_{}.dat", label, regime.file_suffix())
}

/// Path of the time series of a model in a regime inside `directory`
pub fn data_file_path<P: AsRef<Path>>(directory: P, label: &str, regime: Regime) -> PathBuf {
    directory.as_ref().join(data_file_name(label, regime))
}

/// Writes a header line then one tab separated row per row of `data`
pub fn write_time_series<P: AsRef<Path>>(
    path: P,
    header: &str,
    data: &Array2<f64>,
) -> Result<(), NeuronPerformanceError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    writer.write_record(header.split('\t'))?;
    for row in data.rows() {
        writer.write_record(row.iter().map(|value| format_scientific(*value)))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scientific_format() {
        assert_eq!(format_scientific(0.), "0.00000000e+000");
        assert_eq!(format_scientific(-62.5984492395571), "-6.25984492e+001");
        assert_eq!(format_scientific(1.0e-10), "1.00000000e-010");
        assert_eq!(format_scientific(f64::NAN), "NaN");
    }

    #[test]
    fn test_headers_and_names() {
        assert_eq!(time_series_header(1), "#t\tV");
        assert_eq!(time_series_header(3), "#t\tV1\tV2\tV3");
        assert_eq!(data_file_name("RulkovModel", Regime::Bursting), "RulkovModel_bst.dat");
        assert_eq!(
            data_file_name("Linear_KTzTanhExcitable", Regime::Excitable),
            "Linear_KTzTanhExcitable_exc.dat"
        );
    }
}
