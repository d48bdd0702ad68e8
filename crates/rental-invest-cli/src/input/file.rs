use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a parameter file and deserialise it into a typed struct.
///
/// `.yaml` / `.yml` files are parsed as YAML, everything else as JSON.
pub fn read_params<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_params(&canonical, &contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn parse_params<T: DeserializeOwned>(
    path: &Path,
    contents: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(contents)?)
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_invest_core::rental::{InvestmentParams, TaxSystem};
    use rust_decimal_macros::dec;

    const YAML: &str = "\
purchase_price: 180000
notary_fees: 8
down_payment: 30000
renovation_costs: 5000
monthly_rent: 750
monthly_non_recoverable_expenses: 40
annual_property_tax: 950
interest_rate: 3.9
loan_term: 25
vacancy_rate: 4
tax_rate: 30
tax_system: micro
annual_appreciation: 1
";

    #[test]
    fn test_parse_yaml_by_extension() {
        let p: InvestmentParams = parse_params(Path::new("deal.yaml"), YAML).unwrap();
        assert_eq!(p.purchase_price, dec!(180000));
        assert_eq!(p.interest_rate, dec!(3.9));
        assert_eq!(p.loan_term, 25);
        assert_eq!(p.tax_system, TaxSystem::Micro);
    }

    #[test]
    fn test_parse_json_by_default() {
        let json = serde_json::to_string(&InvestmentParams::default()).unwrap();
        let p: InvestmentParams = parse_params(Path::new("deal.json"), &json).unwrap();
        assert_eq!(p, InvestmentParams::default());
    }

    #[test]
    fn test_yaml_rejected_as_json() {
        let parsed: Result<InvestmentParams, _> = parse_params(Path::new("deal.txt"), YAML);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file() {
        let parsed: Result<InvestmentParams, _> = read_params("does/not/exist.json");
        assert!(parsed.is_err());
    }
}
