use crate::utils::constants::NA_TOKENS;

/// Parse one numeric cell. Empty cells, NA tokens and non-finite numbers
/// are missing (`Ok(None)`); any other non-number is returned as `Err` with
/// the trimmed text.
pub fn parse_numeric_cell(raw: &str) -> Result<Option<f64>, String> {
    let value = raw.trim();
    if value.is_empty() || NA_TOKENS.contains(&value) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        Ok(_) => Ok(None),
        Err(_) => Err(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(parse_numeric_cell(" 812.5 "), Ok(Some(812.5)));
        assert_eq!(parse_numeric_cell("-0.3"), Ok(Some(-0.3)));
        assert_eq!(parse_numeric_cell("1e3"), Ok(Some(1000.0)));
    }

    #[test]
    fn test_missing_markers() {
        for raw in ["", "  ", "NA", "N/A", "NULL", "null", "nan", "NaN", "-NaN", "<NA>", "None"] {
            assert_eq!(parse_numeric_cell(raw), Ok(None), "cell {:?}", raw);
        }
        assert_eq!(parse_numeric_cell("inf"), Ok(None));
    }

    #[test]
    fn test_non_numeric_text() {
        assert_eq!(parse_numeric_cell("high"), Err("high".to_string()));
        assert_eq!(parse_numeric_cell(" n.a. "), Err("n.a.".to_string()));
    }
}
