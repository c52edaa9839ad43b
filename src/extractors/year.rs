// src/extractors/year.rs

// Form-type suffix that makes a digit run part of an identifier rather than a year.
const FORM_TYPE_SUFFIX: &str = "10K";

/// Returns the first 4-digit run in `href` that is not immediately followed
/// by the "10K" form-type token. Runs may overlap, so "201910K" yields "0191".
/// A single hyphen between the digits and the token ("2019-10K") counts as
/// immediately followed.
pub fn extract_year(href: &str) -> Option<&str> {
    let bytes = href.as_bytes();
    if bytes.len() < 4 {
        return None;
    }

    (0..=bytes.len() - 4).find_map(|start| {
        let end = start + 4;
        if !bytes[start..end].iter().all(u8::is_ascii_digit) {
            return None;
        }
        let rest = &href[end..];
        let rest = rest.strip_prefix('-').unwrap_or(rest);
        if rest.starts_with(FORM_TYPE_SUFFIX) {
            return None;
        }
        Some(&href[start..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_fragment() {
        assert_eq!(extract_year("https://www.sec.gov/edgar/search/#2019section"), Some("2019"));
    }

    #[test]
    fn test_first_run_wins() {
        assert_eq!(extract_year("#alb-20201231.htm"), Some("2020"));
    }

    #[test]
    fn test_form_type_token_is_excluded() {
        assert_eq!(extract_year("2019-10K"), None);
        assert_eq!(extract_year("FY201910K"), Some("0191"));
        assert_eq!(extract_year("x2019-10K#2018"), Some("2018"));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(extract_year("#section"), None);
        assert_eq!(extract_year("123"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn test_multibyte_text_is_safe() {
        assert_eq!(extract_year("é#ü2017"), Some("2017"));
    }
}
