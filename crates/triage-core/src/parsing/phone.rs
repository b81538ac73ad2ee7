use crate::error::{MessageError, TriageError};
use crate::model::CanonicalPhone;
use phonenumber::country;
use phonenumber::Mode;

/// Resolve a two-letter region code such as "PL" into phone metadata.
pub fn parse_region(code: &str) -> Result<country::Id, TriageError> {
    code.trim()
        .to_uppercase()
        .parse::<country::Id>()
        .map_err(|_| TriageError::Config(format!("unknown phone region '{}'", code)))
}

/// Parse a raw phone string into E.164 form.
///
/// Numbers without a country code are read in the context of `region`.
/// Missing or blank input is not an error.
pub fn normalize_phone(
    raw: Option<&str>,
    region: country::Id,
) -> Result<Option<CanonicalPhone>, MessageError> {
    let s = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let number = phonenumber::parse(Some(region), s)
        .map_err(|_| MessageError::InvalidPhone(s.to_string()))?;

    Ok(Some(CanonicalPhone::new(
        number.format().mode(Mode::E164).to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl() -> country::Id {
        parse_region("PL").unwrap()
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(normalize_phone(None, pl()).unwrap(), None);
        assert_eq!(normalize_phone(Some(""), pl()).unwrap(), None);
        assert_eq!(normalize_phone(Some("  "), pl()).unwrap(), None);
    }

    #[test]
    fn test_international_number_kept() {
        let phone = normalize_phone(Some("+48505167301"), pl()).unwrap().unwrap();
        assert_eq!(phone.as_str(), "+48505167301");
    }

    #[test]
    fn test_national_number_gets_region_code() {
        let phone = normalize_phone(Some("888241636"), pl()).unwrap().unwrap();
        assert_eq!(phone.as_str(), "+48888241636");
    }

    #[test]
    fn test_separators_stripped() {
        let phone = normalize_phone(Some("888 241 636"), pl()).unwrap().unwrap();
        assert_eq!(phone.as_str(), "+48888241636");
    }

    #[test]
    fn test_unparseable() {
        assert!(matches!(
            normalize_phone(Some("not a phone"), pl()),
            Err(MessageError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_region_lookup() {
        assert!(parse_region("pl").is_ok());
        assert!(parse_region("DE").is_ok());
        assert!(matches!(parse_region("XX"), Err(TriageError::Config(_))));
    }
}
