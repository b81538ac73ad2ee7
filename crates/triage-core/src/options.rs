use crate::error::TriageError;
use crate::parsing::phone::parse_region;

/// Region assumed for phone numbers written without a country code.
pub const DEFAULT_PHONE_REGION: &str = "PL";

/// Options for a single import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Two-letter region code, e.g. "PL".
    pub default_phone_region: String,
    /// Run the pipeline without committing created records.
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_phone_region: DEFAULT_PHONE_REGION.to_string(),
            dry_run: false,
        }
    }
}

impl ImportOptions {
    /// Options with a validated phone region.
    pub fn with_region(region: &str) -> Result<Self, TriageError> {
        parse_region(region)?;
        Ok(Self {
            default_phone_region: region.trim().to_uppercase(),
            ..Self::default()
        })
    }
}
