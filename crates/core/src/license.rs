//! License acceptance gate
//!
//! Enterprise images refuse to proceed unless the license agreement has been
//! accepted via `NEO4J_ACCEPT_LICENSE_AGREEMENT`. The gate runs before
//! configuration resolution and its outcome is distinct from configuration
//! errors; a refusal aborts the process before any resolution diagnostics can
//! mask it. Community images have no license check.

use crate::defaults::Edition;
use crate::errors::LicenseError;
use tracing::info;

/// Control variable carrying the license acceptance
pub const LICENSE_ENV: &str = "NEO4J_ACCEPT_LICENSE_AGREEMENT";

/// Accepted values: `yes` for production use, `eval` for evaluation
const ACCEPTED_VALUES: &[&str] = &["yes", "eval"];

/// Check the license gate for the running edition.
///
/// `acceptance` is the raw value of [`LICENSE_ENV`], if set.
pub fn check(edition: Edition, acceptance: Option<&str>) -> Result<(), LicenseError> {
    if edition != Edition::Enterprise {
        return Ok(());
    }
    match acceptance {
        Some(value) if ACCEPTED_VALUES.contains(&value) => {
            info!(
                "The license agreement was accepted with environment variable \
                 {}={} when the Software was started.",
                LICENSE_ENV, value
            );
            Ok(())
        }
        _ => Err(LicenseError::NotAccepted),
    }
}
