//! Domain validation for raw patient records.

use tracing::warn;

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    patient::{Attribute, PatientRecord},
};

/// Check every numeric attribute against its inclusive domain.
///
/// Non-finite values fail the same way as out-of-range ones. The first
/// offending attribute, in canonical order, is reported.
pub fn validate_record(record: &PatientRecord) -> DiabriskResult<()> {
    for attribute in Attribute::NUMERIC {
        let Some((min, max)) = attribute.domain() else {
            continue;
        };
        let value = record.value(attribute);
        if !(min..=max).contains(&value) {
            warn!(
                attribute = %attribute,
                value,
                min,
                max,
                "attribute outside declared domain"
            );
            return Err(DiabriskError::Validation {
                attribute: attribute.name().to_string(),
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}
