//! Energy plausibility check
//!
//! Declared energy has to roughly match the energy implied by the
//! macro-nutrients, using the standard kcal-per-gram factors.

use rust_decimal::Decimal;

use crate::models::ValidationError;

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
/// kcal per gram of carbohydrates
pub const KCAL_PER_G_CARBOHYDRATES: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: Decimal = Decimal::from_parts(9, 0, 0, false, 0);
/// kJ per kcal
pub const KJ_PER_KCAL: Decimal = Decimal::from_parts(4184, 0, 0, false, 3);
/// Allowed deviation, in percent of the *declared* energy
///
/// The band is anchored on the declared value, as the reference nutrition
/// database does: `0.9 * energy <= calculated <= 1.1 * energy`.
pub const ENERGY_TOLERANCE_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Energy implied by the macro-nutrients, in kcal
///
/// `None` if the result does not fit a `Decimal`.
pub fn calculated_energy(protein: Decimal, carbohydrates: Decimal, fat: Decimal) -> Option<Decimal> {
    protein
        .checked_mul(KCAL_PER_G_PROTEIN)?
        .checked_add(carbohydrates.checked_mul(KCAL_PER_G_CARBOHYDRATES)?)?
        .checked_add(fat.checked_mul(KCAL_PER_G_FAT)?)
}

/// Check that `energy` is within tolerance of the macro-nutrient energy
pub fn validate_energy(
    protein: Decimal,
    carbohydrates: Decimal,
    fat: Decimal,
    energy: Decimal,
) -> Result<(), ValidationError> {
    let overflow = || ValidationError::Overflow { field: "energy" };

    let calculated = calculated_energy(protein, carbohydrates, fat).ok_or_else(overflow)?;
    let band = energy
        .checked_mul(ENERGY_TOLERANCE_PERCENT)
        .and_then(|b| b.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?;
    let lower = energy.checked_sub(band).ok_or_else(overflow)?;
    let upper = energy.checked_add(band).ok_or_else(overflow)?;

    if calculated >= lower && calculated <= upper {
        Ok(())
    } else {
        Err(ValidationError::EnergyMismatch { energy, calculated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_calculated_energy() {
        assert_eq!(calculated_energy(d("0.5"), d("12"), d("0.1")), Some(d("50.9")));
    }

    #[test]
    fn test_values_ok() {
        assert!(validate_energy(d("0.5"), d("12"), d("0.1"), d("50")).is_ok());
    }

    #[test]
    fn test_too_much_protein() {
        let err = validate_energy(d("20"), d("12"), d("0.1"), d("50")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EnergyMismatch {
                energy: d("50"),
                calculated: d("128.9"),
            }
        );
        assert!(err.to_string().contains("128.9"));
    }

    #[test]
    fn test_each_macro_can_break_the_total() {
        assert!(validate_energy(d("0.5"), d("12"), d("5"), d("50")).is_err());
        assert!(validate_energy(d("0.5"), d("20"), d("0.1"), d("50")).is_err());
        assert!(validate_energy(d("0.5"), d("20"), d("5"), d("50")).is_err());
    }

    #[test]
    fn test_tolerance_band_edges() {
        // 10 g protein = 40 kcal; declared energy 36..=44 brackets it within 10%
        assert!(validate_energy(d("10"), d("0"), d("0"), d("40")).is_ok());
        assert!(validate_energy(d("11"), d("0"), d("0"), d("40")).is_ok());
        assert!(validate_energy(d("9"), d("0"), d("0"), d("40")).is_ok());
        assert!(validate_energy(d("11.1"), d("0"), d("0"), d("40")).is_err());
        assert!(validate_energy(d("8.9"), d("0"), d("0"), d("40")).is_err());
    }

    #[test]
    fn test_zero_energy() {
        assert!(validate_energy(d("0"), d("0"), d("0"), d("0")).is_ok());
        assert!(validate_energy(d("1"), d("0"), d("0"), d("0")).is_err());
    }

    #[test]
    fn test_huge_values_are_rejected_not_panicking() {
        // 3e28 * 4 no longer fits
        let huge = d("30000000000000000000000000000");
        assert_eq!(calculated_energy(huge, d("10"), d("10")), None);
        assert_eq!(
            validate_energy(huge, d("10"), d("10"), d("50")),
            Err(ValidationError::Overflow { field: "energy" })
        );

        // Declared energy too large for the tolerance band
        assert_eq!(
            validate_energy(d("10"), d("10"), d("10"), d("10000000000000000000000000000")),
            Err(ValidationError::Overflow { field: "energy" })
        );
        assert_eq!(
            validate_energy(d("10"), d("10"), d("10"), Decimal::MAX),
            Err(ValidationError::Overflow { field: "energy" })
        );

        assert!(matches!(
            validate_energy(d("10"), d("10"), d("10"), d("1000000000000000000000000000")),
            Err(ValidationError::EnergyMismatch { .. })
        ));
    }
}
