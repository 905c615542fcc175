//! The database unit grid.
//!
//! All coordinates in a library are integers on a fixed grid. The grid pitch
//! is chosen once, when the library is created, and every micron-denominated
//! dimension is snapped onto it up front. Downstream math is exact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The database unit scale of a library: nanometers per grid step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    nm_per_dbu: Decimal,
}

impl Units {
    /// Creates a unit scale with the given grid pitch, in nanometers.
    ///
    /// # Panics
    ///
    /// Panics if `nm_per_dbu` is not positive.
    pub fn new(nm_per_dbu: Decimal) -> Self {
        assert!(
            nm_per_dbu > Decimal::ZERO,
            "database unit must be positive, got {nm_per_dbu}"
        );
        Self { nm_per_dbu }
    }

    /// The grid pitch, in nanometers.
    #[inline]
    pub fn nm_per_dbu(&self) -> Decimal {
        self.nm_per_dbu
    }

    /// Converts a length in microns to database units, rounding to nearest.
    ///
    /// # Panics
    ///
    /// Panics if the resulting coordinate does not fit in an `i64`.
    pub fn dbus(&self, microns: Decimal) -> i64 {
        let dbu = (microns * Decimal::ONE_THOUSAND / self.nm_per_dbu).round();
        match dbu.to_i64() {
            Some(dbu) => dbu,
            None => panic!("length {microns} um overflows the database grid"),
        }
    }

    /// Converts a length in database units back to microns.
    pub fn microns(&self, dbu: i64) -> Decimal {
        Decimal::from(dbu) * self.nm_per_dbu / Decimal::ONE_THOUSAND
    }
}

impl Default for Units {
    /// A 1 nm grid.
    fn default() -> Self {
        Self {
            nm_per_dbu: Decimal::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn micron_dimensions_snap_to_grid() {
        let units = Units::new(dec!(5));
        assert_eq!(units.dbus(dec!(0.36)), 72);
        assert_eq!(units.dbus(dec!(5)), 1000);
        assert_eq!(units.dbus(dec!(-0.4)), -80);
        assert_eq!(units.microns(72), dec!(0.360));
    }

    #[test]
    fn off_grid_dimensions_round_to_nearest() {
        let units = Units::new(dec!(5));
        // 3 nm is 0.6 DBU; banker's rounding would give 0 or 1 either way,
        // but 0.6 rounds up unambiguously.
        assert_eq!(units.dbus(dec!(0.003)), 1);
        assert_eq!(units.dbus(dec!(0.002)), 0);
    }

    #[test]
    fn default_grid_is_one_nm() {
        assert_eq!(Units::default().dbus(dec!(1)), 1000);
    }

    #[test]
    #[should_panic(expected = "positive")]
    fn zero_grid_rejected() {
        Units::new(dec!(0));
    }
}
