// SPDX-License-Identifier: MIT

/// Trait implemented by each FS-specific Meta structure.
/// Provides the static geometry needed during allocation, injection or checking.
pub trait FsMeta<Unit: Ord + Copy> {
    /// Size of one allocation unit in bytes.
    fn unit_size(&self) -> usize;

    /// Compute the offset (in bytes) on disk corresponding to a given allocation unit.
    fn unit_offset(&self, unit: Unit) -> u64;

    /// First valid unit for allocation.
    fn first_data_unit(&self) -> Unit;

    /// Last valid unit.
    fn last_data_unit(&self) -> Unit;

    /// Total number of allocatable units.
    fn total_units(&self) -> usize;

    /// Check if a given unit is valid for this FS.
    fn is_valid_unit(&self, unit: Unit) -> bool {
        unit >= self.first_data_unit() && unit <= self.last_data_unit()
    }

    /// Number of units needed to hold `size` bytes.
    ///
    /// Never zero: an empty payload still owns one unit so its entry can point somewhere.
    fn units_for(&self, size: u64) -> usize {
        let unit = self.unit_size() as u64;
        size.div_ceil(unit).max(1) as usize
    }
}
