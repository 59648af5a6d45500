//! Water trapped along a single drainage path.
//!
//! Profiles are ordered from the sea side of the path to its source. The source end
//! has no neighbor on the path beyond it, so it is closed off by a wall as tall as the
//! profile's highest point before anything is measured.

use crate::terrain::Elevation;
use itertools::Itertools;

/// Volume of water, in cell-units.
pub type Volume = u64;

/// The profile with its closing wall appended.
fn walled(profile: &[Elevation]) -> Vec<Elevation> {
    let wall = profile.iter().copied().max().unwrap_or_default();
    profile
        .iter()
        .copied()
        .chain(std::iter::once(wall))
        .collect()
}

/// Total water trapped over a profile, by two-pointer scan.
///
/// The side whose running maximum is lower is advanced, adding the difference
/// between that maximum and the current height. Ties advance the wall side.
///
/// An empty profile traps nothing, as does any profile which never descends
/// toward its source.
pub fn trapped_volume(profile: &[Elevation]) -> Volume {
    if profile.is_empty() {
        return 0;
    }
    let heights = walled(profile);

    let mut left = 0;
    let mut right = heights.len() - 1;
    let mut left_max = 0;
    let mut right_max = 0;
    let mut volume: Volume = 0;

    while left < right {
        left_max = left_max.max(heights[left]);
        right_max = right_max.max(heights[right]);
        if left_max >= right_max {
            volume += Volume::from(right_max - heights[right]);
            right -= 1;
        } else {
            volume += Volume::from(left_max - heights[left]);
            left += 1;
        }
    }

    volume
}

/// Height to which a drained basin is filled.
///
/// This is the height at the first point of the walled profile where the next
/// point is strictly lower. If the walled profile never descends, it is the
/// profile's first height.
pub fn spill_height(profile: &[Elevation]) -> Elevation {
    let heights = walled(profile);
    heights
        .iter()
        .tuple_windows()
        .find(|(current, next)| next < current)
        .map(|(&current, _)| current)
        .unwrap_or_else(|| heights[0])
}
