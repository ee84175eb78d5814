//! Raw bucket → center mappings
//!
//! Every possible raw hue (or value) is assigned to its nearest center. Ties
//! always resolve to the lowest-indexed center.

use crate::constants::tables::{HUE_BUCKETS, HUE_TABLE_LEN, VALUE_TABLE_LEN};

/// Shorter of the two angular distances on a 360° wheel
pub fn circular_distance(a: usize, b: usize) -> usize {
    let d = a.abs_diff(b) % HUE_BUCKETS;
    d.min(HUE_BUCKETS - d)
}

/// Index of the center minimising `distance`, lowest index on ties
fn nearest_center(centers: &[usize], distance: impl Fn(usize) -> usize) -> usize {
    let mut best_index = 0;
    let mut best_distance = usize::MAX;
    for (i, &center) in centers.iter().enumerate() {
        let d = distance(center);
        if d < best_distance {
            best_distance = d;
            best_index = i;
        }
    }
    best_index
}

/// Map each hue 0..360 to the index of its nearest center (circular distance)
///
/// # Arguments
///
/// * `centers` - Hue centers in degrees, as returned by
///   [`crate::color::pick_hue_centers_by_quantiles`]
///
/// # Returns
///
/// 360 bin indices in `0..centers.len()`. An empty center list maps
/// everything to bin 0.
pub fn build_hue_to_bin_map(centers: &[usize]) -> Vec<u16> {
    (0..HUE_TABLE_LEN)
        .map(|h| nearest_center(centers, |c| circular_distance(h, c)) as u16)
        .collect()
}

/// Output intensity of each center, linearly spaced over `vmin..=vmax`
///
/// Rounding is half-to-even so the levels match the exhibition tables
/// byte for byte.
pub fn intensity_levels(k: usize, vmin: u16, vmax: u16) -> Vec<u16> {
    if k <= 1 {
        return vec![vmin; k];
    }
    let span = (vmax as f64 - vmin as f64) / (k - 1) as f64;
    (0..k)
        .map(|i| {
            let level = vmin as f64 + (i as f64 * span).round_ties_even();
            (level as u16).clamp(vmin, vmax)
        })
        .collect()
}

/// Map each value 0..100 to the intensity of its nearest center
///
/// With fewer than two centers every entry is `vmin`.
pub fn build_value_to_intensity_map(centers: &[usize], vmin: u16, vmax: u16) -> Vec<u16> {
    if centers.len() <= 1 {
        return vec![vmin; VALUE_TABLE_LEN];
    }

    let levels = intensity_levels(centers.len(), vmin, vmax);
    (0..VALUE_TABLE_LEN)
        .map(|v| {
            let i = nearest_center(centers, |c| v.abs_diff(c));
            levels[i].clamp(vmin, vmax)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_distance() {
        assert_eq!(circular_distance(0, 0), 0);
        assert_eq!(circular_distance(10, 350), 20);
        assert_eq!(circular_distance(350, 10), 20);
        assert_eq!(circular_distance(0, 180), 180);
        assert_eq!(circular_distance(90, 100), 10);
    }

    #[test]
    fn test_hue_map_wraps_around() {
        let centers = [10, 180, 350];
        let map = build_hue_to_bin_map(&centers);

        assert_eq!(map.len(), 360);
        assert_eq!(map[0], 0); // 10 away from both 10 and 350, lowest index wins
        assert_eq!(map[355], 2);
        assert_eq!(map[359], 2);
        assert_eq!(map[95], 0); // 85 vs 85, tie
        assert_eq!(map[96], 1);
    }

    #[test]
    fn test_hue_map_matches_brute_force() {
        let centers = [0, 40, 80, 120, 160, 200, 240, 280, 320];
        let map = build_hue_to_bin_map(&centers);
        for h in 0..360 {
            let best = centers
                .iter()
                .map(|&c| circular_distance(h, c))
                .min()
                .unwrap();
            let first = centers
                .iter()
                .position(|&c| circular_distance(h, c) == best)
                .unwrap();
            assert_eq!(map[h] as usize, first, "hue {}", h);
        }
    }

    #[test]
    fn test_intensity_levels_round_half_even() {
        // (128 - 1) / 15 = 8.4666..
        let levels = intensity_levels(16, 1, 128);
        assert_eq!(levels.len(), 16);
        assert_eq!(levels[0], 1);
        assert_eq!(levels[1], 9);
        assert_eq!(levels[15], 128);

        // 2.5 and 7.5 round to even
        assert_eq!(intensity_levels(5, 0, 10), vec![0, 2, 5, 8, 10]);
    }

    #[test]
    fn test_value_map_bounds() {
        let centers: Vec<usize> = (0..16).map(|i| i * 6).collect();
        let map = build_value_to_intensity_map(&centers, 1, 128);
        assert_eq!(map.len(), 100);
        assert!(map.iter().all(|&v| (1..=128).contains(&v)));
        assert_eq!(map[0], 1);
        assert_eq!(map[99], 128);
    }

    #[test]
    fn test_value_map_single_center_is_flat() {
        let map = build_value_to_intensity_map(&[42], 5, 128);
        assert_eq!(map, vec![5; 100]);
    }

    #[test]
    fn test_value_map_tie_prefers_lower_center() {
        let map = build_value_to_intensity_map(&[40, 60], 1, 128);
        assert_eq!(map[49], 1);
        assert_eq!(map[50], 1);
        assert_eq!(map[51], 128);
    }
}
