use crate::core::models::system::BoxDims;
use nalgebra::Vector3;

/// Folds a lattice displacement into its minimum-image representative.
///
/// The result lies in `(-length/2, length/2]` and is congruent to `delta` modulo `length`.
/// `length` must be positive; the box extents of a parsed configuration always are.
pub fn fold(delta: i32, length: i32) -> i32 {
    let wrapped = delta.rem_euclid(length);
    if 2 * wrapped > length {
        wrapped - length
    } else {
        wrapped
    }
}

/// Applies [`fold`] independently along each axis of the box.
pub fn minimum_image(delta: Vector3<i32>, dims: BoxDims) -> Vector3<i32> {
    Vector3::new(
        fold(delta.x, dims.x),
        fold(delta.y, dims.y),
        fold(delta.z, dims.z),
    )
}

/// Squared minimum-image distance between two lattice displacements.
pub fn folded_distance_squared(delta: Vector3<i32>, dims: BoxDims) -> i32 {
    let folded = minimum_image(delta, dims);
    folded.dot(&folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_maps_positive_displacement_beyond_half_box_to_negative_image() {
        assert_eq!(fold(7, 10), -3);
    }

    #[test]
    fn fold_maps_negative_displacement_beyond_half_box_to_positive_image() {
        assert_eq!(fold(-7, 10), 3);
    }

    #[test]
    fn fold_keeps_exactly_half_box_on_the_positive_side() {
        assert_eq!(fold(5, 10), 5);
        assert_eq!(fold(-5, 10), 5);
    }

    #[test]
    fn fold_result_is_in_half_open_interval_and_congruent() {
        for length in [1, 2, 7, 10, 64] {
            for delta in -200..=200 {
                let folded = fold(delta, length);
                assert!(2 * folded > -length && 2 * folded <= length);
                assert_eq!((delta - folded).rem_euclid(length), 0);
            }
        }
    }

    #[test]
    fn minimum_image_folds_each_axis_with_its_own_length() {
        let dims = BoxDims::new(10, 20, 8);
        let folded = minimum_image(Vector3::new(9, -11, 4), dims);
        assert_eq!(folded, Vector3::new(-1, 9, 4));
    }

    #[test]
    fn folded_distance_squared_uses_shortest_periodic_image() {
        let dims = BoxDims::new(10, 10, 10);
        assert_eq!(folded_distance_squared(Vector3::new(9, 0, 0), dims), 1);
        assert_eq!(folded_distance_squared(Vector3::new(2, 0, 0), dims), 4);
    }
}
