use panorama_groups::managers::group_manager::rotated_index;
use proptest::prelude::*;

proptest! {
    /// Any offset, however large or negative, lands inside the list.
    #[test]
    fn prop_rotated_index_stays_in_bounds(
        len in 1usize..64,
        current in 0usize..64,
        offset in i64::MIN / 4..i64::MAX / 4,
    ) {
        let current = current % len;
        let next = rotated_index(current, offset, len);
        prop_assert!(next < len);
    }

    /// A zero offset is the identity.
    #[test]
    fn prop_zero_offset_is_identity(len in 1usize..64, current in 0usize..64) {
        let current = current % len;
        prop_assert_eq!(rotated_index(current, 0, len), current);
    }

    /// Stepping forward then backward returns to the start.
    #[test]
    fn prop_rotation_is_invertible(
        len in 1usize..64,
        current in 0usize..64,
        offset in -1000i64..1000,
    ) {
        let current = current % len;
        let there = rotated_index(current, offset, len);
        prop_assert_eq!(rotated_index(there, -offset, len), current);
    }

    /// One big jump equals the same distance taken in single steps.
    #[test]
    fn prop_jump_equals_repeated_steps(
        len in 1usize..16,
        current in 0usize..16,
        offset in -50i64..50,
    ) {
        let current = current % len;
        let jumped = rotated_index(current, offset, len);

        let step = if offset >= 0 { 1 } else { -1 };
        let mut walked = current;
        for _ in 0..offset.unsigned_abs() {
            walked = rotated_index(walked, step, len);
        }
        prop_assert_eq!(jumped, walked);
    }

    /// Rotation cycles with period `len`.
    #[test]
    fn prop_full_cycle_returns_home(len in 1usize..64, current in 0usize..64) {
        let current = current % len;
        prop_assert_eq!(rotated_index(current, len as i64, len), current);
        prop_assert_eq!(rotated_index(current, -(len as i64), len), current);
    }
}
