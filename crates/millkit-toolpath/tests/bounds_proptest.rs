use approx::assert_relative_eq;
use millkit_toolpath::{fixed_reference, Bounds, BoundsType};
use proptest::prelude::*;

fn corner() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-500.0f64..500.0)
}

fn width() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(1.0f64..200.0)
}

fn margins() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-0.4f64..2.0)
}

fn reference(low: [f64; 3], width: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    (low, std::array::from_fn(|i| low[i] + width[i]))
}

proptest! {
    #[test]
    fn relative_margins_survive_adjust(
        ref_corner in corner(),
        ref_width in width(),
        low in margins(),
        high in margins(),
    ) {
        let (ref_low, ref_high) = reference(ref_corner, ref_width);
        let mut bounds = Bounds::with_reference(
            BoundsType::RelativeMargin,
            low,
            high,
            fixed_reference(ref_low),
            fixed_reference(ref_high),
        );
        let (abs_low, abs_high) = bounds.absolute_limits();
        bounds.adjust_bounds_to_absolute_limits(&abs_low, &abs_high).unwrap();
        let (new_low, new_high) = bounds.bounds();
        for i in 0..3 {
            assert_relative_eq!(new_low[i], low[i], epsilon = 1e-9);
            assert_relative_eq!(new_high[i], high[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn fixed_limits_survive_adjust(
        ref_corner in corner(),
        ref_width in width(),
        target_low in corner(),
        target_high in corner(),
    ) {
        let (ref_low, ref_high) = reference(ref_corner, ref_width);
        let mut bounds = Bounds::with_reference(
            BoundsType::FixedMargin,
            [0.0; 3],
            [0.0; 3],
            fixed_reference(ref_low),
            fixed_reference(ref_high),
        );
        bounds.adjust_bounds_to_absolute_limits(&target_low, &target_high).unwrap();
        let (abs_low, abs_high) = bounds.absolute_limits();
        for i in 0..3 {
            assert_relative_eq!(abs_low[i], target_low[i], epsilon = 1e-9);
            assert_relative_eq!(abs_high[i], target_high[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn relative_limits_survive_adjust(
        ref_corner in corner(),
        ref_width in width(),
        target_low in corner(),
        target_high in corner(),
    ) {
        let (ref_low, ref_high) = reference(ref_corner, ref_width);
        let mut bounds = Bounds::with_reference(
            BoundsType::RelativeMargin,
            [0.0; 3],
            [0.0; 3],
            fixed_reference(ref_low),
            fixed_reference(ref_high),
        );
        bounds.adjust_bounds_to_absolute_limits(&target_low, &target_high).unwrap();
        prop_assert_eq!(bounds.bounds_type(), BoundsType::RelativeMargin);
        let (abs_low, abs_high) = bounds.absolute_limits();
        for i in 0..3 {
            assert_relative_eq!(abs_low[i], target_low[i], epsilon = 1e-9);
            assert_relative_eq!(abs_high[i], target_high[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn custom_limits_are_the_bounds(low in corner(), high in corner()) {
        let bounds = Bounds::custom(low, high);
        prop_assert_eq!(bounds.absolute_limits(), (low, high));
    }
}
