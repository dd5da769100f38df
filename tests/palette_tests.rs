use std::collections::HashSet;

use cube_field::math::Color;
use cube_field::palette::{self, pick_color, pick_named, PALETTE};
use cube_field::random::{ScriptedRandom, SeededRandom};
use cube_field::scene::make_cube;

#[cfg(test)]
mod palette_tests {
    use super::*;

    #[test]
    fn test_palette_has_eight_distinct_colors() {
        let names: HashSet<_> = PALETTE.iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(PALETTE[0].name, "dodgerblue");
        assert_eq!(PALETTE[7].name, "papayawhip");
    }

    #[test]
    fn test_pick_always_returns_member() {
        let mut rng = SeededRandom::seeded(7);
        for _ in 0..1000 {
            assert!(palette::contains(pick_color(&mut rng)));
        }
    }

    #[test]
    fn test_every_member_observed_over_many_draws() {
        let mut rng = SeededRandom::seeded(2024);
        let seen: HashSet<&str> = (0..2000).map(|_| pick_named(&mut rng).name).collect();
        assert_eq!(seen.len(), PALETTE.len(), "Seen only {:?}", seen);
    }

    #[test]
    fn test_scripted_picks_map_to_index() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.125, 0.99]);
        assert_eq!(pick_named(&mut rng).name, "dodgerblue");
        assert_eq!(pick_named(&mut rng).name, "tomato");
        assert_eq!(pick_named(&mut rng).name, "papayawhip");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(palette::lookup("Gold"), Some(Color::from_rgb8(0xff, 0xd7, 0x00)));
        assert_eq!(palette::lookup("chartreuse"), None);
    }

    #[test]
    fn test_white_is_not_in_palette() {
        assert!(!palette::contains(Color::WHITE));
    }
}

#[cfg(test)]
mod factory_color_tests {
    use super::*;

    #[test]
    fn test_cubes_sample_color_per_call() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);
        let first = make_cube(&mut rng, 4.0);
        let second = make_cube(&mut rng, 4.0);
        assert_ne!(first.material.color, second.material.color);
    }

    #[test]
    fn test_different_seeds_can_yield_different_colors() {
        let colors: HashSet<&str> = (0..64)
            .map(|seed| {
                let color = make_cube(&mut SeededRandom::seeded(seed), 4.0).material.color;
                PALETTE
                    .iter()
                    .find(|entry| entry.color == color)
                    .map(|entry| entry.name)
                    .unwrap_or("unknown")
            })
            .collect();

        assert!(!colors.contains("unknown"));
        assert!(colors.len() >= 2, "All seeds produced {:?}", colors);
    }

    #[test]
    fn test_same_seed_same_color() {
        let mut a = SeededRandom::seeded(99);
        let mut b = SeededRandom::seeded(99);
        assert_eq!(
            make_cube(&mut a, 4.0).material.color,
            make_cube(&mut b, 4.0).material.color
        );
    }
}
