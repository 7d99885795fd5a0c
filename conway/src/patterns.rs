// patterns.rs - Named starting patterns and presets for a Universe

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{Error, Universe};

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(u32, u32)],
}

/// Fixed-position patterns, laid out for the default 64x64 universe.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Blinker",
        cells: &[(24, 23), (24, 24), (24, 25)],
    },
    Pattern {
        name: "Toad",
        cells: &[(23, 24), (23, 25), (23, 26), (24, 23), (24, 24), (24, 25)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(9, 9), (9, 10), (10, 9), (10, 10), (11, 11), (11, 12), (12, 11), (12, 12)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top section
            (19, 23), (19, 24), (19, 25), (19, 29), (19, 30), (19, 31),
            (21, 21), (21, 26), (21, 28), (21, 33),
            (22, 21), (22, 26), (22, 28), (22, 33),
            (23, 21), (23, 26), (23, 28), (23, 33),
            (24, 23), (24, 24), (24, 25), (24, 29), (24, 30), (24, 31),
            // Bottom section (mirrored)
            (26, 23), (26, 24), (26, 25), (26, 29), (26, 30), (26, 31),
            (27, 21), (27, 26), (27, 28), (27, 33),
            (28, 21), (28, 26), (28, 28), (28, 33),
            (29, 21), (29, 26), (29, 28), (29, 33),
            (31, 23), (31, 24), (31, 25), (31, 29), (31, 30), (31, 31),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(24, 24), (24, 25), (23, 25), (25, 24), (25, 23)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

// Shapes placed at a seed-derived offset, relative to their top-left corner.
const GLIDER: &[(u32, u32)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
const MIDDLEWEIGHT_SPACESHIP: &[(u32, u32)] = &[
    (0, 1), (0, 2), (0, 3), (0, 4), (0, 5),
    (1, 0), (1, 5),
    (2, 5),
    (3, 0), (3, 4),
    (4, 2),
];

/// How a freshly created universe is populated.
#[derive(Clone, Copy)]
pub enum Preset {
    Empty,
    /// Every cell whose linear index is a multiple of 2 or 7.
    Default,
    Random,
    Glider,
    MiddleweightSpaceship,
    Named(&'static Pattern),
}

impl Preset {
    /// Every preset selectable by name, in menu order.
    pub fn all() -> Vec<Preset> {
        let mut presets = vec![
            Preset::Empty,
            Preset::Default,
            Preset::Random,
            Preset::Glider,
            Preset::MiddleweightSpaceship,
        ];
        presets.extend(PATTERNS.iter().map(Preset::Named));
        presets
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Empty => "Empty",
            Preset::Default => "Default",
            Preset::Random => "Random",
            Preset::Glider => "Glider",
            Preset::MiddleweightSpaceship => "Middleweight Spaceship",
            Preset::Named(pattern) => pattern.name,
        }
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted == "mwss" {
            return Ok(Preset::MiddleweightSpaceship);
        }
        Preset::all()
            .into_iter()
            .find(|preset| normalize(preset.name()) == wanted)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// Small linear congruential generator; good enough for seeding a board.
struct Lcg(u64);

impl Lcg {
    fn new(seed_value: u32) -> Self {
        let mut hasher = DefaultHasher::new();
        seed_value.hash(&mut hasher);
        Lcg(hasher.finish())
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

impl Universe {
    /// Builds a `width` x `height` universe populated by `preset`.
    /// `seed` only matters for presets with a random component.
    pub fn from_preset(preset: Preset, width: u32, height: u32, seed: u32) -> Universe {
        let mut universe = Universe::empty(width, height);
        let mut rng = Lcg::new(seed);

        match preset {
            Preset::Empty => {}
            Preset::Default => {
                let size = width as usize * height as usize;
                for i in (0..size).filter(|i| i % 2 == 0 || i % 7 == 0) {
                    universe.set_index(i, true);
                }
            }
            Preset::Random => {
                let size = width as usize * height as usize;
                for i in 0..size {
                    if rng.next_u64() & 1 == 1 {
                        universe.set_index(i, true);
                    }
                }
            }
            Preset::Glider => place_shape(&mut universe, GLIDER, &mut rng),
            Preset::MiddleweightSpaceship => {
                place_shape(&mut universe, MIDDLEWEIGHT_SPACESHIP, &mut rng)
            }
            Preset::Named(pattern) => {
                // Cells outside a smaller universe are dropped.
                for &(row, col) in pattern.cells {
                    if row < height && col < width {
                        universe.set(row, col, true);
                    }
                }
            }
        }
        universe
    }
}

fn place_shape(universe: &mut Universe, shape: &[(u32, u32)], rng: &mut Lcg) {
    let (width, height) = (universe.width(), universe.height());
    let origin_row = (rng.next_u64() % height as u64) as u32;
    let origin_col = (rng.next_u64() % width as u64) as u32;
    for &(row, col) in shape {
        universe.set((origin_row + row) % height, (origin_col + col) % width, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_loosely() {
        assert_eq!("gosper-glider-gun".parse::<Preset>().unwrap().name(), "Gosper Glider Gun");
        assert_eq!("MWSS".parse::<Preset>().unwrap(), Preset::MiddleweightSpaceship);
        assert_eq!("r_pentomino".parse::<Preset>().unwrap().name(), "R-pentomino");
        assert!(matches!("nope".parse::<Preset>(), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn default_preset_marks_multiples_of_two_and_seven() {
        let universe = Universe::from_preset(Preset::Default, 64, 64, 0);
        assert!(universe.is_alive(0, 0));
        assert!(!universe.is_alive(0, 1));
        assert!(universe.is_alive(0, 7));
        assert!(!universe.is_alive(0, 9));
    }

    #[test]
    fn random_preset_is_deterministic_per_seed() {
        let a = Universe::from_preset(Preset::Random, 32, 32, 7);
        let b = Universe::from_preset(Preset::Random, 32, 32, 7);
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert!(a.population() > 0);
        assert!(a.population() < 32 * 32);
    }

    #[test]
    fn shapes_wrap_around_the_edges() {
        for seed in 0..50 {
            let glider = Universe::from_preset(Preset::Glider, 8, 8, seed);
            assert_eq!(glider.population(), 5);
            let mwss = Universe::from_preset(Preset::MiddleweightSpaceship, 8, 8, seed);
            assert_eq!(mwss.population(), 11);
        }
    }

    #[test]
    fn named_patterns_are_clipped_to_small_universes() {
        let gun = PATTERNS.iter().find(|p| p.name == "Gosper Glider Gun").unwrap();
        let full = Universe::from_preset(Preset::Named(gun), 64, 64, 0);
        assert_eq!(full.population(), 36);
        let clipped = Universe::from_preset(Preset::Named(gun), 20, 20, 0);
        assert!(clipped.population() < 36);
    }
}
