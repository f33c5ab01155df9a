//! Threshold bands mapping a scalar onto a discrete label.

use crate::error::ConfigError;

/// How a band's upper bound treats a reading equal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// `reading <= bound` belongs to the band.
    #[default]
    Inclusive,
    /// `reading < bound` belongs to the band.
    Exclusive,
}

impl Edge {
    fn admits(self, reading: u16, bound: u16) -> bool {
        match self {
            Self::Inclusive => reading <= bound,
            Self::Exclusive => reading < bound,
        }
    }
}

/// Band with an upper bound, all readings above the previous band and up
/// to this bound map to `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band<L> {
    pub bound: u16,
    pub label: L,
}

/// Ordered bands plus an unbounded top band.
///
/// The list is static configuration, checked once on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bands<L, const B: usize> {
    bounded: [Band<L>; B],
    top: L,
    edge: Edge,
}

impl<L: Copy + PartialEq, const B: usize> Bands<L, B> {
    /// # Errors
    ///
    /// Fails with `UnorderedBands` when bounds are not strictly increasing.
    pub fn new(bounded: [Band<L>; B], top: L, edge: Edge) -> Result<Self, ConfigError> {
        for index in 1..B {
            if bounded[index].bound <= bounded[index - 1].bound {
                return Err(ConfigError::UnorderedBands { index });
            }
        }
        Ok(Self {
            bounded,
            top,
            edge,
        })
    }

    /// Select the first band admitting the reading, the top band if none.
    #[must_use]
    pub fn classify(&self, reading: u16) -> L {
        self.bounded
            .iter()
            .find(|band| self.edge.admits(reading, band.bound))
            .map_or(self.top, |band| band.label)
    }

    /// All labels from the lowest band to the top one.
    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        self.bounded
            .iter()
            .map(|band| band.label)
            .chain(core::iter::once(self.top))
    }

    /// # Errors
    ///
    /// Fails with `UnreachableBand` when a bound lies above `max_value`.
    pub fn check_reachable(&self, max_value: u16) -> Result<(), ConfigError> {
        for (index, band) in self.bounded.iter().enumerate() {
            if band.bound > max_value {
                return Err(ConfigError::UnreachableBand {
                    index,
                    bound: band.bound,
                    max_value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Color {
        Green,
        Yellow,
        Red,
    }

    fn traffic_light(edge: Edge) -> Bands<Color, 2> {
        Bands::new(
            [
                Band {
                    bound: 40,
                    label: Color::Green,
                },
                Band {
                    bound: 70,
                    label: Color::Yellow,
                },
            ],
            Color::Red,
            edge,
        )
        .unwrap()
    }

    #[test]
    fn inclusive_bounds_belong_to_the_lower_band() {
        let bands = traffic_light(Edge::Inclusive);
        assert_eq!(bands.classify(0), Color::Green);
        assert_eq!(bands.classify(40), Color::Green);
        assert_eq!(bands.classify(41), Color::Yellow);
        assert_eq!(bands.classify(70), Color::Yellow);
        assert_eq!(bands.classify(71), Color::Red);
        assert_eq!(bands.classify(u16::MAX), Color::Red);
    }

    #[test]
    fn exclusive_bounds_belong_to_the_upper_band() {
        let bands = traffic_light(Edge::Exclusive);
        assert_eq!(bands.classify(39), Color::Green);
        assert_eq!(bands.classify(40), Color::Yellow);
        assert_eq!(bands.classify(69), Color::Yellow);
        assert_eq!(bands.classify(70), Color::Red);
    }

    #[test]
    fn labels_are_listed_bottom_up() {
        let bands = traffic_light(Edge::Inclusive);
        let mut labels = bands.labels();
        assert_eq!(labels.next(), Some(Color::Green));
        assert_eq!(labels.next(), Some(Color::Yellow));
        assert_eq!(labels.next(), Some(Color::Red));
        assert_eq!(labels.next(), None);
    }

    #[test]
    fn unordered_bounds_are_rejected() {
        let bands = Bands::new(
            [
                Band {
                    bound: 70,
                    label: Color::Green,
                },
                Band {
                    bound: 70,
                    label: Color::Yellow,
                },
            ],
            Color::Red,
            Edge::Inclusive,
        );
        assert_eq!(bands, Err(ConfigError::UnorderedBands { index: 1 }));
    }

    #[test]
    fn only_the_top_band_classifies_everything() {
        let bands: Bands<Color, 0> = Bands::new([], Color::Red, Edge::Inclusive).unwrap();
        assert_eq!(bands.classify(0), Color::Red);
        assert_eq!(bands.classify(u16::MAX), Color::Red);
    }

    #[test]
    fn bound_above_sensor_range_is_unreachable() {
        let bands = traffic_light(Edge::Inclusive);
        assert!(bands.check_reachable(329).is_ok());
        assert_eq!(
            bands.check_reachable(50),
            Err(ConfigError::UnreachableBand {
                index: 1,
                bound: 70,
                max_value: 50,
            })
        );
    }

    proptest! {
        #[test]
        fn classification_never_descends(a in any::<u16>(), b in any::<u16>()) {
            let bands = traffic_light(Edge::Inclusive);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bands.classify(low) <= bands.classify(high));
        }
    }
}
