use crate::skiplist::{Error, Result};
use rand::{self, SeedableRng, XorShiftRng};

const DEFAULT_PROBABILITY: f64 = 0.5;
const DEFAULT_MAX_HEIGHT: usize = 32;

/// Parameters controlling how tall the towers of a `SkipList` grow.
///
/// Every insertion draws its tower height by flipping a biased coin until it fails, so heights
/// follow a geometric distribution with success probability `probability`. The draw is capped at
/// `max_height`. A `seed` makes the sequence of heights, and therefore the shape of the list,
/// reproducible.
///
/// # Examples
/// ```
/// use skiplist_multiset::skiplist::SkipListConfig;
///
/// let config = SkipListConfig::default()
///     .probability(0.25)
///     .and_then(|config| config.max_height(16))
///     .and_then(|config| config.seed([1, 2, 3, 4]))
///     .unwrap();
///
/// assert_eq!(config.get_probability(), 0.25);
/// assert_eq!(config.get_max_height(), 16);
/// assert!(SkipListConfig::default().probability(1.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SkipListConfig {
    probability: f64,
    max_height: usize,
    seed: Option<[u32; 4]>,
}

impl SkipListConfig {
    /// Constructs a configuration, validating every parameter.
    pub fn new(probability: f64, max_height: usize, seed: Option<[u32; 4]>) -> Result<Self> {
        let config = SkipListConfig::default()
            .probability(probability)?
            .max_height(max_height)?;
        match seed {
            Some(seed) => config.seed(seed),
            None => Ok(config),
        }
    }

    /// Sets the promotion probability. It must lie strictly between 0 and 1.
    pub fn probability(mut self, probability: f64) -> Result<Self> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(Error::InvalidProbability(probability));
        }
        self.probability = probability;
        Ok(self)
    }

    /// Sets the cap on drawn tower heights. It must be at least 1.
    pub fn max_height(mut self, max_height: usize) -> Result<Self> {
        if max_height == 0 {
            return Err(Error::InvalidMaxHeight(max_height));
        }
        self.max_height = max_height;
        Ok(self)
    }

    /// Seeds the height generator. `XorShiftRng` cannot be seeded with all zeros.
    pub fn seed(mut self, seed: [u32; 4]) -> Result<Self> {
        if seed == [0; 4] {
            return Err(Error::InvalidSeed);
        }
        self.seed = Some(seed);
        Ok(self)
    }

    pub fn get_probability(&self) -> f64 {
        self.probability
    }

    pub fn get_max_height(&self) -> usize {
        self.max_height
    }

    pub fn get_seed(&self) -> Option<[u32; 4]> {
        self.seed
    }

    pub(super) fn build_rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => XorShiftRng::from_seed(seed),
            None => rand::weak_rng(),
        }
    }
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            probability: DEFAULT_PROBABILITY,
            max_height: DEFAULT_MAX_HEIGHT,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SkipListConfig;
    use crate::skiplist::Error;
    use rand::Rng;

    #[test]
    fn test_default() {
        let config = SkipListConfig::default();
        assert_eq!(config.get_probability(), 0.5);
        assert_eq!(config.get_max_height(), 32);
        assert_eq!(config.get_seed(), None);
    }

    #[test]
    fn test_invalid_probability() {
        for &probability in &[0.0, 1.0, -0.5, 2.0] {
            assert_eq!(
                SkipListConfig::default().probability(probability),
                Err(Error::InvalidProbability(probability)),
            );
        }
        assert!(SkipListConfig::default().probability(::std::f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_max_height() {
        assert_eq!(
            SkipListConfig::default().max_height(0),
            Err(Error::InvalidMaxHeight(0)),
        );
    }

    #[test]
    fn test_invalid_seed() {
        assert_eq!(SkipListConfig::default().seed([0; 4]), Err(Error::InvalidSeed));
        assert_eq!(SkipListConfig::new(0.5, 8, Some([0; 4])), Err(Error::InvalidSeed));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SkipListConfig::new(0.5, 8, Some([1, 1, 1, 1])).unwrap();
        let mut rng_1 = config.build_rng();
        let mut rng_2 = config.build_rng();
        for _ in 0..100 {
            assert_eq!(rng_1.next_u32(), rng_2.next_u32());
        }
    }
}
