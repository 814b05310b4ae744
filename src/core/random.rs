/// Injected randomness: every draw the engine makes goes through here.
use rand::rngs::StdRng;
use rand::Rng;

/// A source of uniformly distributed numbers in `[0, 1)`.
///
/// Fixing the source fixes every spacing, pick and layout built from it.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapts any `FnMut() -> f64` closure into a [`RandomSource`].
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnSource<F> {
    fn next_f64(&mut self) -> f64 {
        (self.0)()
    }
}

/// Replays a fixed list of draws, wrapping around at the end. Counts how
/// many draws were taken.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
    draws: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence source needs at least one value");
        Self {
            values,
            index: 0,
            draws: 0,
        }
    }

    /// Always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.index];
        self.index = (self.index + 1) % self.values.len();
        self.draws += 1;
        value
    }
}

/// A whole-step value in `[min, max]`: `floor(r * (1 + max - min)) + min`.
pub fn random_between(random: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    (random.next_f64() * (1.0 + max - min)).floor() + min
}

/// A percentage draw in `[1, 100]`.
pub fn random_percentage(random: &mut dyn RandomSource) -> u32 {
    random_between(random, 1.0, 100.0) as u32
}
