//! The generator handle threaded through every simulator.

/// Source of independent standard normal variates.
///
/// The simulators are generic over this trait (static dispatch), so a
/// production run uses [`SimRng`](super::SimRng) while a test can substitute a
/// [`ScriptedNormals`] to fix the exact draws.
pub trait NormalSource {
    /// Draws one `Normal(0, 1)` variate.
    fn next_normal(&mut self) -> f64;

    /// Fills `buffer` with `Normal(0, 1)` variates in order.
    ///
    /// Empty buffers are a no-op.
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_normal();
        }
    }
}

impl<R: NormalSource + ?Sized> NormalSource for &mut R {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }
}

/// Replays a fixed list of "normal" draws.
///
/// Once the script is exhausted it either repeats a fixed fill value (see
/// [`ScriptedNormals::with_fill`]) or starts again from the beginning. An
/// empty script without a fill value yields zeros. Useful for deterministic
/// scenarios such as "the first draw is exactly 1.0".
///
/// # Examples
///
/// ```rust
/// use ssm_core::rng::{NormalSource, ScriptedNormals};
///
/// let mut draws = ScriptedNormals::new(vec![1.0, -0.5]);
/// assert_eq!(draws.next_normal(), 1.0);
/// assert_eq!(draws.next_normal(), -0.5);
/// assert_eq!(draws.next_normal(), 1.0);
/// assert_eq!(draws.consumed(), 3);
///
/// let mut pinned = ScriptedNormals::with_fill(vec![1.0], 0.0);
/// assert_eq!(pinned.next_normal(), 1.0);
/// assert_eq!(pinned.next_normal(), 0.0);
/// assert_eq!(pinned.next_normal(), 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedNormals {
    script: Vec<f64>,
    fill: Option<f64>,
    consumed: usize,
}

impl ScriptedNormals {
    /// Creates a source that cycles through `script`.
    pub fn new(script: Vec<f64>) -> Self {
        Self {
            script,
            fill: None,
            consumed: 0,
        }
    }

    /// Creates a source that replays `script` once and then returns `fill`.
    pub fn with_fill(script: Vec<f64>, fill: f64) -> Self {
        Self {
            script,
            fill: Some(fill),
            consumed: 0,
        }
    }

    /// Total number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl NormalSource for ScriptedNormals {
    fn next_normal(&mut self) -> f64 {
        let index = self.consumed;
        self.consumed += 1;
        if let Some(&value) = self.script.get(index) {
            return value;
        }
        match self.fill {
            Some(fill) => fill,
            None if self.script.is_empty() => 0.0,
            None => self.script[index % self.script.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_yields_zeros() {
        let mut draws = ScriptedNormals::default();
        assert_eq!(draws.next_normal(), 0.0);
        assert_eq!(draws.next_normal(), 0.0);
        assert_eq!(draws.consumed(), 2);
    }

    #[test]
    fn test_fill_normal_uses_script_order() {
        let mut draws = ScriptedNormals::new(vec![0.1, 0.2, 0.3]);
        let mut buffer = [0.0; 5];
        draws.fill_normal(&mut buffer);
        assert_eq!(buffer, [0.1, 0.2, 0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_mut_reference_forwards() {
        fn take<R: NormalSource>(mut rng: R) -> f64 {
            rng.next_normal()
        }
        let mut draws = ScriptedNormals::with_fill(vec![4.0], -1.0);
        assert_eq!(take(&mut draws), 4.0);
        assert_eq!(take(&mut draws), -1.0);
        assert_eq!(draws.consumed(), 2);
    }
}
