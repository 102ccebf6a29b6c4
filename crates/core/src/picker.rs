use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform choices made while replying.
pub trait ReplyPicker {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

pub fn pick_from<'a, P>(picker: &mut P, items: &'a [String]) -> Option<&'a str>
where
    P: ReplyPicker + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let index = picker.pick_index(items.len()).min(items.len() - 1);
    Some(items[index].as_str())
}

#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl ReplyPicker for RandomPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays a fixed script of choices. Exhausted scripts pick index 0 and
/// answer `false` to every chance.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    indices: VecDeque<usize>,
    chances: VecDeque<bool>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }
}

impl ReplyPicker for ScriptedPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len.max(1)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}
