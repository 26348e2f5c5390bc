//! Grid generation settings

use serde::{Deserialize, Serialize};

/// Surface style requested from the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Finish {
    #[default]
    Smooth,
    Blocky,
}

/// Which generator a configuration resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Smooth,
    Blocky,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub finish: Finish,
    /// Number of z layers sampled from the face source
    pub levels: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            finish: Finish::Smooth,
            levels: 1,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// A smooth surface can only be produced from a single level
    pub fn generator_kind(&self) -> GeneratorKind {
        if self.finish == Finish::Smooth && self.levels == 1 {
            GeneratorKind::Smooth
        } else {
            GeneratorKind::Blocky
        }
    }
}
