/// Cosmic Genesis game state definitions.

use serde::{Deserialize, Serialize};

use super::catalog::{GeneratorDef, CATALOG};
use super::model;

/// Display language preference. Persisted as its code string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// All supported locales in selector order.
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Zh]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        Locale::all().iter().copied().find(|l| l.code() == code)
    }

    /// Label shown on the language selector.
    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Zh => "中文",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Locale::En => 0,
            Locale::Zh => 1,
        }
    }

    /// The next locale in selector order, wrapping around.
    pub fn next(&self) -> Locale {
        let all = Locale::all();
        all[(self.index() + 1) % all.len()]
    }
}

/// Owned count of one catalog generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Generator {
    pub def: &'static GeneratorDef,
    pub count: u32,
}

impl Generator {
    pub fn new(def: &'static GeneratorDef) -> Self {
        Self { def, count: 0 }
    }

    /// Current cost to buy the next one.
    pub fn cost(&self) -> f64 {
        model::cost(self.def.base_cost, self.count)
    }

    /// Matter per second from this generator type.
    pub fn production(&self) -> f64 {
        model::production_rate(self.def.base_production, self.count)
    }

    pub fn can_afford(&self, matter: f64) -> bool {
        matter >= self.cost()
    }
}

/// A floating "+N" acknowledgement rising from the harvest target.
#[derive(Clone, Debug)]
pub struct Floater {
    pub text: String,
    /// Column offset from the centre of the singularity art.
    pub col_offset: i16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub max_life: u32,
}

/// Full state of a Cosmic Genesis session.
///
/// Only `matter`, the generator counts and `locale` are persisted; the rest
/// is transient presentation state.
#[derive(Clone, Debug)]
pub struct GenesisState {
    /// Current matter.
    pub matter: f64,
    /// One entry per catalog definition, in catalog order.
    pub generators: Vec<Generator>,
    pub locale: Locale,
    /// Big Crunch confirmation is showing.
    pub reset_pending: bool,
    pub floaters: Vec<Floater>,
    /// Ticks remaining on the harvest flash.
    pub click_flash: u32,
    /// Animation frame counter (incremented every tick).
    pub anim_frame: u32,
    /// Simple RNG state for floater spread.
    pub rng_state: u32,
}

impl GenesisState {
    pub fn new() -> Self {
        Self {
            matter: 0.0,
            generators: fresh_generators(),
            locale: Locale::default(),
            reset_pending: false,
            floaters: Vec::new(),
            click_flash: 0,
            anim_frame: 0,
            rng_state: 42,
        }
    }

    /// Aggregate matter per second.
    pub fn mps(&self) -> f64 {
        self.generators.iter().map(|g| g.production()).sum()
    }

    pub fn click_power(&self) -> f64 {
        model::click_power(self.mps())
    }

    #[cfg(test)]
    pub fn generator(&self, id: &str) -> Option<&Generator> {
        self.generators.iter().find(|g| g.def.id == id)
    }

    pub fn total_generators(&self) -> u64 {
        self.generators.iter().map(|g| g.count as u64).sum()
    }

    /// xorshift32.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }
}

impl Default for GenesisState {
    fn default() -> Self {
        Self::new()
    }
}

/// Every catalog generator at count 0.
pub fn fresh_generators() -> Vec<Generator> {
    CATALOG.iter().map(Generator::new).collect()
}
