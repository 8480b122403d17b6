use rand::seq::SliceRandom;
use rand::Rng;

/// Background gradients offered by the page
pub const GRADIENTS: &[&str] = &[
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
];

/// Current page background, picked at random from [`GRADIENTS`]
#[derive(Debug, Clone, Default)]
pub struct Palette {
    current: Option<&'static str>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&'static str> {
        self.current
    }

    /// Choose a gradient. Repeats are allowed.
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let chosen = GRADIENTS.choose(rng).copied().unwrap_or(GRADIENTS[0]);
        self.current = Some(chosen);
        tracing::debug!(background = chosen, "background changed");
        chosen
    }
}
