use rand::Rng;

/// Color hint for the current counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    Positive,
    Negative,
    Neutral,
}

impl CounterTone {
    pub fn color(self) -> &'static str {
        match self {
            CounterTone::Positive => "#4facfe",
            CounterTone::Negative => "#ff6b6b",
            CounterTone::Neutral => "#666",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: i64,
}

impl Counter {
    /// Lower and upper bound of [`Counter::randomize`], inclusive
    pub const RANDOM_RANGE: (i64, i64) = (-100, 100);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&mut self) -> i64 {
        self.value += 1;
        tracing::debug!(value = self.value, "counter incremented");
        self.value
    }

    pub fn decrement(&mut self) -> i64 {
        self.value -= 1;
        tracing::debug!(value = self.value, "counter decremented");
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
        tracing::debug!("counter reset");
    }

    pub fn randomize<R: Rng>(&mut self, rng: &mut R) -> i64 {
        let (low, high) = Self::RANDOM_RANGE;
        self.value = rng.gen_range(low..=high);
        tracing::debug!(value = self.value, "counter set to random value");
        self.value
    }

    pub fn tone(&self) -> CounterTone {
        match self.value {
            v if v > 0 => CounterTone::Positive,
            v if v < 0 => CounterTone::Negative,
            _ => CounterTone::Neutral,
        }
    }
}
