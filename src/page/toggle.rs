/// Show/hide switch, hidden until first toggled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    visible: bool,
}

impl Toggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility and return the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "content toggled");
        self.visible
    }
}
