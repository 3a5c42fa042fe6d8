//! Capacitive touch detection - threshold and edge logic for the
//! drive/sense loop, kept free of GPIO so it runs in host tests.

/// Tracks the debounced touch state between sampling passes.
#[derive(Default)]
pub struct TouchState {
    touched: bool,
}

impl TouchState {
    pub const fn new() -> Self {
        Self { touched: false }
    }

    /// Feed one charge measurement (number of polls before the sense line
    /// went high). Returns `Some(state)` only on a state change, so the
    /// caller reports edges rather than every sample.
    pub fn update(&mut self, charge_steps: u32, threshold: u32) -> Option<bool> {
        let touch = charge_steps > threshold;
        if touch == self.touched {
            return None;
        }
        self.touched = touch;
        Some(touch)
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }
}
