//! Character-by-character text reveal, independent of any timer.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    target: String,
    revealed: usize,
}

impl Typewriter {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            revealed: 0,
        }
    }

    /// Reveals one more character and returns the new prefix, or `None` once the
    /// whole target is visible.
    pub fn advance(&mut self) -> Option<&str> {
        let next = self.target[self.revealed..].chars().next()?;
        self.revealed += next.len_utf8();
        Some(&self.target[..self.revealed])
    }

    pub fn prefix(&self) -> &str {
        &self.target[..self.revealed]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_finished(&self) -> bool {
        self.revealed == self.target.len()
    }

    pub fn remaining(&self) -> usize {
        self.target[self.revealed..].chars().count()
    }
}
