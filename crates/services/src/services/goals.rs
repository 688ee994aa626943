//! Bounded editor for the organization project-goals list.

/// Upper bound on project goals per submission.
pub const MAX_GOALS: usize = 6;

/// Add-only list of free-text goals. Entries can be edited in place but not
/// removed; the intake form has never offered a remove control.
#[derive(Debug, Clone, Default)]
pub struct GoalsEditor {
    goals: Vec<String>,
}

impl GoalsEditor {
    /// Starts with a single empty entry, matching the rendered form.
    pub fn new() -> Self {
        Self {
            goals: vec![String::new()],
        }
    }

    /// Append one empty entry. Returns false (and does nothing) at the cap.
    pub fn add_goal(&mut self) -> bool {
        if self.goals.len() >= MAX_GOALS {
            return false;
        }
        self.goals.push(String::new());
        true
    }

    /// Replace one entry. Returns false for an out-of-range index.
    pub fn update_goal(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.goals.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    /// Non-blank entries, trimmed, in order. This is what goes on the wire.
    pub fn trimmed(&self) -> Vec<String> {
        self.goals
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn reset(&mut self) {
        self.goals = vec![String::new()];
    }
}
