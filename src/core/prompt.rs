/// Input line state for the terminal
///
/// Holds what the user is typing plus where they are while browsing
/// previous commands with Up/Down.

/// Completions offered on Tab, first match wins
pub const SUGGESTIONS: &[&str] = &[
    "cd frontend",
    "npm run dev",
    "npm install",
    "ls",
    "pwd",
    "help",
    "clear",
    "git commit",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    input: String,
    /// Steps back from the newest command; `None` when not browsing
    history_index: Option<usize>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn insert(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Hand over the typed line and reset for the next one
    pub fn take(&mut self) -> String {
        self.history_index = None;
        std::mem::take(&mut self.input)
    }

    /// Step to an older command
    ///
    /// `commands` is oldest first. Stops at the oldest entry.
    pub fn history_up(&mut self, commands: &[&str]) {
        let len = commands.len();
        if len == 0 {
            return;
        }

        let next = match self.history_index {
            None => 0,
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
        };

        self.history_index = Some(next);
        self.input = recalled(commands, next);
    }

    /// Step to a newer command, or back to an empty line
    pub fn history_down(&mut self, commands: &[&str]) {
        match self.history_index {
            Some(i) if i > 0 => {
                self.history_index = Some(i - 1);
                self.input = recalled(commands, i - 1);
            }
            _ => {
                self.history_index = None;
                self.input.clear();
            }
        }
    }

    /// Replace the input with the first suggestion it prefixes
    ///
    /// # Returns
    /// * `true` - A suggestion was applied
    pub fn complete(&mut self) -> bool {
        let typed = self.input.to_lowercase();
        match SUGGESTIONS.iter().find(|s| s.starts_with(&typed)) {
            Some(suggestion) => {
                self.input = suggestion.to_string();
                true
            }
            None => false,
        }
    }
}

fn recalled(commands: &[&str], back: usize) -> String {
    commands
        .len()
        .checked_sub(back + 1)
        .and_then(|i| commands.get(i))
        .map(|c| c.to_string())
        .unwrap_or_default()
}
