//! Prompts a command is waiting for, and the answers to send back.

use crate::config::ExpectationConfig;

/// A trigger substring and the response line it provokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub trigger: String,
    pub response: String,
}

impl Expectation {
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            response: response.into(),
        }
    }
}

impl From<ExpectationConfig> for Expectation {
    fn from(config: ExpectationConfig) -> Self {
        Self::new(config.input, config.output)
    }
}

/// Ordered, consumable list of expectations belonging to one command.
///
/// Each entry fires at most once: a match removes it from the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectationTable {
    entries: Vec<Expectation>,
}

impl ExpectationTable {
    pub fn new(entries: Vec<Expectation>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte length of the longest remaining trigger.
    pub fn longest_trigger(&self) -> usize {
        self.entries.iter().map(|e| e.trigger.len()).max().unwrap_or(0)
    }

    /// Remaining expectations, in configured order.
    pub fn remaining(&self) -> &[Expectation] {
        &self.entries
    }

    /// Find an expectation whose trigger occurs in `output` and remove it.
    ///
    /// When several triggers occur at once the one configured last wins; the
    /// others stay in the table for later output.
    pub fn take_match(&mut self, output: &str) -> Option<Expectation> {
        let index = self
            .entries
            .iter()
            .rposition(|e| output.contains(e.trigger.as_str()))?;
        Some(self.entries.remove(index))
    }
}

impl FromIterator<Expectation> for ExpectationTable {
    fn from_iter<I: IntoIterator<Item = Expectation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExpectationTable {
        ExpectationTable::new(vec![
            Expectation::new("Continue?", "y"),
            Expectation::new("Install path:", "/opt/app"),
        ])
    }

    #[test]
    fn test_no_match() {
        let mut table = table();
        assert_eq!(table.take_match("Welcome to the installer"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_match_consumes_entry() {
        let mut table = table();
        let hit = table.take_match("Continue? [y/n] ").unwrap();
        assert_eq!(hit.response, "y");
        assert_eq!(table.take_match("Continue? [y/n] "), None);
        assert_eq!(table.remaining(), &[Expectation::new("Install path:", "/opt/app")]);
    }

    #[test]
    fn test_last_configured_wins() {
        let mut table = table();
        let hit = table.take_match("Continue? ... Install path:").unwrap();
        assert_eq!(hit.trigger, "Install path:");
        let next = table.take_match("Continue? ... Install path:").unwrap();
        assert_eq!(next.trigger, "Continue?");
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_triggers_fire_in_reverse_order() {
        let mut table = ExpectationTable::new(vec![
            Expectation::new("Password:", "first"),
            Expectation::new("Password:", "second"),
        ]);
        assert_eq!(table.take_match("Password:").unwrap().response, "second");
        assert_eq!(table.take_match("Password:").unwrap().response, "first");
    }

    #[test]
    fn test_longest_trigger_shrinks() {
        let mut table = table();
        assert_eq!(table.longest_trigger(), "Install path:".len());
        table.take_match("Install path:").unwrap();
        assert_eq!(table.longest_trigger(), "Continue?".len());
        table.take_match("Continue?").unwrap();
        assert_eq!(table.longest_trigger(), 0);
    }

    #[test]
    fn test_from_config() {
        let e = Expectation::from(ExpectationConfig {
            input: "Name:".into(),
            output: "bob".into(),
        });
        assert_eq!(e, Expectation::new("Name:", "bob"));
    }
}
