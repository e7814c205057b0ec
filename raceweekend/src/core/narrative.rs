/// NarrativeLog is the append-only sink for story lines produced during a race weekend. The
/// presentation layer drains it between phases.
#[derive(Debug, Default, Clone)]
pub struct NarrativeLog {
    entries: Vec<String>,
}

impl NarrativeLog {
    pub fn new() -> NarrativeLog {
        NarrativeLog::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// drain returns all entries in insertion order and clears the log.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_clears() {
        let mut log = NarrativeLog::new();
        log.push("first");
        log.push(String::from("second"));
        assert_eq!(log.drain(), vec!["first", "second"]);
        assert!(log.is_empty());
    }
}
