use chrono::Utc;

/// Issues `<prefix><millis>` identifiers.
///
/// The numeric part follows the wall clock but never repeats or goes
/// backwards, so ids issued in the same millisecond stay distinct.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next(&mut self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        format!("{}{}", prefix, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_within_a_burst() {
        let mut ids = IdGenerator::default();
        let issued: HashSet<_> = (0..1000).map(|_| ids.next("t")).collect();
        assert_eq!(issued.len(), 1000);
    }

    #[test]
    fn ids_carry_prefix() {
        let mut ids = IdGenerator::default();
        let id = ids.next("p");
        assert!(id.starts_with('p'));
        assert!(id[1..].parse::<i64>().is_ok());
    }
}
