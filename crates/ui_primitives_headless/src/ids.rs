//! Generated accessibility ids.

use std::cell::Cell;

thread_local! {
    static NEXT_PRIMITIVE_ID: Cell<u64> = const { Cell::new(1) };
}

/// Returns a fresh DOM id of the form `{prefix}-{part}-{n}`.
///
/// Ids are unique within the current thread, so every mounted instance (including a remount of
/// the same primitive) receives its own ids.
pub fn generate_id(prefix: &str, part: &str) -> String {
    let next = NEXT_PRIMITIVE_ID.with(|counter| {
        let next = counter.get();
        counter.set(next.saturating_add(1));
        next
    });
    format!("{prefix}-{part}-{next}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Trigger/content id pair bound in both directions.
pub struct IdPair {
    /// Id rendered on the trigger element.
    pub trigger: String,
    /// Id rendered on the content element.
    pub content: String,
}

impl IdPair {
    /// Generates a pair for one instance of `primitive` (for example `"tooltip"`).
    pub fn generate(prefix: &str, primitive: &str) -> Self {
        Self {
            trigger: generate_id(prefix, &format!("{primitive}-trigger")),
            content: generate_id(prefix, &format!("{primitive}-content")),
        }
    }

    /// Replaces the content id with one announced by the content role.
    pub fn announce_content(&mut self, id: impl Into<String>) {
        self.content = id.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_per_call() {
        let first = IdPair::generate("ui", "dialog");
        let second = IdPair::generate("ui", "dialog");

        assert_ne!(first, second);
        assert!(first.trigger.starts_with("ui-dialog-trigger-"));
        assert!(first.content.starts_with("ui-dialog-content-"));
    }

    #[test]
    fn content_can_announce_its_own_id() {
        let mut ids = IdPair::generate("ui", "hover-card");
        ids.announce_content("profile-preview");
        assert_eq!(ids.content, "profile-preview");
    }
}
