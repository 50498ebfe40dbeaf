use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message as sent on the chat-completions wire.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TurnMessage {
    pub role: Role,
    pub content: String,
}

/// The conversation history the loop sends with every request.
///
/// Invariants: at most one system message exists and it is always the oldest
/// entry; everything else is append-only apart from the retention trim, which
/// runs after every append so mid-turn appends are bounded too.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<TurnMessage>,
    max_len: usize,
}

impl Transcript {
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_len,
        }
    }

    /// Installs or replaces the system message at the front.
    pub fn set_system(&mut self, content: impl Into<String>) {
        self.entries.retain(|m| m.role != Role::System);
        self.entries.insert(
            0,
            TurnMessage {
                role: Role::System,
                content: content.into(),
            },
        );
        self.trim();
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(TurnMessage {
            role,
            content: content.into(),
        });
        self.trim();
    }

    /// Keeps the system message (if any) plus the most recent `max_len - 1`
    /// entries, preserving relative order. Without a system message the most
    /// recent `max_len` survive.
    fn trim(&mut self) {
        if self.entries.len() <= self.max_len {
            return;
        }
        let system = match self.entries.first() {
            Some(m) if m.role == Role::System => Some(self.entries.remove(0)),
            _ => None,
        };
        let keep = if system.is_some() {
            self.max_len.saturating_sub(1)
        } else {
            self.max_len
        };
        let drop = self.entries.len().saturating_sub(keep);
        self.entries.drain(..drop);
        if let Some(system) = system {
            self.entries.insert(0, system);
        }
    }

    pub fn messages(&self) -> &[TurnMessage] {
        &self.entries
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
    fn trim_retains_system_and_recent_turns() {
        let mut t = Transcript::new(20);
        t.set_system("sys");
        for i in 0..25 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            t.push(role, format!("turn {i}"));
        }

        assert_eq!(t.len(), 20);
        assert_eq!(t.messages()[0].role, Role::System);
        // Last 19 appended turns survive, in order.
        assert_eq!(t.messages()[1].content, "turn 6");
        assert_eq!(t.messages()[19].content, "turn 24");
        for pair in t.messages()[1..].windows(2) {
            assert_ne!(pair[0].role, Role::System);
            assert_ne!(pair[1].role, Role::System);
        }
    }

    #[test]
    fn trim_without_system_keeps_most_recent() {
        let mut t = Transcript::new(3);
        for i in 0..5 {
            t.push(Role::User, format!("m{i}"));
        }
        assert_eq!(t.len(), 3);
        assert_eq!(t.messages()[0].content, "m2");
        assert_eq!(t.messages()[2].content, "m4");
    }

    #[test]
    fn set_system_replaces_and_stays_oldest() {
        let mut t = Transcript::new(10);
        t.push(Role::User, "hello");
        t.set_system("first");
        t.set_system("second");

        let system: Vec<_> = t
            .messages()
            .iter()
            .filter(|m| m.role == Role::System)
            .collect();
        assert_eq!(system.len(), 1);
        assert_eq!(t.messages()[0].content, "second");
        assert_eq!(t.messages()[1].content, "hello");
    }

    #[test]
    fn trim_runs_on_every_append() {
        let mut t = Transcript::new(2);
        t.push(Role::User, "a");
        t.push(Role::Assistant, "b");
        t.push(Role::User, "c");
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages()[0].content, "b");
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let msg = TurnMessage {
            role: Role::Assistant,
            content: "hi".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
