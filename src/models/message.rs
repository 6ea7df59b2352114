use crate::utils::time::Ticks;

/// One SMS, or one logical multi-recipient send.
///
/// Equality is exact field-wise equality; the WinPhone reader relies on it to
/// drop duplicate entries produced by overlapping backups. Ordering between
/// messages is by timestamp only and is chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Absolute time of the message, in 100ns ticks since 1601.
    pub timestamp: Ticks,
    /// `true` = received, `false` = sent.
    pub is_incoming: bool,
    /// Read flag; sources that omit it default to read.
    pub is_read: bool,
    /// Body text, `\r` stripped, `\n` preserved.
    pub text: String,
    /// Phone numbers: exactly one (the sender) when incoming, one or more
    /// when outgoing (group send).
    pub recipients: Vec<String>,
}

/// Strip carriage returns from a raw body, keeping line feeds.
pub fn normalize_text(raw: &str) -> String {
    raw.replace('\r', "")
}

/// Total message count as the Android format counts it: an outgoing message
/// with N recipients contributes N.
pub fn recipient_count(messages: &[Message]) -> usize {
    messages.iter().map(|m| m.recipients.len()).sum()
}
