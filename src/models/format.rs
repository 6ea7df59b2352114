use std::fmt;

/// The supported archive formats.
///
/// The detector selects one of these once per conversion and it is threaded
/// explicitly through the reader/writer dispatch; there is no process-wide
/// format state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// "contacts+message backup" XML (Windows Phone), root `ArrayOfMessage`.
    WinPhone,
    /// "SMS Backup & Restore" XML (Android), root `smses`.
    Android,
    /// Desktop phone-suite CSV export (read-only legacy source).
    SuiteCsv,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::WinPhone => "contacts+message backup (XML)",
            FormatKind::Android => "SMS Backup & Restore (XML)",
            FormatKind::SuiteCsv => "phone-suite export (CSV)",
        };
        f.write_str(name)
    }
}
