//! Localizer Port - resolves message keys for a locale.

use crate::domain::foundation::Locale;

/// Port for localized message lookup.
pub trait Localizer: Send + Sync {
    /// Returns the message for `key` in `locale`.
    ///
    /// Implementations decide their own fallback; they never fail.
    fn localize(&self, key: &str, locale: &Locale) -> String;
}
