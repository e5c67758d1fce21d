//! Message lookup with locale fallback.

use crate::loader::{FluentLoader, Locale};
use fluent_bundle::{FluentArgs, FluentValue};
use tracing::warn;

/// Message accessor bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Creates an accessor for `locale`.
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Creates an accessor from a language tag, falling back to English.
    pub fn for_language(tag: &str) -> Self {
        let locale = Locale::resolve(tag).unwrap_or_else(|| {
            warn!("Unsupported language '{}', falling back to {}", tag, Locale::FALLBACK);
            Locale::FALLBACK
        });
        Self::new(locale)
    }

    /// The locale messages are resolved in.
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Gets a localized message.
    pub fn get(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Gets a localized message with arguments.
    pub fn get_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }
        self.format(key, Some(&fluent_args))
    }

    /// Resolution order: the bound locale, the fallback locale, the key itself.
    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let mut candidates = vec![self.locale];
        if self.locale != Locale::FALLBACK {
            candidates.push(Locale::FALLBACK);
        }

        for locale in candidates {
            let Some(bundle) = FluentLoader::bundle(locale) else {
                continue;
            };
            let Some(pattern) = bundle.get_message(key).and_then(|m| m.value()) else {
                continue;
            };

            let mut errors = Vec::new();
            let formatted = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                warn!("Formatting errors for message '{}' in {}: {:?}", key, locale, errors);
            }
            return formatted.into_owned();
        }

        warn!("Missing message '{}' for {}", key, self.locale);
        key.to_string()
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_simple_message() {
        let en = Messages::new(Locale::EnUs);
        assert_eq!(en.get("label-age-group"), "Age Group");

        let id = Messages::new(Locale::IdId);
        assert_eq!(id.get("label-age-group"), "Kelompok Usia");
        assert_eq!(id.get("level-very-active"), "Sangat Aktif");
    }

    #[test]
    fn test_get_with_args() {
        let id = Messages::for_language("id-ID");
        assert_eq!(
            id.get_with_args("page-tab", &[("number", FluentValue::from(7))]),
            "Pertanyaan 7"
        );
    }

    #[test]
    fn test_missing_key_returns_key() {
        let en = Messages::default();
        assert_eq!(en.get("does-not-exist"), "does-not-exist");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let messages = Messages::for_language("xx-YY");
        assert_eq!(messages.locale(), Locale::EnUs);
        assert_eq!(messages.get("label-count"), "Count");
    }
}
