//! Fluent bundle loading from the embedded locale resources.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use socialdash_common::{DashError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};
use unic_langid::LanguageIdentifier;

/// Locales with a bundled translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English (United States), also the fallback locale.
    EnUs,
    /// Indonesian.
    IdId,
}

impl Locale {
    /// All bundled locales.
    pub const ALL: [Self; 2] = [Self::EnUs, Self::IdId];

    /// The locale used when a message or language is missing.
    pub const FALLBACK: Self = Self::EnUs;

    /// BCP 47 code of the locale.
    pub const fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::IdId => "id-ID",
        }
    }

    /// Resolves a language tag, matching on the primary language when the
    /// region differs (`id`, `id-id` and `id-ID` all select Indonesian).
    pub fn resolve(tag: &str) -> Option<Self> {
        let langid: LanguageIdentifier = tag.trim().parse().ok()?;
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(&langid.to_string()))
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|locale| locale.code().starts_with(langid.language.as_str()))
            })
    }

    const fn source(self) -> &'static str {
        match self {
            Self::EnUs => include_str!("../locales/en-US.ftl"),
            Self::IdId => include_str!("../locales/id-ID.ftl"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s).ok_or_else(|| DashError::localization_with_locale("unsupported language", s))
    }
}

/// Bundles for every embedded locale, built on first use.
pub static FLUENT_BUNDLES: Lazy<HashMap<Locale, FluentBundle<FluentResource>>> = Lazy::new(|| {
    Locale::ALL
        .into_iter()
        .filter_map(|locale| match FluentLoader::load_bundle(locale) {
            Ok(bundle) => Some((locale, bundle)),
            Err(e) => {
                error!("Failed to load bundle for {}: {}", locale, e);
                None
            }
        })
        .collect()
});

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Parses the embedded resource of `locale` into a bundle.
    pub fn load_bundle(locale: Locale) -> Result<FluentBundle<FluentResource>> {
        let langid: LanguageIdentifier = locale
            .code()
            .parse()
            .map_err(|_| DashError::localization_with_locale("invalid language identifier", locale.code()))?;

        let resource = FluentResource::try_new(locale.source().to_string()).map_err(|(_, errors)| {
            DashError::localization_with_locale(
                format!("failed to parse resource: {errors:?}"),
                locale.code(),
            )
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            DashError::localization_with_locale(
                format!("failed to add resource: {errors:?}"),
                locale.code(),
            )
        })?;

        debug!("Loaded fluent bundle for {}", locale);
        Ok(bundle)
    }

    /// Gets the bundle of `locale`, if it loaded.
    pub fn bundle(locale: Locale) -> Option<&'static FluentBundle<FluentResource>> {
        FLUENT_BUNDLES.get(&locale)
    }
}
