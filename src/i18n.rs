use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::locale::Locale;

/// Message bundles compiled into the binary, one per supported locale.
const BUNDLED: &[(Locale, &str)] = &[
    (Locale::En, include_str!("../messages/en.json")),
    (Locale::Ko, include_str!("../messages/ko.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("message bundle for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("no message bundle for '{0}'")]
    MissingLocale(Locale),
    #[error("message key '{key}' is missing from the '{locale}' bundle")]
    MissingKey { locale: Locale, key: String },
}

/// MessageCatalog
///
/// Static mapping from locale to its flattened message bundle, parsed once at
/// startup. Every locale must define exactly the same keys, so an incomplete
/// translation fails the boot instead of a request.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    bundles: HashMap<Locale, BTreeMap<String, String>>,
}

impl MessageCatalog {
    /// Loads the bundles shipped with the binary.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_sources(BUNDLED)
    }

    pub fn from_sources(sources: &[(Locale, &str)]) -> Result<Self, CatalogError> {
        let mut bundles = HashMap::new();
        for &(locale, raw) in sources {
            let value: Value = serde_json::from_str(raw)
                .map_err(|source| CatalogError::Parse { locale, source })?;
            let mut flat = BTreeMap::new();
            flatten("", &value, &mut flat);
            bundles.insert(locale, flat);
        }

        for locale in Locale::ALL {
            if !bundles.contains_key(&locale) {
                return Err(CatalogError::MissingLocale(locale));
            }
        }

        // Each bundle must cover every key any other bundle defines.
        for locale in Locale::ALL {
            for other in Locale::ALL {
                if let Some(key) = bundles[&other]
                    .keys()
                    .find(|key| !bundles[&locale].contains_key(*key))
                {
                    return Err(CatalogError::MissingKey {
                        locale,
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(Self { bundles })
    }

    /// Looks up a dotted key such as `contact.success`. An unknown key
    /// renders as the key itself.
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.bundles
            .get(&locale)
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.bundles.get(&Locale::DEFAULT).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
