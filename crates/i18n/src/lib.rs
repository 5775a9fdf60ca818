//! Message catalog for user-facing text.
//!
//! Keys resolve against the requested locale, fall back to English, and
//! finally to the key itself so a missing translation never panics.
//! Templates substitute `{param}` placeholders.

#![warn(missing_docs)]

mod en;
mod es;

pub use stride_core::Locale;

/// Resolve a message key for a locale and substitute parameters.
pub fn translate(locale: Locale, key: &str, params: &[(&str, String)]) -> String {
    let template = lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .unwrap_or(key);

    let mut message = template.to_string();
    for (name, value) in params {
        message = message.replace(&format!("{{{name}}}"), value);
    }
    message
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::En => en::message(key),
        Locale::Es => es::message(key),
    }
}
