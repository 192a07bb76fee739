//! Localization provider trait.

/// Resolves translation keys.
///
/// An unresolved key is returned unchanged. Callers compare the result with
/// the key to detect a missing translation.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;

    /// `Some(translation)` only when the key resolves to something other than itself.
    fn try_translate(&self, key: &str) -> Option<String> {
        let translation = self.translate(key);
        (translation != key).then_some(translation)
    }
}
