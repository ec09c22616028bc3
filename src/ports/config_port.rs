//! Configuration access port trait.

/// Raw string access to sectioned configuration. Typing and validation
/// happen in `domain::settings`, which reports malformed values as errors.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Keys present in `section`, in no particular order. Empty when the
    /// section is absent.
    fn keys(&self, section: &str) -> Vec<String>;
}
