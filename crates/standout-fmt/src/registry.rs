//! Resolution of runtime values to formatting rules.
//!
//! A [`Registry`] maps a value's runtime type to a [`Rule`] and a diagnostic
//! label. Resolution is total: any type without a registered rule falls back
//! to [`UnknownRule`], so the engine never sees an unresolvable value.
//!
//! # Custom Types
//!
//! ```rust
//! use standout_fmt::rule::render_args;
//! use standout_fmt::Registry;
//! use std::any::Any;
//!
//! struct Vec3 {
//!     x: f32,
//!     y: f32,
//!     z: f32,
//! }
//!
//! let mut registry = Registry::with_defaults();
//! registry.register::<Vec3>("Vec3", |value: &dyn Any, buf: &mut [u8]| {
//!     match value.downcast_ref::<Vec3>() {
//!         Some(v) => render_args(format_args!("{{{}, {}, {}}}", v.x, v.y, v.z), buf),
//!         None => 0,
//!     }
//! });
//!
//! let v = Vec3 { x: 1.0, y: 2.5, z: 3.0 };
//! assert_eq!(registry.resolve(&v).label(), "Vec3");
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rule::{render_args, render_display, Rule, UnknownRule, UNKNOWN_LABEL};

static UNKNOWN_RULE: UnknownRule = UnknownRule;

struct Entry {
    label: Cow<'static, str>,
    rule: Arc<dyn Rule>,
}

/// Maps runtime type tags to formatting rules and labels.
#[derive(Default, Clone)]
pub struct Registry {
    entries: HashMap<TypeId, Arc<Entry>>,
}

impl Registry {
    /// Creates an empty registry; every value resolves to the unknown rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with rules for the built-in scalar types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_display::<i8>("int8");
        registry.register_display::<i16>("int16");
        registry.register_display::<i32>("int");
        registry.register_display::<i64>("int64");
        registry.register_display::<isize>("isize");
        registry.register_display::<u8>("uint8");
        registry.register_display::<u16>("uint16");
        registry.register_display::<u32>("uint");
        registry.register_display::<u64>("uint64");
        registry.register_display::<usize>("usize");
        registry.register_display::<f32>("float");
        registry.register_display::<f64>("double");
        registry.register_display::<bool>("bool");
        registry.register_display::<char>("char");
        registry.register_display::<&'static str>("string");
        registry.register_display::<String>("string");
        registry.register_display::<Box<str>>("string");
        registry.register_display::<Cow<'static, str>>("string");
        registry.register::<*const ()>("pointer", |value: &dyn Any, buf: &mut [u8]| {
            match value.downcast_ref::<*const ()>() {
                Some(p) => render_args(format_args!("{:p}", *p), buf),
                None => 0,
            }
        });
        registry.register::<*mut ()>("pointer", |value: &dyn Any, buf: &mut [u8]| {
            match value.downcast_ref::<*mut ()>() {
                Some(p) => render_args(format_args!("{:p}", *p), buf),
                None => 0,
            }
        });
        registry
    }

    /// Registers `rule` for values of type `T`, replacing any earlier rule.
    pub fn register<T: Any>(
        &mut self,
        label: impl Into<Cow<'static, str>>,
        rule: impl Rule + 'static,
    ) -> &mut Self {
        self.entries.insert(
            TypeId::of::<T>(),
            Arc::new(Entry {
                label: label.into(),
                rule: Arc::new(rule),
            }),
        );
        self
    }

    /// Registers a rule that formats `T` through its [`fmt::Display`] impl.
    pub fn register_display<T: Any + fmt::Display>(
        &mut self,
        label: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.register::<T>(label, |value: &dyn Any, buf: &mut [u8]| {
            match value.downcast_ref::<T>() {
                Some(v) => render_display(v, buf),
                None => 0,
            }
        })
    }

    /// Returns true if a rule is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves `value` to its rule and label.
    ///
    /// Never fails: unregistered types get [`UnknownRule`] and the label
    /// `"unknown"`.
    pub fn resolve<'a>(&'a self, value: &'a dyn Any) -> Resolved<'a> {
        match self.entries.get(&value.type_id()) {
            Some(entry) => Resolved {
                value,
                rule: entry.rule.as_ref(),
                label: entry.label.as_ref(),
            },
            None => Resolved {
                value,
                rule: &UNKNOWN_RULE,
                label: UNKNOWN_LABEL,
            },
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<&str> = self.entries.values().map(|e| e.label.as_ref()).collect();
        labels.sort_unstable();
        f.debug_struct("Registry").field("labels", &labels).finish()
    }
}

/// A value paired with the rule and label it resolved to.
#[derive(Clone, Copy)]
pub struct Resolved<'a> {
    value: &'a dyn Any,
    rule: &'a dyn Rule,
    label: &'a str,
}

impl<'a> Resolved<'a> {
    /// Pairs a value with an explicit rule, bypassing any registry.
    pub fn new(value: &'a dyn Any, rule: &'a dyn Rule, label: &'a str) -> Self {
        Self { value, rule, label }
    }

    /// The diagnostic label for this value's type.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Phase one: the length the value renders to.
    pub fn measure(&self) -> usize {
        self.rule.measure(self.value)
    }

    /// Phase two: renders into `buf`, returning the untruncated length.
    pub fn render(&self, buf: &mut [u8]) -> usize {
        self.rule.render(self.value, buf)
    }
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{render_str, UNKNOWN_TEXT};

    fn rendered(resolved: Resolved<'_>) -> String {
        let mut buf = vec![0u8; resolved.measure() + 1];
        let n = resolved.render(&mut buf);
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_defaults_cover_scalars() {
        let registry = Registry::with_defaults();
        assert!(registry.contains::<i32>());
        assert!(registry.contains::<f64>());
        assert!(registry.contains::<&'static str>());
        assert!(registry.contains::<String>());
        assert!(registry.contains::<*const ()>());
        assert!(!registry.contains::<Vec<u8>>());
    }

    #[test]
    fn test_labels() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.resolve(&3i32).label(), "int");
        assert_eq!(registry.resolve(&"ok").label(), "string");
        assert_eq!(registry.resolve(&String::from("ok")).label(), "string");
        assert_eq!(registry.resolve(&0.5f64).label(), "double");
        assert_eq!(registry.resolve(&7u64).label(), "uint64");
    }

    #[test]
    fn test_render_scalars() {
        let registry = Registry::with_defaults();
        assert_eq!(rendered(registry.resolve(&3i32)), "3");
        assert_eq!(rendered(registry.resolve(&"Hello world")), "Hello world");
        assert_eq!(rendered(registry.resolve(&true)), "true");
        assert_eq!(rendered(registry.resolve(&'x')), "x");
        assert_eq!(rendered(registry.resolve(&2.5f32)), "2.5");
    }

    #[test]
    fn test_render_pointer() {
        let registry = Registry::with_defaults();
        let p = 0xbeefbabe_usize as *const ();
        let resolved = registry.resolve(&p);
        assert_eq!(resolved.label(), "pointer");
        assert_eq!(rendered(resolved), "0xbeefbabe");
    }

    #[test]
    fn test_unregistered_falls_back() {
        struct Foo;
        let registry = Registry::with_defaults();
        let resolved = registry.resolve(&Foo);
        assert_eq!(resolved.label(), UNKNOWN_LABEL);
        assert_eq!(rendered(resolved), UNKNOWN_TEXT);
    }

    #[test]
    fn test_empty_registry_resolves_everything_unknown() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(&1i32).label(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::with_defaults();
        let before = registry.len();
        registry.register::<i32>("i32", |_: &dyn Any, buf: &mut [u8]| render_str("n", buf));
        assert_eq!(registry.len(), before);
        let resolved = registry.resolve(&3i32);
        assert_eq!(resolved.label(), "i32");
        assert_eq!(rendered(resolved), "n");
    }

    #[test]
    fn test_explicit_resolved() {
        let rule = |_: &dyn Any, buf: &mut [u8]| render_str("fixed", buf);
        let resolved = Resolved::new(&(), &rule, "unit");
        assert_eq!(resolved.label(), "unit");
        assert_eq!(rendered(resolved), "fixed");
    }
}
