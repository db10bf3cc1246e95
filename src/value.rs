use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

/// What a [`Resolver`] knows about a property name for one record.
///
/// `Absent` and `Unknown` are deliberately distinct: an absent value is a
/// normal, empty property and propagates as null, while an unknown name is a
/// formula that does not fit the host's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The property has a numeric value
    Value(Decimal),
    /// The property exists but has no value on this record
    Absent,
    /// No property by that name
    Unknown,
}

impl From<Option<Decimal>> for Resolved {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(v) => Resolved::Value(v),
            None => Resolved::Absent,
        }
    }
}

/// Host-supplied lookup of property values, used for the duration of one evaluation.
///
/// Implementations must be side-effect free.
///
/// # Examples
///
/// ```
/// use formula_lang::{Resolved, Resolver};
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let mut record: HashMap<String, Option<Decimal>> = HashMap::new();
/// record.insert("size".to_string(), Some(Decimal::from(3)));
/// record.insert("owner".to_string(), None);
///
/// assert_eq!(record.resolve("size"), Resolved::Value(Decimal::from(3)));
/// assert_eq!(record.resolve("owner"), Resolved::Absent);
/// assert_eq!(record.resolve("status"), Resolved::Unknown);
/// ```
pub trait Resolver {
    fn resolve(&self, name: &str) -> Resolved;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Resolved,
{
    fn resolve(&self, name: &str) -> Resolved {
        self(name)
    }
}

impl Resolver for HashMap<String, Option<Decimal>> {
    fn resolve(&self, name: &str) -> Resolved {
        self.get(name).copied().map_or(Resolved::Unknown, Resolved::from)
    }
}

impl Resolver for BTreeMap<String, Option<Decimal>> {
    fn resolve(&self, name: &str) -> Resolved {
        self.get(name).copied().map_or(Resolved::Unknown, Resolved::from)
    }
}
