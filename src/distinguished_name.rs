//! Distinguished name parsing and construction.
//!
//! A distinguished name (DN) is the structured identity string carried in a
//! certificate's subject and issuer fields, e.g.
//! `CN=My Root CA, O=Skyline Communications, OU=Phoenix, C=BE`. Different
//! certificate libraries render DNs with either `,` or `;` between entries;
//! [`DistinguishedName`] accepts both and extracts the typed attributes
//! (CN, O, OU, C, L, ST, STREET) on demand.
//!
//! # Equality
//!
//! Two names are equal iff their raw strings are identical. This is a
//! deliberate policy: issuer resolution matches certificates whose encoded
//! fields came from the same signing material, where the rendered strings are
//! identical. Reordered or re-spaced entries are NOT `==`; use
//! [`DistinguishedName::semantically_eq`] to compare parsed attribute sets
//! instead.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

/// An immutable distinguished name.
///
/// Holds the raw string verbatim and derives the attribute lookup lazily on
/// first field access. Parsing never fails: entries without a `=` are
/// ignored, and a value may itself contain `=` (only the first one splits
/// key from value).
#[derive(Debug, Clone)]
pub struct DistinguishedName {
    value: String,
    lookup: OnceCell<HashMap<String, String>>,
}

impl DistinguishedName {
    /// Wrap a raw distinguished name string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lookup: OnceCell::new(),
        }
    }

    /// The raw string this name was constructed from, unchanged.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The CommonName (CN) of the distinguished name.
    pub fn common_name(&self) -> &str {
        self.field("CN")
    }

    /// The OrganizationName (O) of the distinguished name.
    pub fn organization_name(&self) -> &str {
        self.field("O")
    }

    /// The OrganizationalUnitName (OU) of the distinguished name.
    pub fn organizational_unit_name(&self) -> &str {
        self.field("OU")
    }

    /// The CountryName (C) of the distinguished name.
    pub fn country_name(&self) -> &str {
        self.field("C")
    }

    /// The LocalityName (L) of the distinguished name.
    pub fn locality_name(&self) -> &str {
        self.field("L")
    }

    /// The StateOrProvinceName (ST) of the distinguished name.
    pub fn state_or_province_name(&self) -> &str {
        self.field("ST")
    }

    /// The StreetAddress (STREET) of the distinguished name.
    pub fn street_address(&self) -> &str {
        self.field("STREET")
    }

    /// Compare parsed attribute sets instead of raw strings.
    ///
    /// True when both names carry exactly the same key/value pairs,
    /// regardless of entry order, separator choice or surrounding
    /// whitespace. `==` stays raw-string identity.
    pub fn semantically_eq(&self, other: &DistinguishedName) -> bool {
        self.lookup() == other.lookup()
    }

    /// Attribute value for `key`, or the empty string if absent.
    ///
    /// Absence is a normal state for a DN, not an error.
    fn field(&self, key: &str) -> &str {
        self.lookup().get(key).map(String::as_str).unwrap_or_default()
    }

    // Derived once per instance. Entries split on ',' or ';', keys and values
    // trimmed, duplicate keys last-writer-wins.
    fn lookup(&self) -> &HashMap<String, String> {
        self.lookup.get_or_init(|| {
            let mut fields = HashMap::new();
            for entry in self.value.split([',', ';']) {
                let Some((key, value)) = entry.trim().split_once('=') else {
                    continue;
                };
                fields.insert(key.trim().to_string(), value.trim().to_string());
            }
            fields
        })
    }
}

impl PartialEq for DistinguishedName {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for DistinguishedName {}

impl Hash for DistinguishedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Builder assembling a canonical distinguished name from named fields.
///
/// Fields left unset (or blank) are omitted. The assembled string uses the
/// fixed order CN, L, ST, O, OU, C, STREET with `", "` between entries, so
/// two names built from the same fields always render identically.
///
/// # Examples
/// ```
/// use certkit::DistinguishedNameBuilder;
/// # use certkit::Result;
/// # fn example() -> Result<()> {
/// let dn = DistinguishedNameBuilder::new()
///     .common_name("My Root CA".to_string())
///     .organization_name("Skyline Communications".to_string())
///     .organizational_unit_name("Phoenix".to_string())
///     .country_name("BE".to_string())
///     .build()?;
///
/// assert_eq!(dn.value(), "CN=My Root CA, O=Skyline Communications, OU=Phoenix, C=BE");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DistinguishedNameBuilder {
    common_name: String,
    organization_name: String,
    organizational_unit_name: String,
    country_name: String,
    locality_name: String,
    state_or_province_name: String,
    street_address: String,
}

impl DistinguishedNameBuilder {
    /// Create a builder with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the common name (CN).
    pub fn common_name(mut self, cn: String) -> Self {
        self.common_name = cn;
        self
    }

    /// Set the organization (O).
    pub fn organization_name(mut self, organization: String) -> Self {
        self.organization_name = organization;
        self
    }

    /// Set the organizational unit (OU).
    pub fn organizational_unit_name(mut self, unit: String) -> Self {
        self.organizational_unit_name = unit;
        self
    }

    /// Set the country (C), typically a two-letter ISO code.
    pub fn country_name(mut self, country: String) -> Self {
        self.country_name = country;
        self
    }

    /// Set the locality (L).
    pub fn locality_name(mut self, locality: String) -> Self {
        self.locality_name = locality;
        self
    }

    /// Set the state or province (ST).
    pub fn state_or_province_name(mut self, state: String) -> Self {
        self.state_or_province_name = state;
        self
    }

    /// Set the street address (STREET).
    pub fn street_address(mut self, street: String) -> Self {
        self.street_address = street;
        self
    }

    /// Assemble the distinguished name.
    ///
    /// # Errors
    /// Returns [`Error::EmptyDistinguishedName`] if every field is blank.
    pub fn build(self) -> Result<DistinguishedName> {
        let fields = [
            ("CN", &self.common_name),
            ("L", &self.locality_name),
            ("ST", &self.state_or_province_name),
            ("O", &self.organization_name),
            ("OU", &self.organizational_unit_name),
            ("C", &self.country_name),
            ("STREET", &self.street_address),
        ];

        let mut parts = Vec::new();
        for (key, value) in fields {
            if !value.trim().is_empty() {
                parts.push(format!("{}={}", key, value));
            }
        }

        if parts.is_empty() {
            return Err(Error::EmptyDistinguishedName);
        }

        Ok(DistinguishedName::new(parts.join(", ")))
    }
}
