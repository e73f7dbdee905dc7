//! Module dedicated to recipient addresses.
//!
//! This core concept of this module is the [Address] structure, which
//! represents the address given to the `TO` search key as well as the
//! recipients of stored envelopes.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use email_address::EmailAddress;

use crate::{Error, Result};

/// The recipient address.
///
/// An address is composed of an optional name and an email address.
#[derive(Clone, Debug, Default, Eq)]
pub struct Address {
    pub name: Option<String>,
    pub addr: String,
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.to_ascii_lowercase().hash(state);
    }
}

/// Two addresses are considered equal when their email addresses are
/// equal, ignoring ASCII case.
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.addr.eq_ignore_ascii_case(&other.addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.addr),
            None => write!(f, "{}", self.addr),
        }
    }
}

impl Address {
    /// Builds a new address from an optional name and an email
    /// address.
    pub fn new(name: Option<impl ToString>, address: impl ToString) -> Self {
        Self {
            name: name.map(|name| name.to_string()),
            addr: address.to_string(),
        }
    }

    /// Builds a new address from an email address only.
    pub fn new_nameless(address: impl ToString) -> Self {
        Self::new(Option::<String>::None, address)
    }

    /// Parses an address from either `addr@domain` or
    /// `Name <addr@domain>`.
    ///
    /// The email part is validated with [`EmailAddress`].
    pub fn parse(input: impl AsRef<str>) -> Result<Self> {
        let input = input.as_ref().trim();

        let (name, addr) = match (input.find('<'), input.rfind('>')) {
            (Some(lt), Some(gt)) if lt < gt => {
                let name = input[..lt].trim().trim_matches('"').trim();
                let name = (!name.is_empty()).then(|| name.to_owned());
                (name, &input[lt + 1..gt])
            }
            _ => (None, input),
        };

        let email = EmailAddress::from_str(addr.trim())
            .map_err(|err| Error::ParseAddressError(err, input.to_owned()))?;

        Ok(Self {
            name,
            addr: format!("{}@{}", email.local_part(), email.domain()),
        })
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
