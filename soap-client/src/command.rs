//! Command descriptors
//!
//! A [`Command`] is everything the composer needs to write one action
//! invocation: the service, the action name, an optional primary field and an
//! optional literal-wrapped extra payload. It borrows all of its text, so a
//! descriptor built on the stack never allocates.

use crate::service::Service;

/// Primary field of an action, written as `<name>value value_suffix</name>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Second value part, concatenated directly after `value`
    pub value_suffix: &'a str,
}

/// Extra payload written verbatim after the field: `prefix value suffix`
///
/// `value` may be empty; the payload is still written. Leaving the payload
/// out entirely is expressed by `Command::extra` being `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extra<'a> {
    pub prefix: &'a str,
    pub value: &'a str,
    pub suffix: &'a str,
}

/// Immutable description of one action invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    pub service: Service,
    pub action: &'a str,
    pub field: Option<Field<'a>>,
    pub extra: Option<Extra<'a>>,
}

impl<'a> Command<'a> {
    /// Create a command with no field and no extra payload
    pub fn new(service: Service, action: &'a str) -> Self {
        Self {
            service,
            action,
            field: None,
            extra: None,
        }
    }

    /// Attach a single-part primary field
    pub fn with_field(self, name: &'a str, value: &'a str) -> Self {
        self.with_split_field(name, value, "")
    }

    /// Attach a primary field whose value is written as two parts
    ///
    /// Used for URIs, where the scheme and the address come from different
    /// places and are never joined in memory.
    pub fn with_split_field(mut self, name: &'a str, value: &'a str, value_suffix: &'a str) -> Self {
        // An unnamed field has no tags to write
        self.field = if name.is_empty() {
            None
        } else {
            Some(Field {
                name,
                value,
                value_suffix,
            })
        };
        self
    }

    /// Attach an extra payload after the primary field
    pub fn with_extra(mut self, prefix: &'a str, value: &'a str, suffix: &'a str) -> Self {
        self.extra = Some(Extra {
            prefix,
            value,
            suffix,
        });
        self
    }
}
