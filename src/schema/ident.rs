//! Identifier value types
//!
//! Identity and relationship fields hold either strings or integers. On the
//! wire they are always strings; integer fields parse them as base-10.

use crate::error::{DecodeError, Result};

/// A value that can live in an identity or relationship field
pub trait Identifier: Sized + 'static {
    /// String form used to compare identities
    fn render(&self) -> String;

    /// Parse a wire identifier destined for `field`
    fn parse_id(raw: &str, field: &str) -> Result<Self>;
}

impl Identifier for String {
    fn render(&self) -> String {
        self.clone()
    }

    fn parse_id(raw: &str, _field: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

macro_rules! integer_identifier {
    ($($t:ty),*) => {
        $(
            impl Identifier for $t {
                fn render(&self) -> String {
                    self.to_string()
                }

                fn parse_id(raw: &str, field: &str) -> Result<Self> {
                    raw.parse::<$t>().map_err(|source| DecodeError::Conversion {
                        field: field.to_string(),
                        value: raw.to_string(),
                        source,
                    })
                }
            }
        )*
    };
}

integer_identifier!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
