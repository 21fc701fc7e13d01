//! Domain models
//!
//! Rows are addressed by `i64` id; cross references (reservation → table,
//! order → reservation, kitchen order → order) are plain ids resolved
//! through the repositories.

pub mod customer;
pub mod dining_table;
pub mod kitchen_order;
pub mod menu_item;
pub mod order;
pub mod reservation;

pub use customer::*;
pub use dining_table::*;
pub use kitchen_order::*;
pub use menu_item::*;
pub use order::*;
pub use reservation::*;

/// Implements `Display`/`FromStr`/`as_str` for a snake_case status enum
macro_rules! status_strings {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Stored / wire representation
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($ty))),
                }
            }
        }
    };
}

pub(crate) use status_strings;
