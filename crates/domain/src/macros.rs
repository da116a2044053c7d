//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Several API values are closed sets of snake_case names (webhook event
//! types, estate kinds). This macro provides a single implementation for
//! `as_str`, `Display` and `FromStr` so the string form lives in one place.
//!
//! # Example
//!
//! ```rust
//! use whise_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Color {
//!     Red,
//!     DarkBlue,
//! }
//!
//! impl_wire_name_conversions!(Color {
//!     Red => "red",
//!     DarkBlue => "dark_blue",
//! });
//!
//! assert_eq!(Color::DarkBlue.as_str(), "dark_blue");
//! assert_eq!("RED".parse::<Color>().unwrap(), Color::Red);
//! ```

/// Implements `as_str`, `ALL`, Display and FromStr for wire-name enums
///
/// This macro generates:
/// - `as_str()`: the exact wire name
/// - `ALL`: every variant in declaration order
/// - Display trait: writes the wire name
/// - FromStr trait: parses case-insensitive names to enum variants
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Wire name of the variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
