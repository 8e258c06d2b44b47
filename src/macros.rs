// Copyright 2026 The raxdns Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Useful macros for definiting protocol structures.

/// A macro for defining serializable and deserializable protocol enums with string values.
///
/// `Clone`, `Copy`, `Debug`, `Serialize`/`Deserialize` and equality traits are
/// automatically derived.
///
/// ```rust
/// raxdns::protocol_enum! {
///     #[doc = "Zone file formats."]
///     enum ZoneFormat {
///         Bind9 = "BIND_9"
///     }
/// }
/// ```
///
/// This variant produces a failure when an unknown value is deserialized. If you expect
/// the underlying enumeration to be extended in the future, provide a default value:
///
/// ```rust
/// raxdns::protocol_enum! {
///     #[doc = "Record types."]
///     #[non_exhaustive]
///     enum Kind = Unknown {
///         A = "A",
///         Cname = "CNAME",
///         Unknown = "UNKNOWN"
///     }
/// }
/// ```
#[macro_export]
macro_rules! protocol_enum {
    {$(#[$attr:meta])* enum $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:expr),+
    }} => (
        $crate::protocol_enum! {
            $(#[$attr])*
            __private $name {
                $($(#[$iattr])* $item = $val),+
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                    where D: ::serde::de::Deserializer<'de> {
                match <String as ::serde::de::Deserialize>::deserialize(deserializer)?.as_ref() {
                    $($val => Ok($name::$item)),+,
                    other => {
                        use ::serde::de::Error;
                        let err = format!("Unexpected {}: {}",
                                          stringify!($name), other);
                        Err(D::Error::custom(err))
                    }
                }
            }
        }
    );

    {$(#[$attr:meta])* enum $name:ident = $default:ident {
        $($(#[$iattr:meta])* $item:ident = $val:expr),+
    }} => (
        $crate::protocol_enum! {
            $(#[$attr])*
            __private $name {
                $($(#[$iattr])* $item = $val),+
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::$default
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                    where D: ::serde::de::Deserializer<'de> {
                Ok(match <String as ::serde::de::Deserialize>::deserialize(deserializer)?.as_ref() {
                    $($val => $name::$item),+,
                    _ => Default::default()
                })
            }
        }
    );

    {$(#[$attr:meta])* __private $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:expr),+
    }} => (
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$iattr])* $item),+,
        }

        impl $name {
            /// The underlying protocol value.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $($name::$item => $val),+,
                }
            }
        }

        impl From<$name> for String {
            /// Converts the enum to the protocol value.
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl ::std::fmt::Display for $name {
            /// Displays the underlying protocol value.
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                    where S: ::serde::ser::Serializer {
                serializer.serialize_str(self.as_str())
            }
        }
    );
}
