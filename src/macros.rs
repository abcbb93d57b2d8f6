//! Macros for ergonomic state declaration.

/// Declare a two-valued enum implementing [`State`](crate::core::State) and
/// [`Toggle`](crate::core::Toggle).
///
/// The grammar accepts exactly two variants, so a third value cannot be
/// declared by accident.
///
/// # Example
///
/// ```
/// use light_cycle::core::{State, Toggle};
/// use light_cycle::two_state_enum;
///
/// two_state_enum! {
///     pub enum Door {
///         Open,
///         Shut,
///     }
/// }
///
/// assert_eq!(Door::Open.toggled(), Door::Shut);
/// assert_eq!(Door::Shut.name(), "Shut");
/// ```
#[macro_export]
macro_rules! two_state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident,
            $(#[$second_meta:meta])*
            $second:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $(#[$second_meta])*
            $second,
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    Self::$second => stringify!($second),
                }
            }
        }

        impl $crate::core::Toggle for $name {
            fn toggled(&self) -> Self {
                match self {
                    Self::$first => Self::$second,
                    Self::$second => Self::$first,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
