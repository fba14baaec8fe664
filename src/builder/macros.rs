//! Macros for declaring states.

/// Declare a unit-variant enum whose variants form an ordered flow.
///
/// Moving to a later variant is `Forward`, to an earlier one `Back`, and
/// staying put is `Idle`. Variants listed under `idle:` sit outside the flow
/// (help screens, error pages); any transition into or out of them is `Idle`.
///
/// # Example
///
/// ```
/// use waypoint::core::{Direction, State};
/// use waypoint::ordered_states;
///
/// ordered_states! {
///     pub enum Checkout {
///         Cart,
///         Shipping,
///         Payment,
///         Help,
///     }
///     idle: [Help]
/// }
///
/// assert_eq!(Checkout::Payment.determine_direction(&Checkout::Cart), Direction::Forward);
/// assert_eq!(Checkout::Cart.determine_direction(&Checkout::Shipping), Direction::Back);
/// assert_eq!(Checkout::Help.determine_direction(&Checkout::Cart), Direction::Idle);
/// ```
#[macro_export]
macro_rules! ordered_states {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(idle: [$($idle:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Whether this state sits outside the ordered flow.
            #[allow(unreachable_patterns)]
            pub fn is_unordered(&self) -> bool {
                match self {
                    $($(Self::$idle => true,)*)?
                    _ => false,
                }
            }
        }

        impl $crate::core::State for $name {
            fn determine_direction(&self, previous: &Self) -> $crate::core::Direction {
                if self.is_unordered() || previous.is_unordered() {
                    return $crate::core::Direction::Idle;
                }
                $crate::core::Direction::between(self, previous)
            }
        }
    };
}
