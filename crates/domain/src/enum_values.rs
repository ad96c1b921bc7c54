//! Backed enum value listing

/// A fieldless enum whose variants each carry a backing value.
///
/// Implementors list their variants once in [`EnumValues::cases`]; [`EnumValues::values`]
/// then yields the backing values in declaration order.
///
/// ```
/// use utilkit_domain::EnumValues;
///
/// #[derive(Clone, Copy)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl EnumValues for Color {
///     type Value = &'static str;
///
///     fn cases() -> &'static [Self] {
///         &[Color::Red, Color::Green]
///     }
///
///     fn value(&self) -> &'static str {
///         match self {
///             Color::Red => "red",
///             Color::Green => "green",
///         }
///     }
/// }
///
/// assert_eq!(Color::values(), vec!["red", "green"]);
/// ```
pub trait EnumValues: Sized + 'static {
    type Value;

    /// Every variant, in declaration order
    fn cases() -> &'static [Self];

    /// Backing value of this variant
    fn value(&self) -> Self::Value;

    /// Backing values of all variants, in declaration order
    fn values() -> Vec<Self::Value> {
        Self::cases().iter().map(Self::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Priority {
        Low,
        Normal,
        High,
    }

    impl EnumValues for Priority {
        type Value = i64;

        fn cases() -> &'static [Self] {
            &[Priority::Low, Priority::Normal, Priority::High]
        }

        fn value(&self) -> i64 {
            match self {
                Priority::Low => 1,
                Priority::Normal => 5,
                Priority::High => 10,
            }
        }
    }

    #[test]
    fn test_values_in_declaration_order() {
        assert_eq!(Priority::values(), vec![1, 5, 10]);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(Priority::High.value(), 10);
        assert_eq!(Priority::cases().len(), 3);
    }
}
