//! Closed option sets offered by the questionnaire.
//!
//! Each set is an ordered enum whose wire representation is the exact German
//! label shown to the user. Labels are matched byte-for-byte: no trimming and
//! no case folding.

use serde::{Serialize, Serializer};
use std::fmt;

/// Common behavior of every closed option set.
pub trait OptionSet: Sized + Copy + 'static {
    /// All members, in display order.
    const ALL: &'static [Self];

    /// The wire label of this member.
    fn label(&self) -> &'static str;

    /// Look up a member by its exact wire label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.label() == label)
    }

    /// All labels joined as `'A' | 'B' | 'C'`.
    fn expected_labels() -> String {
        Self::ALL
            .iter()
            .map(|option| format!("'{}'", option.label()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Message for a string that is not a member of `T`.
pub fn invalid_option_message<T: OptionSet>(received: &str) -> String {
    format!(
        "Invalid enum value. Expected {}, received '{}'",
        T::expected_labels(),
        received
    )
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl OptionSet for $name {
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.label())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

option_set! {
    /// Type of building the system would be installed on.
    PropertyType {
        SingleFamily => "Einfamilienhaus",
        MultiFamily => "Mehrfamilienhaus",
        Commercial => "Gewerbeimmobilie",
    }
}

option_set! {
    /// Roof orientation; the only multi-select question.
    Orientation {
        South => "Süd",
        West => "West",
        East => "Ost",
        North => "Nord",
        /// Must be the only selected orientation when chosen.
        NoAnswer => "Keine Angabe",
    }
}

option_set! {
    /// Age of the roof.
    RoofAge {
        UnderFiveYears => "Unter 5 Jahre",
        FiveToFifteenYears => "5–15 Jahre",
        OverFifteenYears => "Über 15 Jahre",
        NoAnswer => "Keine Angabe",
    }
}

option_set! {
    /// Yearly electricity consumption of the household or business.
    AnnualConsumption {
        Under3000Kwh => "Unter 3.000 kWh",
        From3000To5000Kwh => "3.000–5.000 kWh",
        Over5000Kwh => "Über 5.000 kWh",
        NoAnswer => "Keine Angabe",
    }
}

option_set! {
    /// Interest in storage, heat pumps and similar add-ons.
    OtherSolutions {
        Yes => "Ja",
        No => "Nein",
        DontKnow => "Weis nicht",
    }
}

impl Orientation {
    /// Whether this is the "no answer" sentinel.
    pub fn is_no_answer(self) -> bool {
        self == Orientation::NoAnswer
    }
}
