//! Enumerations with explicit wire tables
//!
//! The API uses short codes (`"x"`, `"2"`, `"ADMIN_CONSENT"`) rather than
//! variant names. [`wire_enum!`](crate::wire_enum) declares the enum
//! together with its table and derives serde impls that go through it, so
//! query encoding and response decoding share one mapping.

use serde::de::{self, Deserializer, Visitor};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

thread_local! {
    static SKIP_UNKNOWN: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f` with unknown codes on optional enum members read as `None`
///
/// Scoped to the current thread; deserialization inside `f` must not hop
/// threads.
pub(crate) fn skipping_unknown<R>(f: impl FnOnce() -> R) -> R {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            SKIP_UNKNOWN.with(|flag| flag.set(self.0));
        }
    }

    let _restore = Restore(SKIP_UNKNOWN.with(|flag| flag.replace(true)));
    f()
}

pub(crate) fn is_skipping_unknown() -> bool {
    SKIP_UNKNOWN.with(Cell::get)
}

pub(crate) fn unknown_wire_message<E: WireEnum>(value: &str) -> String {
    let expected: Vec<&str> = E::VARIANTS.iter().map(|(_, wire)| *wire).collect();
    format!(
        "unknown {} value '{value}', expected one of: {}",
        E::NAME,
        expected.join(", ")
    )
}

/// An enum with an explicit wire-string table
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    /// Type name used in error messages
    const NAME: &'static str;
    /// Every variant with its wire string
    const VARIANTS: &'static [(Self, &'static str)];

    fn as_wire(self) -> &'static str;

    /// Exact match first, then ASCII case-insensitive
    fn from_wire(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(_, wire)| *wire == value)
            .or_else(|| {
                Self::VARIANTS
                    .iter()
                    .find(|(_, wire)| wire.eq_ignore_ascii_case(value))
            })
            .map(|(variant, _)| *variant)
    }
}

/// Deserializes a [`WireEnum`] from a string or an integer code
pub fn deserialize_wire<'de, D, E>(deserializer: D) -> Result<E, D::Error>
where
    D: Deserializer<'de>,
    E: WireEnum,
{
    struct WireVisitor<E>(PhantomData<E>);

    impl<E: WireEnum> WireVisitor<E> {
        fn lookup<Err: de::Error>(value: &str) -> Result<E, Err> {
            E::from_wire(value).ok_or_else(|| Err::custom(unknown_wire_message::<E>(value)))
        }
    }

    impl<'de, E: WireEnum> Visitor<'de> for WireVisitor<E> {
        type Value = E;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a {} wire value", E::NAME)
        }

        fn visit_str<Err: de::Error>(self, value: &str) -> Result<E, Err> {
            Self::lookup(value)
        }

        fn visit_i64<Err: de::Error>(self, value: i64) -> Result<E, Err> {
            Self::lookup(&value.to_string())
        }

        fn visit_u64<Err: de::Error>(self, value: u64) -> Result<E, Err> {
            Self::lookup(&value.to_string())
        }
    }

    deserializer.deserialize_any(WireVisitor(PhantomData))
}

/// Declares an enum and its wire table
///
/// ```
/// use athena_sdk::models::enums::WireEnum;
///
/// athena_sdk::wire_enum! {
///     /// Traffic light
///     pub enum Light {
///         Red => "R",
///         Green => "G",
///     }
/// }
///
/// assert_eq!(Light::Red.as_wire(), "R");
/// assert_eq!(Light::from_wire("g"), Some(Light::Green));
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::models::enums::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(Self, &'static str)] = &[ $( ($name::$variant, $wire) ),+ ];

            fn as_wire(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::models::enums::WireEnum::as_wire(*self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::models::enums::WireEnum::as_wire(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                $crate::models::enums::deserialize_wire(deserializer)
            }
        }
    };
}

crate::wire_enum! {
    /// Appointment status codes
    pub enum AppointmentStatus {
        Cancelled => "x",
        Future => "f",
        Open => "o",
        CheckedIn => "2",
        CheckedOut => "3",
        ChargeEntered => "4",
    }
}

crate::wire_enum! {
    /// Document task status
    pub enum DocumentStatus {
        Closed => "CLOSED",
        Deleted => "DELETED",
        Internal => "INTERNAL",
        Review => "REVIEW",
        Submit => "SUBMIT",
        Submitted => "SUBMITTED",
        Pend => "PEND",
        Hold => "HOLD",
        Notify => "NOTIFY",
    }
}

crate::wire_enum! {
    /// Administrative document subclasses accepted on upload
    pub enum DocumentSubclass {
        Billing => "ADMIN_BILLING",
        Consent => "ADMIN_CONSENT",
        Hipaa => "ADMIN_HIPAA",
        InsuranceApproval => "ADMIN_INSURANCEAPPROVAL",
        InsuranceCard => "ADMIN_INSURANCECARD",
        InsuranceDenial => "ADMIN_INSURANCEDENIAL",
        Legal => "ADMIN_LEGAL",
        MedicalRecordRequest => "ADMIN_MEDICALRECORDREQ",
        Misc => "ADMIN_MISC",
        PatientInfo => "ADMIN_PATIENTINFO",
        Payment => "ADMIN_PAYMENT",
        Referral => "ADMIN_REFERRAL",
        Results => "ADMIN_RESULTS",
        SignedFormsLetters => "ADMIN_SIGNEDFORMSLETTERS",
        Vaccination => "ADMIN_VACCINATION",
    }
}

crate::wire_enum! {
    /// Prescription document status
    pub enum PrescriptionStatus {
        Closed => "CLOSED",
        Deleted => "DELETED",
        Review => "REVIEW",
        Submit => "SUBMIT",
        Submitted => "SUBMITTED",
        Pend => "PEND",
        Hold => "HOLD",
        Notify => "NOTIFY",
    }
}

crate::wire_enum! {
    pub enum Sex {
        Male => "M",
        Female => "F",
    }
}

crate::wire_enum! {
    /// Insurance policy order
    pub enum InsuranceSequence {
        Primary => "1",
        Secondary => "2",
    }
}

crate::wire_enum! {
    pub enum PatientStatus {
        Active => "active",
        Inactive => "inactive",
        Prospective => "prospective",
        Deleted => "deleted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(AppointmentStatus::CheckedIn.as_wire(), "2");
        assert_eq!(DocumentSubclass::Consent.to_string(), "ADMIN_CONSENT");
        assert_eq!(InsuranceSequence::Secondary.as_wire(), "2");
    }

    #[test]
    fn test_from_wire_case_insensitive() {
        assert_eq!(AppointmentStatus::from_wire("X"), Some(AppointmentStatus::Cancelled));
        assert_eq!(PatientStatus::from_wire("Active"), Some(PatientStatus::Active));
        assert_eq!(Sex::from_wire("U"), None);
    }

    #[test]
    fn test_serde_uses_table() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
        let status: DocumentStatus = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(status, DocumentStatus::Review);
        let sequence: InsuranceSequence = serde_json::from_str("1").unwrap();
        assert_eq!(sequence, InsuranceSequence::Primary);
    }

    #[test]
    fn test_unknown_value_is_error() {
        let err = serde_json::from_str::<AppointmentStatus>("\"z\"").unwrap_err();
        assert!(err.to_string().contains("AppointmentStatus"));
    }

    #[test]
    fn test_skipping_unknown_is_scoped() {
        assert!(!is_skipping_unknown());
        assert!(skipping_unknown(is_skipping_unknown));
        assert!(!is_skipping_unknown());
    }

    #[test]
    fn test_every_variant_round_trips() {
        for (variant, wire) in DocumentSubclass::VARIANTS {
            assert_eq!(DocumentSubclass::from_wire(wire), Some(*variant));
            assert_eq!(variant.as_wire(), *wire);
        }
    }
}
