//! Standardized error codes
//!
//! Numeric codes grouped by domain range so callers (and the outbox
//! peers) can classify a failure without parsing messages.

use serde::{Deserialize, Serialize};

/// Classification of errors by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    AccountNumber,
    Place,
    Burial,
    Person,
    Document,
    Organization,
    System,
}

/// Standardized error codes for all validation and system failures
///
/// # Error Code Ranges
///
/// - 1xxx: Account number errors
/// - 2xxx: Place / allocation errors
/// - 3xxx: Burial errors
/// - 4xxx: Person errors
/// - 5xxx: Document errors
/// - 6xxx: Organization errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== Account number (1xxx) ====================
    /// Account number is not exactly 8 digits
    AccountNumberFormat = 1001,
    /// Leading 4 digits are a year later than the current year
    AccountNumberYearInFuture = 1002,
    /// Account number ends in "0000"
    AccountNumberZeroSuffix = 1003,
    /// Account number already used within the cemetery
    AccountNumberTaken = 1004,
    /// Leading year does not match the burial date
    AccountNumberYearMismatch = 1005,
    /// Full burial: account number must equal the place seat number
    AccountNumberSeatMismatch = 1006,
    /// Account number is smaller than the place seat number
    AccountNumberBelowSeat = 1007,

    // ==================== Place (2xxx) ====================
    /// No free rooms at the place
    NoFreeRooms = 2001,
    /// Operation requires the place to carry a seat number
    SeatRequired = 2002,
    /// Full burial into a place that already has occupants
    PlaceNotEmpty = 2003,
    /// Grave slot already holds a blocking occupant
    SlotOccupied = 2004,
    /// Grave slot index outside `[0, rooms)`
    SlotOutOfRange = 2005,
    /// Seat number violates the registry number format
    SeatFormat = 2006,

    // ==================== Burial (3xxx) ====================
    /// Exhumation date not after the burial date
    ExhumationBeforeBurial = 3001,
    /// Sub-burial without a preceding full burial at the place
    NoPrecedingBurial = 3002,
    /// Duplicate burial for the same person within the cemetery
    DuplicateBurial = 3003,

    // ==================== Person (4xxx) ====================
    /// Birth date not before today
    BirthDateInFuture = 4001,
    /// Death date after today
    DeathDateInFuture = 4002,
    /// Birth date after death date
    BirthAfterDeath = 4003,
    /// Birth more than the allowed lifespan before death
    LifespanExceeded = 4004,
    /// Last name required
    NameRequired = 4005,

    // ==================== Document (5xxx) ====================
    /// Customer document issued too long before the burial date
    DocumentTooOld = 5001,
    /// Doverennost missing number, issue date or expiry date
    DoverennostIncomplete = 5002,
    /// Doverennost expired before the burial date
    DoverennostExpired = 5003,
    /// Doverennost issued after the burial date
    DoverennostNotYetValid = 5004,
    /// Doverennost issue date after its expiry date
    IssueAfterExpiry = 5005,
    /// Document date in the future
    DocumentDateInFuture = 5006,
    /// Death certificate released before the death date
    ReleaseBeforeDeath = 5007,
    /// Bank account field must contain digits only
    DigitsOnly = 5008,

    // ==================== Organization (6xxx) ====================
    /// Another organization already carries this INN
    DuplicateInn = 6001,

    // ==================== System (9xxx) ====================
    /// Referenced record not found
    NotFound = 9001,
    /// Internal error
    InternalError = 9002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            1000..=1999 => ErrorCategory::AccountNumber,
            2000..=2999 => ErrorCategory::Place,
            3000..=3999 => ErrorCategory::Burial,
            4000..=4999 => ErrorCategory::Person,
            5000..=5999 => ErrorCategory::Document,
            6000..=6999 => ErrorCategory::Organization,
            _ => ErrorCategory::System,
        }
    }

    /// Default user-facing message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::AccountNumberFormat => "Account number must be exactly 8 digits",
            Self::AccountNumberYearInFuture => "Account number year is later than the current year",
            Self::AccountNumberZeroSuffix => "Last 4 digits of the account number cannot be zeros",
            Self::AccountNumberTaken => "This account number is already used",
            Self::AccountNumberYearMismatch => "Account number does not match the burial date",
            Self::AccountNumberSeatMismatch => {
                "For full burials the account number must equal the seat number"
            }
            Self::AccountNumberBelowSeat => "Account number is smaller than the seat number",
            Self::NoFreeRooms => "No free graves at the given place",
            Self::SeatRequired => "This burial type requires a seat number",
            Self::PlaceNotEmpty => "Place is not empty, operation cannot be a full burial",
            Self::SlotOccupied => "Grave slot is already occupied",
            Self::SlotOutOfRange => "Grave slot index is outside the place capacity",
            Self::SeatFormat => "Seat number must be exactly 8 digits",
            Self::ExhumationBeforeBurial => "Exhumation date must be later than the burial date",
            Self::NoPrecedingBurial => {
                "The place must hold at least one full burial earlier than this sub-burial"
            }
            Self::DuplicateBurial => "Duplicate burials detected",
            Self::BirthDateInFuture => "Birth date must be earlier than today",
            Self::DeathDateInFuture => "Death date must not be later than today",
            Self::BirthAfterDeath => "Birth date is later than the death date",
            Self::LifespanExceeded => "Birth date is too far before the death date",
            Self::NameRequired => "A name must be given",
            Self::DocumentTooOld => "Customer document predates the burial date by too many years",
            Self::DoverennostIncomplete => {
                "Non-archival burials require complete agent doverennost data"
            }
            Self::DoverennostExpired => "Doverennost expires before the burial date",
            Self::DoverennostNotYetValid => "Doverennost issued after the burial date",
            Self::IssueAfterExpiry => "Issue date is later than the expiry date",
            Self::DocumentDateInFuture => "Document date is later than today",
            Self::ReleaseBeforeDeath => "Release date is earlier than the death date",
            Self::DigitsOnly => "Only digits are allowed",
            Self::DuplicateInn => "This INN is already registered",
            Self::NotFound => "Resource not found",
            Self::InternalError => "Internal error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
