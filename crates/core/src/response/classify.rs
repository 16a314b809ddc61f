//! Classification of status words into ISO/IEC 7816-4 categories
//!
//! [`Status::identify`] is total: every status word maps to exactly one
//! category. Values that are defined neither by ISO/IEC 7816-4 nor as a
//! proprietary range come out as [`Status::Invalid`].

use std::fmt;

use super::error::StatusError;
use super::status::StatusWord;

/// Broad category of a status word, without the details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StatusCategory {
    /// Not a valid status word
    Invalid,
    /// Normal processing (90 00, 61 XX)
    Normal,
    /// Warning processing (62 XX, 63 XX)
    Warning,
    /// Execution error (64 XX to 66 XX)
    #[display("Execution error")]
    ExecError,
    /// Checking error (67 XX to 6F XX)
    #[display("Checking error")]
    CheckError,
    /// Proprietary status (9X XX and undefined checking ranges)
    Proprietary,
}

/// A classified status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Normal processing
    Normal(NormalStatus),
    /// Warning processing
    Warning(WarningStatus),
    /// Execution error
    ExecError(ExecErrorStatus),
    /// Checking error
    CheckError(CheckErrorStatus),
    /// Proprietary status, meaning is defined by the application
    Proprietary(StatusWord),
    /// Invalid status word
    Invalid(StatusWord),
}

/// Normal processing details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalStatus {
    /// Raw status word
    pub raw: StatusWord,
    /// Condition reported
    pub condition: NormalCondition,
}

/// Normal processing conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalCondition {
    /// 90 00
    NoFurtherQualification,
    /// 61 XX, XX bytes of response data are still available
    RemainingData(u8),
}

/// Warning processing details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WarningStatus {
    /// Raw status word
    pub raw: StatusWord,
    /// Whether the card changed its non-volatile memory (63 XX)
    pub non_volatile_memory_changed: bool,
    /// Condition reported
    pub condition: WarningCondition,
}

/// Warning conditions for 62 XX and 63 XX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCondition {
    /// 62 00, 63 00
    NoInformationGiven,
    /// 62 02 to 62 80, triggering by the card with this many query bytes
    WaitingQueryBytes(u8),
    /// 62 81
    PossiblyCorruptedData,
    /// 62 82
    EndOfFileBeforeLe,
    /// 62 83
    FileDeactivated,
    /// 62 84
    FileControlInformationMalformed,
    /// 62 85
    FileInTerminationState,
    /// 62 86
    NoInputDataFromSensor,
    /// 63 01
    FileFilledByLastWrite,
    /// 63 CX, counter value X
    Counter(u8),
}

/// Execution error details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecErrorStatus {
    /// Raw status word
    pub raw: StatusWord,
    /// Whether the card changed its non-volatile memory; unknown for 66 XX
    pub non_volatile_memory_changed: Option<bool>,
    /// Condition reported
    pub condition: ExecErrorCondition,
}

/// Execution error conditions for 64 XX to 66 XX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecErrorCondition {
    /// 64 00
    ExecutionError,
    /// 64 01
    ImmediateResponseRequired,
    /// 64 02 to 64 80, triggering by the card with this many query bytes
    WaitingQueryBytes(u8),
    /// 65 00
    NoInformationGiven,
    /// 65 81
    MemoryFailure,
    /// 66 XX, security related issue with SW2 as extra data
    SecurityIssue(u8),
}

/// Checking error details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckErrorStatus {
    /// Raw status word
    pub raw: StatusWord,
    /// Condition reported
    pub condition: CheckCondition,
}

/// Checking error conditions for 67 XX to 6F XX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckCondition {
    /// 67 00
    WrongLength,
    /// 68 00
    ClassFunctionsNotSupported,
    /// 68 81
    LogicalChannelNotSupported,
    /// 68 82
    SecureMessagingNotSupported,
    /// 68 83
    LastCommandOfChainExpected,
    /// 68 84
    CommandChainingNotSupported,
    /// 69 00
    CommandNotAllowed,
    /// 69 81
    IncompatibleWithFileStructure,
    /// 69 82
    SecurityStatusNotSatisfied,
    /// 69 83
    AuthenticationMethodBlocked,
    /// 69 84
    ReferenceDataNotUsable,
    /// 69 85
    ConditionsOfUseNotSatisfied,
    /// 69 86
    NoCurrentElementaryFile,
    /// 69 87
    SecureMessagingObjectsMissing,
    /// 69 88
    IncorrectSecureMessagingObjects,
    /// 6A 00
    WrongParameters,
    /// 6A 80
    IncorrectDataParameters,
    /// 6A 81
    FunctionNotSupported,
    /// 6A 82
    FileOrApplicationNotFound,
    /// 6A 83
    RecordNotFound,
    /// 6A 84
    NotEnoughMemory,
    /// 6A 85
    NcInconsistentWithTlv,
    /// 6A 86
    IncorrectP1P2,
    /// 6A 87
    NcInconsistentWithP1P2,
    /// 6A 88
    ReferencedDataNotFound,
    /// 6A 89
    FileAlreadyExists,
    /// 6A 8A
    DfNameAlreadyExists,
    /// 6B 00
    WrongParametersP1P2,
    /// 6C XX, SW2 is the number of available data bytes
    WrongLeField(u8),
    /// 6D 00
    InstructionNotSupported,
    /// 6E 00
    ClassNotSupported,
    /// 6F 00
    NoPreciseDiagnosis,
}

impl Status {
    /// Classify a status word
    pub const fn identify(raw: StatusWord) -> Self {
        let nibble = raw.sw1 & 0xF0;
        if (nibble != 0x60 && nibble != 0x90) || raw.sw1 == 0x60 {
            return Self::Invalid(raw);
        }

        match (raw.sw1, raw.sw2) {
            (0x90, 0x00) => Self::Normal(NormalStatus {
                raw,
                condition: NormalCondition::NoFurtherQualification,
            }),
            (0x67 | 0x6B | 0x6D | 0x6E | 0x6F, 0x00) => identify_check_error(raw),
            (0x67 | 0x6B | 0x6D | 0x6E | 0x6F, _) => Self::Proprietary(raw),
            (sw1, _) if sw1 & 0xF0 == 0x90 => Self::Proprietary(raw),
            (0x61, remaining) => Self::Normal(NormalStatus {
                raw,
                condition: NormalCondition::RemainingData(remaining),
            }),
            (0x62 | 0x63, _) => identify_warning(raw),
            (0x64..=0x66, _) => identify_exec_error(raw),
            (0x68 | 0x69 | 0x6A | 0x6C, _) => identify_check_error(raw),
            _ => Self::Invalid(raw),
        }
    }

    /// The raw status word
    pub const fn raw(&self) -> StatusWord {
        match self {
            Self::Normal(s) => s.raw,
            Self::Warning(s) => s.raw,
            Self::ExecError(s) => s.raw,
            Self::CheckError(s) => s.raw,
            Self::Proprietary(raw) | Self::Invalid(raw) => *raw,
        }
    }

    /// The broad category
    pub const fn category(&self) -> StatusCategory {
        match self {
            Self::Normal(_) => StatusCategory::Normal,
            Self::Warning(_) => StatusCategory::Warning,
            Self::ExecError(_) => StatusCategory::ExecError,
            Self::CheckError(_) => StatusCategory::CheckError,
            Self::Proprietary(_) => StatusCategory::Proprietary,
            Self::Invalid(_) => StatusCategory::Invalid,
        }
    }

    /// Whether this is normal processing
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal(_))
    }

    /// Convert to an error; `None` for normal processing
    pub const fn into_error(self) -> Option<StatusError> {
        match self {
            Self::Normal(_) => None,
            Self::Warning(s) => Some(StatusError::Warning(s)),
            Self::ExecError(s) => Some(StatusError::Execution(s)),
            Self::CheckError(s) => Some(StatusError::Checking(s)),
            Self::Proprietary(raw) | Self::Invalid(raw) => Some(StatusError::General(raw)),
        }
    }

    /// Short human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Normal(s) => s.condition.description(),
            Self::Warning(s) => s.condition.description(),
            Self::ExecError(s) => s.condition.description(),
            Self::CheckError(s) => s.condition.description(),
            Self::Proprietary(_) => "Proprietary status",
            Self::Invalid(_) => "Invalid status word",
        }
    }
}

impl From<StatusWord> for Status {
    fn from(raw: StatusWord) -> Self {
        Self::identify(raw)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(s) => write!(f, "{} ({})", s.condition, s.raw),
            Self::Warning(s) => write!(f, "Warning: {} ({})", s.condition, s.raw),
            Self::ExecError(s) => write!(f, "Execution error: {} ({})", s.condition, s.raw),
            Self::CheckError(s) => write!(f, "Checking error: {} ({})", s.condition, s.raw),
            Self::Proprietary(raw) | Self::Invalid(raw) => {
                write!(f, "{} ({raw})", self.description())
            }
        }
    }
}

const fn identify_warning(raw: StatusWord) -> Status {
    let condition = match (raw.sw1, raw.sw2) {
        (0x62 | 0x63, 0x00) => WarningCondition::NoInformationGiven,
        (0x62, n @ 0x02..=0x80) => WarningCondition::WaitingQueryBytes(n),
        (0x62, 0x81) => WarningCondition::PossiblyCorruptedData,
        (0x62, 0x82) => WarningCondition::EndOfFileBeforeLe,
        (0x62, 0x83) => WarningCondition::FileDeactivated,
        (0x62, 0x84) => WarningCondition::FileControlInformationMalformed,
        (0x62, 0x85) => WarningCondition::FileInTerminationState,
        (0x62, 0x86) => WarningCondition::NoInputDataFromSensor,
        (0x63, 0x01) => WarningCondition::FileFilledByLastWrite,
        (0x63, n) if n & 0xF0 == 0xC0 => WarningCondition::Counter(n & 0x0F),
        _ => return Status::Invalid(raw),
    };

    Status::Warning(WarningStatus {
        raw,
        non_volatile_memory_changed: raw.sw1 == 0x63,
        condition,
    })
}

const fn identify_exec_error(raw: StatusWord) -> Status {
    let (condition, non_volatile_memory_changed) = match (raw.sw1, raw.sw2) {
        (0x64, 0x00) => (ExecErrorCondition::ExecutionError, Some(false)),
        (0x64, 0x01) => (ExecErrorCondition::ImmediateResponseRequired, Some(false)),
        (0x64, n @ 0x02..=0x80) => (ExecErrorCondition::WaitingQueryBytes(n), Some(false)),
        (0x65, 0x00) => (ExecErrorCondition::NoInformationGiven, Some(true)),
        (0x65, 0x81) => (ExecErrorCondition::MemoryFailure, Some(true)),
        (0x66, n) => (ExecErrorCondition::SecurityIssue(n), None),
        _ => return Status::Invalid(raw),
    };

    Status::ExecError(ExecErrorStatus {
        raw,
        non_volatile_memory_changed,
        condition,
    })
}

const fn identify_check_error(raw: StatusWord) -> Status {
    use CheckCondition::*;

    let condition = match (raw.sw1, raw.sw2) {
        (0x67, 0x00) => WrongLength,
        (0x68, 0x00) => ClassFunctionsNotSupported,
        (0x68, 0x81) => LogicalChannelNotSupported,
        (0x68, 0x82) => SecureMessagingNotSupported,
        (0x68, 0x83) => LastCommandOfChainExpected,
        (0x68, 0x84) => CommandChainingNotSupported,
        (0x69, 0x00) => CommandNotAllowed,
        (0x69, 0x81) => IncompatibleWithFileStructure,
        (0x69, 0x82) => SecurityStatusNotSatisfied,
        (0x69, 0x83) => AuthenticationMethodBlocked,
        (0x69, 0x84) => ReferenceDataNotUsable,
        (0x69, 0x85) => ConditionsOfUseNotSatisfied,
        (0x69, 0x86) => NoCurrentElementaryFile,
        (0x69, 0x87) => SecureMessagingObjectsMissing,
        (0x69, 0x88) => IncorrectSecureMessagingObjects,
        (0x6A, 0x00) => WrongParameters,
        (0x6A, 0x80) => IncorrectDataParameters,
        (0x6A, 0x81) => FunctionNotSupported,
        (0x6A, 0x82) => FileOrApplicationNotFound,
        (0x6A, 0x83) => RecordNotFound,
        (0x6A, 0x84) => NotEnoughMemory,
        (0x6A, 0x85) => NcInconsistentWithTlv,
        (0x6A, 0x86) => IncorrectP1P2,
        (0x6A, 0x87) => NcInconsistentWithP1P2,
        (0x6A, 0x88) => ReferencedDataNotFound,
        (0x6A, 0x89) => FileAlreadyExists,
        (0x6A, 0x8A) => DfNameAlreadyExists,
        (0x6B, 0x00) => WrongParametersP1P2,
        (0x6C, available) => WrongLeField(available),
        (0x6D, 0x00) => InstructionNotSupported,
        (0x6E, 0x00) => ClassNotSupported,
        (0x6F, 0x00) => NoPreciseDiagnosis,
        _ => return Status::Invalid(raw),
    };

    Status::CheckError(CheckErrorStatus { raw, condition })
}

impl NormalCondition {
    /// Short human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoFurtherQualification => "Process completed",
            Self::RemainingData(_) => "More data available",
        }
    }
}

impl fmt::Display for NormalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemainingData(n) => write!(f, "{}: {n} bytes", self.description()),
            _ => f.write_str(self.description()),
        }
    }
}

impl WarningCondition {
    /// Short human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoInformationGiven => "No information given",
            Self::WaitingQueryBytes(_) => "Triggering by the card",
            Self::PossiblyCorruptedData => "Part of returned data may be corrupted",
            Self::EndOfFileBeforeLe => "End of file or record reached before reading Ne bytes",
            Self::FileDeactivated => "Selected file deactivated",
            Self::FileControlInformationMalformed => "File control information not formatted correctly",
            Self::FileInTerminationState => "Selected file in termination state",
            Self::NoInputDataFromSensor => "No input data available from a sensor on the card",
            Self::FileFilledByLastWrite => "File filled up by the last write",
            Self::Counter(_) => "Counter value",
        }
    }
}

impl fmt::Display for WarningCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingQueryBytes(n) => write!(f, "{} ({n} query bytes)", self.description()),
            Self::Counter(n) => write!(f, "{} {n}", self.description()),
            _ => f.write_str(self.description()),
        }
    }
}

impl ExecErrorCondition {
    /// Short human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ExecutionError => "Execution error",
            Self::ImmediateResponseRequired => "Immediate response required by the card",
            Self::WaitingQueryBytes(_) => "Triggering by the card",
            Self::NoInformationGiven => "No information given",
            Self::MemoryFailure => "Memory failure",
            Self::SecurityIssue(_) => "Security related issue",
        }
    }
}

impl fmt::Display for ExecErrorCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingQueryBytes(n) => write!(f, "{} ({n} query bytes)", self.description()),
            Self::SecurityIssue(n) => write!(f, "{} ({n:#04x})", self.description()),
            _ => f.write_str(self.description()),
        }
    }
}

impl CheckCondition {
    /// Short human readable description
    pub const fn description(&self) -> &'static str {
        match self {
            Self::WrongLength => "Wrong length",
            Self::ClassFunctionsNotSupported => "Functions in CLA not supported",
            Self::LogicalChannelNotSupported => "Logical channel not supported",
            Self::SecureMessagingNotSupported => "Secure messaging not supported",
            Self::LastCommandOfChainExpected => "Last command of the chain expected",
            Self::CommandChainingNotSupported => "Command chaining not supported",
            Self::CommandNotAllowed => "Command not allowed",
            Self::IncompatibleWithFileStructure => "Command incompatible with file structure",
            Self::SecurityStatusNotSatisfied => "Security status not satisfied",
            Self::AuthenticationMethodBlocked => "Authentication method blocked",
            Self::ReferenceDataNotUsable => "Reference data not usable",
            Self::ConditionsOfUseNotSatisfied => "Conditions of use not satisfied",
            Self::NoCurrentElementaryFile => "Command not allowed (no current EF)",
            Self::SecureMessagingObjectsMissing => "Expected secure messaging data objects missing",
            Self::IncorrectSecureMessagingObjects => "Incorrect secure messaging data objects",
            Self::WrongParameters => "Wrong parameters",
            Self::IncorrectDataParameters => "Incorrect parameters in the data field",
            Self::FunctionNotSupported => "Function not supported",
            Self::FileOrApplicationNotFound => "File or application not found",
            Self::RecordNotFound => "Record not found",
            Self::NotEnoughMemory => "Not enough memory space in the file",
            Self::NcInconsistentWithTlv => "Nc inconsistent with TLV structure",
            Self::IncorrectP1P2 => "Incorrect parameters P1-P2",
            Self::NcInconsistentWithP1P2 => "Nc inconsistent with parameters P1-P2",
            Self::ReferencedDataNotFound => "Referenced data or reference data not found",
            Self::FileAlreadyExists => "File already exists",
            Self::DfNameAlreadyExists => "DF name already exists",
            Self::WrongParametersP1P2 => "Wrong parameters P1-P2",
            Self::WrongLeField(_) => "Wrong Le field",
            Self::InstructionNotSupported => "Instruction code not supported or invalid",
            Self::ClassNotSupported => "Class not supported",
            Self::NoPreciseDiagnosis => "No precise diagnosis",
        }
    }
}

impl fmt::Display for CheckCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLeField(n) => write!(f, "{} ({n} bytes available)", self.description()),
            _ => f.write_str(self.description()),
        }
    }
}
