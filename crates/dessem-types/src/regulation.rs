/// Reservoir regulation type, the one-byte code at the end of a record.
///
/// ```text
/// ┌──────┬──────────┐
/// │ Code │ Type     │
/// ├──────┼──────────┤
/// │ 'D'  │ Daily    │
/// │ 'S'  │ Seasonal │
/// │ 'M'  │ Monthly  │
/// └──────┴──────────┘
/// ```
///
/// Any other non-blank byte is preserved as `Other(char)` so the code
/// survives a decode/encode cycle unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegulationType {
    Daily,
    Seasonal,
    Monthly,
    Other(char),
}

impl RegulationType {
    /// Classify a decoded code string. Blank codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let ch = code.trim().chars().next()?;
        Some(match ch.to_ascii_uppercase() {
            'D' => Self::Daily,
            'S' => Self::Seasonal,
            'M' => Self::Monthly,
            _ => Self::Other(ch),
        })
    }

    /// The wire character for this type.
    pub fn code(self) -> char {
        match self {
            Self::Daily => 'D',
            Self::Seasonal => 'S',
            Self::Monthly => 'M',
            Self::Other(ch) => ch,
        }
    }
}

impl std::fmt::Display for RegulationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Seasonal => write!(f, "seasonal"),
            Self::Monthly => write!(f, "monthly"),
            Self::Other(ch) => write!(f, "other ({ch})"),
        }
    }
}
