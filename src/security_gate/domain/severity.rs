/// Severity levels recognized by the report renderer.
///
/// Findings keep their severity as the scanner's raw string; this enum is
/// only used to pick an icon and to order rows. Ordered from most to least
/// severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Parses a scanner severity string, ignoring case and surrounding
    /// whitespace. Returns `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            "unknown" => Some(Severity::Unknown),
            _ => None,
        }
    }

    /// Name of the icon image used in the standard report style.
    pub fn icon_file_name(&self) -> &'static str {
        match self {
            Severity::Critical => "criticalSeverity.png",
            Severity::High => "highSeverity.png",
            Severity::Medium => "mediumSeverity.png",
            Severity::Low => "lowSeverity.png",
            Severity::Unknown => "unknownSeverity.png",
        }
    }

    /// Sort rank for raw severity strings: recognized levels first, most
    /// severe first; unrecognized strings last.
    pub fn rank(value: &str) -> u8 {
        match Self::parse(value) {
            Some(Severity::Critical) => 0,
            Some(Severity::High) => 1,
            Some(Severity::Medium) => 2,
            Some(Severity::Low) => 3,
            Some(Severity::Unknown) => 4,
            None => 5,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse(" critical "), Some(Severity::Critical));
        assert_eq!(Severity::parse("unknown"), Some(Severity::Unknown));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(Severity::parse("severe"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn test_icon_file_name() {
        assert_eq!(Severity::High.icon_file_name(), "highSeverity.png");
        assert_eq!(Severity::Medium.icon_file_name(), "mediumSeverity.png");
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Severity::rank("Critical") < Severity::rank("high"));
        assert!(Severity::rank("High") < Severity::rank("Medium"));
        assert!(Severity::rank("Low") < Severity::rank("Unknown"));
        assert!(Severity::rank("Unknown") < Severity::rank("whatever"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
        assert_eq!(Severity::Unknown.to_string(), "Unknown");
    }
}
