use serde::Deserialize;

/// Report style of the pull request comment
///
/// `Standard` embeds banner and severity images; `Simplified` is plain
/// markdown for providers or readers that do not render images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Standard,
    Simplified,
}

impl std::str::FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(OutputStyle::Standard),
            "simplified" => Ok(OutputStyle::Simplified),
            _ => Err(format!(
                "Invalid output style: {}. Please specify 'standard' or 'simplified'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Standard => write!(f, "standard"),
            OutputStyle::Simplified => write!(f, "simplified"),
        }
    }
}
