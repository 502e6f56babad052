/// Supported VCS hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsProvider {
    GitHub,
    GitLab,
}

impl std::str::FromStr for VcsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(VcsProvider::GitHub),
            "gitlab" => Ok(VcsProvider::GitLab),
            _ => Err(format!(
                "Invalid VCS provider: {}. Please specify 'github' or 'gitlab'",
                s
            )),
        }
    }
}

impl std::fmt::Display for VcsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsProvider::GitHub => write!(f, "github"),
            VcsProvider::GitLab => write!(f, "gitlab"),
        }
    }
}
