/// A program and its arguments, parsed from a configured command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Splits a command line on whitespace; `None` for a blank line
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl std::fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One scanned project: where it lives, how to install it and which
/// policies apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Directories relative to the checkout root; empty means the root
    pub working_dirs: Vec<String>,
    pub install_command: Option<InstallCommand>,
    pub watches: Vec<String>,
    pub project_key: String,
}

impl Project {
    /// Working directories to scan, `["."]` when none are configured
    pub fn effective_working_dirs(&self) -> Vec<String> {
        if self.working_dirs.is_empty() {
            vec![".".to_string()]
        } else {
            self.working_dirs.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_parse() {
        let command = InstallCommand::parse("  npm   install --ignore-scripts ").unwrap();
        assert_eq!(command.program, "npm");
        assert_eq!(command.args, vec!["install", "--ignore-scripts"]);
        assert_eq!(command.to_string(), "npm install --ignore-scripts");
    }

    #[test]
    fn test_install_command_parse_blank() {
        assert!(InstallCommand::parse("").is_none());
        assert!(InstallCommand::parse("   ").is_none());
    }

    #[test]
    fn test_effective_working_dirs_default() {
        assert_eq!(Project::default().effective_working_dirs(), vec!["."]);
    }

    #[test]
    fn test_effective_working_dirs_configured() {
        let project = Project {
            working_dirs: vec!["a/b".to_string(), ".".to_string()],
            ..Project::default()
        };
        assert_eq!(project.effective_working_dirs(), vec!["a/b", "."]);
    }
}
