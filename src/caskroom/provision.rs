use std::path::Path;

use crate::runtime::SystemCommand;

#[cfg(target_os = "macos")]
mod programs {
    pub const MKDIR: &str = "/bin/mkdir";
    pub const CHMOD: &str = "/bin/chmod";
    pub const CHOWN: &str = "/usr/sbin/chown";
    pub const CHGRP: &str = "/usr/bin/chgrp";
}

#[cfg(not(target_os = "macos"))]
mod programs {
    pub const MKDIR: &str = "/bin/mkdir";
    pub const CHMOD: &str = "/bin/chmod";
    pub const CHOWN: &str = "/bin/chown";
    pub const CHGRP: &str = "/bin/chgrp";
}

/// One operation in setting up the Caskroom directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStep {
    /// `mkdir -p`
    CreateDir,
    /// `chmod g+rwx`
    GrantGroupAccess,
    /// `chown <user>`
    SetOwner(String),
    /// `chgrp <group>`
    SetGroup(String),
}

impl ProvisionStep {
    /// The command performing this step on `path`.
    pub fn command(&self, path: &Path, sudo: bool) -> SystemCommand {
        let command = match self {
            ProvisionStep::CreateDir => SystemCommand::new(programs::MKDIR).arg("-p"),
            ProvisionStep::GrantGroupAccess => SystemCommand::new(programs::CHMOD).arg("g+rwx"),
            ProvisionStep::SetOwner(user) => SystemCommand::new(programs::CHOWN).arg(user),
            ProvisionStep::SetGroup(group) => SystemCommand::new(programs::CHGRP).arg(group),
        };
        command.arg(path).sudo(sudo)
    }
}

/// Steps that provision the Caskroom, in execution order.
///
/// `CreateDir` comes first: every later step operates on the directory it creates.
pub fn provisioning_steps(user: &str, group: &str) -> Vec<ProvisionStep> {
    vec![
        ProvisionStep::CreateDir,
        ProvisionStep::GrantGroupAccess,
        ProvisionStep::SetOwner(user.to_string()),
        ProvisionStep::SetGroup(group.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn test_steps_order() {
        assert_eq!(
            provisioning_steps("alice", "admin"),
            vec![
                ProvisionStep::CreateDir,
                ProvisionStep::GrantGroupAccess,
                ProvisionStep::SetOwner("alice".into()),
                ProvisionStep::SetGroup("admin".into()),
            ]
        );
    }

    #[test]
    fn test_step_commands() {
        let path = Path::new("/opt/homebrew/Caskroom");
        let commands: Vec<SystemCommand> = provisioning_steps("alice", "admin")
            .iter()
            .map(|step| step.command(path, true))
            .collect();

        let programs: Vec<PathBuf> = commands.iter().map(|c| c.program.clone()).collect();
        assert_eq!(
            programs,
            vec![
                PathBuf::from(programs::MKDIR),
                PathBuf::from(programs::CHMOD),
                PathBuf::from(programs::CHOWN),
                PathBuf::from(programs::CHGRP),
            ]
        );

        assert_eq!(
            commands[0].args,
            vec![OsString::from("-p"), OsString::from("/opt/homebrew/Caskroom")]
        );
        assert_eq!(
            commands[2].args,
            vec![OsString::from("alice"), OsString::from("/opt/homebrew/Caskroom")]
        );
        assert!(commands.iter().all(|c| c.sudo));
    }
}
