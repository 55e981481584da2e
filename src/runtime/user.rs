//! User identity and user-facing output.

use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};

use super::RealRuntime;

/// Writes a heading in the `==> title` style followed by its detail line.
pub(crate) fn write_notice<W: Write>(output: &mut W, title: &str, detail: &str) -> Result<()> {
    writeln!(output, "==> {}", title)?;
    if !detail.is_empty() {
        writeln!(output, "{}", detail)?;
    }
    output.flush()?;
    Ok(())
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn current_user_impl(&self) -> Result<String> {
        // Under sudo the invoking user owns the result, not root.
        if let Ok(user) = self.env_var_impl("SUDO_USER")
            && !user.is_empty()
        {
            return Ok(user);
        }

        #[cfg(unix)]
        {
            use nix::unistd::{User, getuid};
            if let Some(user) = User::from_uid(getuid()).context("Failed to look up current user")? {
                return Ok(user.name);
            }
        }

        self.env_var_impl("USER")
            .context("Could not determine the current user")
    }

    pub(crate) fn is_terminal_impl(&self) -> bool {
        io::stdout().is_terminal()
    }

    pub(crate) fn notice_impl(&self, title: &str, detail: &str) {
        let mut stdout = io::stdout();
        if let Err(e) = write_notice(&mut stdout, title, detail) {
            log::warn!("Failed to print notice: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::write_notice;
    use crate::runtime::{RealRuntime, Runtime};
    use anyhow::Result;

    #[test]
    fn notice_has_heading_and_detail() -> Result<()> {
        let mut output = Vec::new();
        write_notice(&mut output, "Creating directory: /x", "Some detail.")?;
        assert_eq!(
            String::from_utf8(output)?,
            "==> Creating directory: /x\nSome detail.\n"
        );
        Ok(())
    }

    #[test]
    fn notice_without_detail() -> Result<()> {
        let mut output = Vec::new();
        write_notice(&mut output, "Done", "")?;
        assert_eq!(String::from_utf8(output)?, "==> Done\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn current_user_is_resolved() {
        let runtime = RealRuntime;
        let user = runtime.current_user().unwrap();
        assert!(!user.is_empty());
    }
}
