//! Static strategy pattern for CLI commands.
//!
//! Each command is its own type implementing [`CommandStrategy`], so dispatch
//! in `main` is a plain `match` with no trait objects.

mod extract;
mod info;
mod init;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Contract shared by every command.
pub trait CommandStrategy: Send + Sync + 'static {
    /// What the command needs from the parsed arguments.
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
