//! Resolving where a snippet goes and writing it there.

pub mod prompt;
pub mod resolver;
pub mod writer;

pub use prompt::{prompter_for, Prompter, SilentPrompter, TerminalPrompter};
pub use resolver::{default_install_path, InstallResolver, InstallTarget};
pub use writer::FileWriter;
