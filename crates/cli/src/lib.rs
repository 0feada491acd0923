//! Minimal command line argument parsing, driven by `#[derive(CommandLineArgumentParser)]`.

pub use cli_derive::CommandLineArgumentParser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandLineParseError {
    /// A required positional or optional argument was never supplied.
    MissingRequiredArgument(&'static str),
    /// A flag argument was given a value (`--flag=x`), which is not allowed.
    NotAFlag(&'static str),
    /// An option expecting a value was passed without one.
    EmptyOption,
    /// An argument's value could not be parsed into its target type.
    InvalidArguments,
}

impl std::fmt::Display for CommandLineParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredArgument(name) => {
                write!(f, "missing required argument: {name}")
            },
            Self::NotAFlag(name) => write!(f, "argument {name} is a flag and takes no value"),
            Self::EmptyOption => write!(f, "expected a value after the last option"),
            Self::InvalidArguments => write!(f, "could not parse argument value"),
        }
    }
}

impl std::error::Error for CommandLineParseError {}

/// Implemented by `#[derive(CommandLineArgumentParser)]` for argument structs.
pub trait CommandLineArgumentParser: Sized {
    fn parse() -> Result<Self, CommandLineParseError>;

    fn help() -> &'static str;
}
