use std::process::ExitCode;

use cli::CommandLineArgumentParser;

#[derive(Debug, Default, CommandLineArgumentParser)]
struct ArgumentParser {
    #[argument(
        positional,
        short_name = 'i',
        long_name = "input",
        description = "File to compress"
    )]
    input: String,

    #[argument(
        positional,
        short_name = 'o',
        long_name = "output",
        description = "Where to write the compressed file"
    )]
    output: String,
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arguments = match ArgumentParser::parse() {
        Ok(arguments) => arguments,
        Err(error) => {
            log::error!("{error}");
            println!("{}", ArgumentParser::help());
            return ExitCode::FAILURE;
        },
    };

    let input = match std::fs::read(&arguments.input) {
        Ok(input) => input,
        Err(error) => {
            log::error!("could not read {}: {error}", arguments.input);
            return ExitCode::FAILURE;
        },
    };

    let compressed = match deflate::encode(&input) {
        Ok(compressed) => compressed,
        Err(error) => {
            log::error!("could not compress {}: {error}", arguments.input);
            return ExitCode::FAILURE;
        },
    };

    if let Err(error) = std::fs::write(&arguments.output, &compressed) {
        log::error!("could not write {}: {error}", arguments.output);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "{} ({} bytes) -> {} ({} bytes)",
        arguments.input,
        input.len(),
        arguments.output,
        compressed.len(),
    );

    ExitCode::SUCCESS
}
