use std::process::ExitCode;

use cli::CommandLineArgumentParser;

#[derive(Debug, Default, CommandLineArgumentParser)]
struct ArgumentParser {
    #[argument(
        positional,
        short_name = 'i',
        long_name = "input",
        description = "File to decompress"
    )]
    input: String,

    #[argument(
        positional,
        short_name = 'o',
        long_name = "output",
        description = "Where to write the decompressed file"
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

    let decompressed = match deflate::decode(&input) {
        Ok(decompressed) => decompressed,
        Err(error) => {
            log::error!("could not decompress {}: {error}", arguments.input);
            return ExitCode::FAILURE;
        },
    };

    if let Err(error) = std::fs::write(&arguments.output, &decompressed) {
        log::error!("could not write {}: {error}", arguments.output);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "{} ({} bytes) -> {} ({} bytes)",
        arguments.input,
        input.len(),
        arguments.output,
        decompressed.len(),
    );

    ExitCode::SUCCESS
}
