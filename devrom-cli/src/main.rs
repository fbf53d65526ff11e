extern crate core;
extern crate libdevrom;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

/// Chunk size for progress reporting. A multiple of the key length, so
/// every chunk starts at key index 0 and the cycle stays aligned.
const TRANSFORM_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "DevRom CLI")]
#[command(about, author, version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mask the development ROM into the shippable image
    Encode {
        /// Overwrite the masked image if it already exists
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
    },
    /// Recover the development ROM from the masked image
    Decode {
        /// Overwrite the plain ROM if it already exists
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
    },
    /// Check that the masked image unmasks back to the development ROM
    Check,
    /// Print debugging information on the canonical images
    Info,
}

pub fn main() -> Result<()> {
    env_logger::init();

    let stdout = console::Term::stdout();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { force } => command_encode(stdout, force)?,
        Commands::Decode { force } => command_decode(stdout, force)?,
        Commands::Check => command_check(stdout)?,
        Commands::Info => command_info(stdout)?,
    }

    Ok(())
}

fn command_encode(stdout: console::Term, force: bool) -> Result<()> {
    if !confirm_overwrite(libdevrom::ENCODED_ROM, force)? {
        return Ok(());
    }

    let rom = libdevrom::mask::read_rom(libdevrom::SOURCE_ROM).into_diagnostic()?;
    let masked = transform_with_progress(&rom)?;
    libdevrom::mask::write_rom(libdevrom::ENCODED_ROM, &masked).into_diagnostic()?;

    let text = format!(
        "Masked {} bytes into \"{}\";",
        masked.len(),
        libdevrom::ENCODED_ROM
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_decode(stdout: console::Term, force: bool) -> Result<()> {
    if !confirm_overwrite(libdevrom::SOURCE_ROM, force)? {
        return Ok(());
    }

    let masked = libdevrom::mask::read_rom(libdevrom::ENCODED_ROM).into_diagnostic()?;
    let rom = transform_with_progress(&masked)?;
    libdevrom::mask::write_rom(libdevrom::SOURCE_ROM, &rom).into_diagnostic()?;

    let text = format!(
        "Recovered {} bytes into \"{}\";",
        rom.len(),
        libdevrom::SOURCE_ROM
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_check(stdout: console::Term) -> Result<()> {
    let rom = libdevrom::mask::read_rom(libdevrom::SOURCE_ROM).into_diagnostic()?;
    let masked = libdevrom::mask::read_rom(libdevrom::ENCODED_ROM).into_diagnostic()?;

    let tmp = tempdir::TempDir::new("devrom").into_diagnostic()?;
    let path = tmp.path().join(libdevrom::SOURCE_ROM);

    libdevrom::mask::write_rom(&path, &libdevrom::mask::apply_key(&masked)).into_diagnostic()?;
    let recovered = libdevrom::mask::read_rom(&path).into_diagnostic()?;

    if recovered != rom {
        return Err(miette::miette!(
            "\"{}\" does not unmask back to \"{}\"",
            libdevrom::ENCODED_ROM,
            libdevrom::SOURCE_ROM
        ));
    }

    let text = format!(
        "\"{}\" unmasks back to \"{}\";",
        libdevrom::ENCODED_ROM,
        libdevrom::SOURCE_ROM
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_info(stdout: console::Term) -> Result<()> {
    let rom = libdevrom::mask::read_rom(libdevrom::SOURCE_ROM).into_diagnostic()?;

    let text = format!(
        "Source: \"{}\";\nSize: {} (bytes);\nKey length: {} (bytes);",
        libdevrom::SOURCE_ROM,
        rom.len(),
        libdevrom::KEY_LENGTH
    );
    stdout.write_line(&text).into_diagnostic()?;

    if !is_exist_file(libdevrom::ENCODED_ROM) {
        stdout
            .write_line("Masked image: missing;")
            .into_diagnostic()?;
        return Ok(());
    }

    let masked = libdevrom::mask::read_rom(libdevrom::ENCODED_ROM).into_diagnostic()?;
    let up_to_date = masked == libdevrom::mask::apply_key(&rom);

    let text = format!(
        "Masked image: \"{}\";\nSize: {} (bytes);\nUp to date: {};",
        libdevrom::ENCODED_ROM,
        masked.len(),
        up_to_date
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn transform_with_progress(data: &[u8]) -> Result<Vec<u8>> {
    let bar = indicatif::ProgressBar::new(data.len() as u64);
    bar.set_style(get_bar_style()?);
    bar.set_message("applying key");

    let mut output = Vec::with_capacity(data.len());

    for chunk in data.chunks(TRANSFORM_CHUNK_SIZE) {
        output.extend_from_slice(&libdevrom::mask::apply_key(chunk));
        bar.inc(chunk.len() as u64);
    }

    bar.finish();
    Ok(output)
}

fn confirm_overwrite(path: &str, force: bool) -> Result<bool> {
    if force || !is_exist_file(path) {
        return Ok(true);
    }

    let message = format!("File \"{}\" exists. Overwrite it?", path);

    dialoguer::Confirm::new()
        .with_prompt(message)
        .interact()
        .into_diagnostic()
}

fn get_bar_style() -> Result<indicatif::ProgressStyle> {
    Ok(
        indicatif::ProgressStyle::with_template("[{bar:32}] {bytes:>10}/{total_bytes:10} {msg}")
            .into_diagnostic()?
            .progress_chars("=>-"),
    )
}

fn is_exist_file(path: &str) -> bool {
    let metadata = std::path::Path::new(path);
    metadata.exists()
}
