use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

//===========================================================================//

/// Exit status for a file that is not a SLEDE8 binary.
const EXIT_FILETYPE: u8 = 2;

#[derive(Parser)]
#[clap(author, about, long_about = None, version)]
struct Cli {
    /// The SLEDE8 binary file to disassemble.
    binary: PathBuf,
}

//===========================================================================//

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();
    let cli = Cli::parse();
    match run(&cli.binary) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if slede8::is_filetype_error(&error) => {
            eprintln!("{error}");
            ExitCode::from(EXIT_FILETYPE)
        }
        Err(error) => {
            eprintln!("{}: {error}", cli.binary.display());
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> io::Result<()> {
    let image = {
        let file = File::open(path)?;
        slede8::load_image(io::BufReader::new(file))?
    };
    log::info!("loaded {} bytes from {}", image.len(), path.display());
    let mut stdout = io::BufWriter::new(io::stdout().lock());
    slede8::write_listing(&image, &mut stdout)?;
    stdout.flush()
}

//===========================================================================//
