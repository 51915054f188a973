//! edlink - open editor:// links in your text editor
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use edlink::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    edlink::run(args)?;
    Ok(())
}
