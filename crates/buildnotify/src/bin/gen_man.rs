use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "buildnotify.1".to_string()),
    );
    let mut file =
        File::create(&path).with_context(|| format!("Creating {}", path.display()))?;
    buildnotify::cli::write_man_page(&mut file)
        .with_context(|| format!("Rendering man page to {}", path.display()))?;
    eprintln!("Generated man page at {}", path.display());
    Ok(())
}
