//! docgen: generate documentation for source files with a hosted chat model

use anyhow::Result;

fn main() -> Result<()> {
    docgen::cli::run()
}
