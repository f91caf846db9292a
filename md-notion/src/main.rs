//! The md-notion command-line executable.

mod app;
mod cli;
mod config;

fn main() -> anyhow::Result<()> {
    app::run()
}
