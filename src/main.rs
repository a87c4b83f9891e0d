use anyhow::Result;

fn main() -> Result<()> {
    grove::commands::apply::run()
}
