use anyhow::Result;

fn main() -> Result<()> {
    timeclock_cli::run()
}
