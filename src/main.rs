use anyhow::Result;

fn main() -> Result<()> {
    sms_convert::cli::run()
}
