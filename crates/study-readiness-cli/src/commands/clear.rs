use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let log = ctx.session_log()?;
    if log.clear()? {
        println!("Log file cleared: {}", log.path().display());
    } else {
        println!("Log file does not exist: {}", log.path().display());
    }
    Ok(())
}
