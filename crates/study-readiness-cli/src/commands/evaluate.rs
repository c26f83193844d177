use study_readiness_core::evaluate_store;

use super::Context;

pub fn run(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log = ctx.session_log()?;

    match evaluate_store(&log) {
        Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
        Ok(result) => print!("{}", result.render()),
        // Missing log and short history are notices, not failures
        Err(e) if e.is_notice() => println!("{e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
