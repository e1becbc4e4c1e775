use meetlight_core::error::Result;
use meetlight_core::TimePoint;

/// Prints the epoch seconds, then the UTC rendering.
pub fn run(value: &str) -> Result<()> {
    let point = TimePoint::parse(value)?;
    println!("{}", point.as_unix());
    println!("{point}");
    Ok(())
}
