use blinker_core::cycle::format_remaining;
use blinker_core::Config;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = Config::read()?.unwrap_or_default().cycle();

    if json {
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(());
    }
    println!("work:      {}s ({})", defaults.work_secs, format_remaining(defaults.work_secs));
    println!("break:     {}s ({})", defaults.break_secs, format_remaining(defaults.break_secs));
    println!("vibration: {}s", defaults.vibration_secs);
    Ok(())
}
