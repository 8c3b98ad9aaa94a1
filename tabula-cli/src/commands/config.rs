use anyhow::Result;
use owo_colors::OwoColorize;
use tabula_core::config::TabulaConfig;

pub fn init() -> Result<()> {
    let path = TabulaConfig::config_path()?;

    if TabulaConfig::create_default_config(&path)? {
        println!("{} {}", "Created".green(), path.display());
    } else {
        println!("{} {}", "Config already exists:".dimmed(), path.display());
    }
    Ok(())
}

pub fn show(config: &TabulaConfig) -> Result<()> {
    let config_path = TabulaConfig::config_path()?;
    let cache_path = config.cache_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Cache:   {}", cache_path.display());
    println!();
    println!("{}", "Settings".bold());
    print!("{}", config.to_toml()?);

    if config.ics_url.is_none() {
        println!();
        println!(
            "{}",
            "No ics_url set: only cached timetables can be used.".yellow()
        );
    }
    Ok(())
}
