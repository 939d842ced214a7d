use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::Settings;
use crate::ui;
use anyhow::Result;

pub fn run(_ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(),
    }
}

fn show() -> Result<()> {
    let path = Settings::path()?;
    let settings = Settings::load()?;

    ui::header("Configuration");
    let location = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present, using defaults)", path.display())
    };
    ui::kv("File", &location);
    ui::kv("Backend URL", &settings.backend_url);
    ui::kv(
        "Mappings file",
        &settings.mappings_file().display().to_string(),
    );
    ui::kv(
        "Policies file",
        &settings.policies_file().display().to_string(),
    );
    ui::kv(
        "QoS peak bandwidth multiplier",
        &settings.qos_peak_bw_multiplier.to_string(),
    );
    Ok(())
}
