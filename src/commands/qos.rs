use crate::Context;
use crate::cli::QosCommand;
use crate::config::Settings;
use crate::qos::{self, JsonPolicyStore};
use crate::ui;
use anyhow::Result;

pub fn run(ctx: &Context, cmd: QosCommand) -> Result<()> {
    match cmd {
        QosCommand::Resolve { policy_id, json } => resolve(ctx, &policy_id, json),
    }
}

fn resolve(ctx: &Context, policy_id: &str, json: bool) -> Result<()> {
    // Settings are re-read here so the peak multiplier is taken at
    // resolution time, not cached from an earlier run.
    let settings = Settings::load()?;
    let path = settings.policies_file();
    let store = if path.exists() {
        JsonPolicyStore::load(&path)?
    } else {
        JsonPolicyStore::default()
    };

    let config = qos::resolve(&store, Some(policy_id), settings.qos_peak_bw_multiplier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    if !ctx.quiet {
        ui::header(&format!("QoS shaping for policy {policy_id}"));
    }
    ui::kv("bandwidth enabled", &config.bandwidth_enabled.to_string());
    ui::kv(
        "average bandwidth (bps)",
        &config.average_bandwidth_bps.to_string(),
    );
    ui::kv(
        "peak bandwidth (bps)",
        &config.peak_bandwidth_bps.to_string(),
    );
    ui::kv("burst size (bytes)", &config.burst_size_bytes.to_string());
    ui::kv("DSCP mark enabled", &config.dscp_mark_enabled.to_string());
    ui::kv("DSCP mark value", &config.dscp_mark_value.to_string());
    Ok(())
}
