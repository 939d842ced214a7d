use crate::Context;
use crate::cli::NetworksCommand;
use crate::config::Settings;
use crate::engine::reconcile;
use crate::inventory;
use crate::mapping::{JsonMappingStore, MappingStore};
use crate::remediate;
use crate::ui;
use anyhow::Result;
use switchkit::{HttpSwitchBackend, NetworkObject, SwitchBackend};

pub fn run(ctx: &Context, cmd: NetworksCommand) -> Result<()> {
    let settings = Settings::load()?;
    let backend = HttpSwitchBackend::new(&settings.backend_url);

    match cmd {
        NetworksCommand::List { json } => list(ctx, &backend, json),
        NetworksCommand::Missing { json } => {
            let store = JsonMappingStore::load(&settings.mappings_file())?;
            missing(ctx, &backend, &store, json)
        }
        NetworksCommand::Orphaned { json } => {
            let store = JsonMappingStore::load(&settings.mappings_file())?;
            orphaned(ctx, &backend, &store, json)
        }
        NetworksCommand::Delete { backend_id, yes } => delete(ctx, &backend, &backend_id, yes),
    }
}

fn object_rows(networks: &[NetworkObject]) -> Vec<Vec<String>> {
    networks
        .iter()
        .map(|net| {
            vec![
                net.kind.label().to_string(),
                net.backend_id.clone(),
                net.name.clone(),
            ]
        })
        .collect()
}

fn list(ctx: &Context, backend: &dyn SwitchBackend, json: bool) -> Result<()> {
    let networks = inventory::collect(backend)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&networks)?);
        return Ok(());
    }
    if !ctx.quiet {
        ui::header("Backend networks");
    }
    ui::table(&["KIND", "BACKEND ID", "NAME"], &object_rows(&networks));
    Ok(())
}

fn missing(ctx: &Context, backend: &dyn SwitchBackend, store: &dyn MappingStore, json: bool) -> Result<()> {
    let backend_names = inventory::name_index(backend)?;
    let missing = reconcile::missing_networks(store, &backend_names)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&missing)?);
        return Ok(());
    }
    if !ctx.quiet {
        ui::header("Missing networks");
    }
    let rows: Vec<Vec<String>> = missing
        .iter()
        .map(|m| {
            vec![
                m.logical_id.clone(),
                m.backend_id.clone(),
                m.adapter_id.clone().unwrap_or_default(),
            ]
        })
        .collect();
    ui::table(&["LOGICAL ID", "BACKEND ID", "ADAPTER ID"], &rows);
    Ok(())
}

fn orphaned(ctx: &Context, backend: &dyn SwitchBackend, store: &dyn MappingStore, json: bool) -> Result<()> {
    let networks = inventory::collect(backend)?;
    let scan = reconcile::orphaned_networks(&networks, store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }
    if !ctx.quiet {
        ui::header("Orphaned networks");
    }
    ui::table(&["KIND", "BACKEND ID", "NAME"], &object_rows(&scan.orphaned));
    for ambiguous in &scan.ambiguous {
        ui::warn(&format!(
            "ambiguous mapping for {} ('{}'): records claim adapters {}",
            ambiguous.backend_id,
            ambiguous.name,
            ambiguous.adapter_ids.join(", ")
        ));
    }
    Ok(())
}

fn delete(_ctx: &Context, backend: &dyn SwitchBackend, backend_id: &str, yes: bool) -> Result<()> {
    if backend_id.trim().is_empty() {
        ui::error("A backend network id is required; pass an id shown by 'vnetctl networks orphaned'");
        return Ok(());
    }

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete backend network {backend_id}? This cannot be undone"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ui::info("Aborted");
            return Ok(());
        }
    }

    let names = inventory::name_index(backend)?;
    // An attached object (a VM, for example) makes the backend refuse the
    // deletion; that is reported, never retried.
    match remediate::delete_network(backend, &names, backend_id) {
        Ok(()) => ui::success(&format!("Backend network {backend_id} was deleted")),
        Err(err) => {
            log::debug!("deletion of {backend_id} failed: {err:?}");
            ui::error(&err.to_string());
        }
    }
    Ok(())
}
