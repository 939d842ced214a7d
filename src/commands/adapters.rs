use crate::Context;
use crate::cli::AdaptersCommand;
use crate::config::Settings;
use crate::ui;
use anyhow::Result;
use switchkit::{Error, HttpSwitchBackend, SwitchBackend, TeamingPolicy};

pub fn run(ctx: &Context, cmd: AdaptersCommand) -> Result<()> {
    let settings = Settings::load()?;
    let backend = HttpSwitchBackend::new(&settings.backend_url);

    match cmd {
        AdaptersCommand::SetTeaming { adapter_id, policy } => {
            set_teaming(ctx, &backend, &adapter_id, &policy)
        }
    }
}

fn set_teaming(
    ctx: &Context,
    backend: &dyn SwitchBackend,
    adapter_id: &str,
    policy: &str,
) -> Result<()> {
    // Validate before touching the backend; the error lists the full set.
    let policy = match TeamingPolicy::parse(policy) {
        Ok(policy) => policy,
        Err(err) => {
            ui::error(&err.to_string());
            return Ok(());
        }
    };

    let mut record = match backend.adapter(adapter_id) {
        Ok(record) => record,
        Err(Error::NotFound { .. }) => {
            ui::error(&format!("Adapter {adapter_id} not found"));
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if record.teaming_policy == policy.as_str() {
        ui::info(&format!(
            "Teaming policy of {adapter_id} is already {policy}"
        ));
        return Ok(());
    }

    log::info!("Updating adapter {adapter_id} teaming policy to {policy}");
    record.teaming_policy = policy.as_str().to_string();
    match backend.update_adapter(&record) {
        Ok(updated) => {
            ui::success(&format!(
                "Adapter {adapter_id} teaming policy set to {policy}"
            ));
            if ctx.verbose > 0 {
                ui::kv("name", &updated.name);
                ui::kv("teaming policy", &updated.teaming_policy);
            }
            Ok(())
        }
        Err(Error::Api { detail }) if detail.starts_with("No enum constant") => {
            ui::error(&format!(
                "The backend does not recognize teaming policy {policy}"
            ));
            Ok(())
        }
        Err(Error::Api { detail }) => {
            ui::error(&format!("Unexpected backend error: {detail}"));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchkit::{AdapterRecord, MockSwitchBackend, MutationCall};

    fn ctx() -> Context {
        Context {
            verbose: 0,
            quiet: true,
        }
    }

    fn adapter(id: &str, teaming_policy: &str) -> AdapterRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("{id} uplinks"),
            "teamingPolicy": teaming_policy,
        }))
        .unwrap()
    }

    #[test]
    fn unknown_policy_performs_no_mutation() {
        let mock =
            MockSwitchBackend::new().with_adapter(adapter("adapter-1", "FAILOVER_ORDER"));
        set_teaming(&ctx(), &mock, "adapter-1", "ROUND_ROBIN").unwrap();
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn valid_policy_updates_the_adapter() {
        let mock =
            MockSwitchBackend::new().with_adapter(adapter("adapter-1", "FAILOVER_ORDER"));
        set_teaming(&ctx(), &mock, "adapter-1", "LACP_ACTIVE").unwrap();
        assert_eq!(
            mock.mutations(),
            vec![MutationCall::UpdateAdapter {
                adapter_id: "adapter-1".to_string(),
                teaming_policy: "LACP_ACTIVE".to_string()
            }]
        );
    }

    #[test]
    fn already_set_policy_short_circuits() {
        let mock = MockSwitchBackend::new().with_adapter(adapter("adapter-1", "LACP_ACTIVE"));
        set_teaming(&ctx(), &mock, "adapter-1", "LACP_ACTIVE").unwrap();
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn missing_adapter_is_reported_not_fatal() {
        let mock = MockSwitchBackend::new();
        assert!(set_teaming(&ctx(), &mock, "adapter-9", "LACP_ACTIVE").is_ok());
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn backend_refusal_is_reported_not_fatal() {
        let mock = MockSwitchBackend::new()
            .with_adapter(adapter("adapter-1", "FAILOVER_ORDER"))
            .failing_mutations("No enum constant TeamingPolicy.LACP_ACTIVE");
        assert!(set_teaming(&ctx(), &mock, "adapter-1", "LACP_ACTIVE").is_ok());
    }
}
