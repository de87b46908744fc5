use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::errors::ConsoleError;
use crate::models::{ModuleConfiguration, Subscription};
use crate::scangroup::{self, quota, DetailsValidator, ScanGroupDetails};

/// Run the create pipeline offline: quota, then validation, port policy and assembly.
pub fn validate_details(
    details: &ScanGroupDetails,
    port_scan_enabled: bool,
    subscription: Subscription,
    existing_groups: usize,
) -> Result<ModuleConfiguration, ConsoleError> {
    quota::check_quota(subscription, existing_groups)?;
    let validator = DetailsValidator::new();
    scangroup::build_module_configuration(&validator, details, port_scan_enabled)
}

pub async fn handle_validate(args: ValidateArgs) -> Result<(), ConsoleError> {
    let path = PathBuf::from(&args.details);
    if !path.exists() {
        return Err(ConsoleError::Config(format!("Details file not found: {}", path.display())));
    }

    let content = tokio::fs::read_to_string(&path).await?;
    let details: ScanGroupDetails = serde_json::from_str(&content)?;
    let subscription = Subscription::from(args.subscription.unwrap_or(Subscription::Enterprise.id()));

    let config = validate_details(&details, args.port_scan_enabled, subscription, args.existing_groups)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
