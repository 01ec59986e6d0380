mod config;
mod driver;

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::debug;

use barracudawaf_core::differ::find_changed_attributes;
use barracudawaf_core::effect::Effect;
use barracudawaf_core::plan::Plan;
use barracudawaf_core::provider::ProviderError;
use barracudawaf_core::resource::{ResourceId, Value};
use barracudawaf_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use barracudawaf_provider::resources::{get_descriptor, resource_descriptors};
use barracudawaf_provider::{BarracudaWafProvider, ProviderConfig, configure, provider_schema};
use barracudawaf_state::{BackendError, LocalBackend, StateBackend, StateFile};

use config::{DEFAULT_CONFIG_FILE, DeclaredResource, ParsedConfig};

const SENSITIVE: &str = "(sensitive)";

#[derive(Parser)]
#[command(name = "barracudawaf")]
#[command(about = "Manage Barracuda Web Application Firewall configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the state file
    #[arg(long, global = true, default_value = LocalBackend::DEFAULT_STATE_FILE)]
    state: PathBuf,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Connection settings overriding the configuration file's provider block
#[derive(Args, Debug, Default)]
struct ConnectionArgs {
    /// Management address of the appliance
    #[arg(long, global = true, env = "BARRACUDA_WAF_ADDRESS")]
    address: Option<String>,

    /// Management port of the appliance
    #[arg(long, global = true, env = "BARRACUDA_WAF_PORT")]
    port: Option<String>,

    /// Administrator user name
    #[arg(long, global = true, env = "BARRACUDA_WAF_USERNAME")]
    username: Option<String>,

    /// Administrator password
    #[arg(long, global = true, env = "BARRACUDA_WAF_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported resource types
    Resources,
    /// Print the provider schema, or the schema of one resource type, as JSON
    Schema {
        /// Resource type (e.g., barracudawaf_services)
        resource_type: Option<String>,
    },
    /// Validate the configuration file
    Validate {
        /// Path to the configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,
    },
    /// Show execution plan without applying changes
    Plan {
        /// Path to the configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,
    },
    /// Apply changes to reach the desired state
    Apply {
        /// Path to the configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Destroy every managed resource
    Destroy {
        /// Path to the configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Bring an existing appliance object under management
    Import {
        /// Resource type (e.g., barracudawaf_servers)
        resource_type: String,
        /// Binding name to record the object under
        binding: String,
        /// Name of the object on the appliance
        identifier: String,

        /// Enclosing object, outermost first (repeat for deeper nesting)
        #[arg(long = "parent")]
        parents: Vec<String>,

        /// Configuration file holding the provider block
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,
    },
    /// Re-read every managed resource and update the state file
    Refresh {
        /// Path to the configuration file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,
    },
    /// Remove a state lock left behind by an interrupted command
    ForceUnlock {
        /// Lock id, as shown in the "State is locked" error
        lock_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let state = cli.state.as_path();
    let connection = &cli.connection;

    let result = match cli.command {
        Commands::Resources => run_resources(),
        Commands::Schema { resource_type } => run_schema(resource_type.as_deref()),
        Commands::Validate { file } => run_validate(&file),
        Commands::Plan { file } => run_plan(&file, state, connection).await,
        Commands::Apply { file, auto_approve } => {
            run_apply(&file, state, connection, auto_approve).await
        }
        Commands::Destroy { file, auto_approve } => {
            run_destroy(&file, state, connection, auto_approve).await
        }
        Commands::Import {
            resource_type,
            binding,
            identifier,
            parents,
            file,
        } => {
            let id = ResourceId::new(resource_type, binding);
            run_import(&file, state, connection, id, &identifier, &parents).await
        }
        Commands::Refresh { file } => run_refresh(&file, state, connection).await,
        Commands::ForceUnlock { lock_id } => run_force_unlock(state, &lock_id).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// =============================================================================
// Schema commands
// =============================================================================

fn run_resources() -> Result<(), String> {
    let mut descriptors = resource_descriptors().to_vec();
    descriptors.sort_by_key(|d| d.type_name);

    for descriptor in &descriptors {
        println!(
            "  {} {}",
            descriptor.type_name.cyan().bold(),
            format!("/{}", descriptor.endpoint.template()).dimmed()
        );
        println!("      {}", descriptor.description);
    }

    println!();
    println!("{} resource types.", descriptors.len());
    Ok(())
}

fn run_schema(resource_type: Option<&str>) -> Result<(), String> {
    let schema = match resource_type {
        None => provider_schema(),
        Some(name) => get_descriptor(name)
            .map(|d| d.schema())
            .ok_or_else(|| format!("Unknown resource type '{}'", name))?,
    };

    let json = serde_json::to_string_pretty(&schema_json(&schema)).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn schema_json(schema: &ResourceSchema) -> serde_json::Value {
    let attributes: serde_json::Map<String, serde_json::Value> = schema
        .attributes
        .values()
        .map(|a| (a.name.clone(), attribute_json(a)))
        .collect();

    serde_json::json!({
        "type": schema.resource_type,
        "description": schema.description,
        "attributes": attributes,
    })
}

fn attribute_json(attribute: &AttributeSchema) -> serde_json::Value {
    let mut json = serde_json::json!({
        "type": attribute.attr_type.to_string(),
        "required": attribute.required,
        "sensitive": attribute.sensitive,
    });
    if let Some(description) = &attribute.description {
        json["description"] = serde_json::Value::String(description.clone());
    }
    if let Some(key) = &attribute.provider_name {
        json["json_key"] = serde_json::Value::String(key.clone());
    }
    if let AttributeType::Block(fields) = &attribute.attr_type {
        let block: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|a| (a.name.clone(), attribute_json(a)))
            .collect();
        json["attributes"] = serde_json::Value::Object(block);
    }
    json
}

// =============================================================================
// Configuration
// =============================================================================

fn validate_resources(resources: &[DeclaredResource]) -> Result<(), String> {
    let mut all_errors = Vec::new();

    for declared in resources {
        let id = &declared.resource.id;
        match get_descriptor(&id.resource_type) {
            Some(descriptor) => {
                if let Err(errors) = descriptor.validate(&declared.resource.attributes) {
                    for error in errors {
                        all_errors.push(format!("{}: {}", id, error));
                    }
                }
            }
            None => all_errors.push(format!(
                "{}: unknown resource type '{}'",
                id, id.resource_type
            )),
        }
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors.join("\n"))
    }
}

/// Load, validate and order the declared resources
fn load_declared(file: &Path) -> Result<(ParsedConfig, Vec<DeclaredResource>), String> {
    let config = config::load(file)?;
    validate_resources(&config.resources)?;
    let sorted = config::sort_by_dependencies(&config.resources)?;
    Ok((config, sorted))
}

/// Provider block with command-line and environment overrides applied
fn provider_attributes(
    config: &ParsedConfig,
    overrides: &ConnectionArgs,
) -> HashMap<String, Value> {
    let mut attributes = config.provider.clone();
    for (key, value) in [
        ("address", &overrides.address),
        ("port", &overrides.port),
        ("username", &overrides.username),
        ("password", &overrides.password),
    ] {
        if let Some(value) = value {
            attributes.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    attributes
}

async fn connect(
    config: &ParsedConfig,
    overrides: &ConnectionArgs,
) -> Result<BarracudaWafProvider, String> {
    let provider_config = ProviderConfig::from_attributes(&provider_attributes(config, overrides))
        .map_err(|e| e.to_string())?;
    debug!("Provider configuration: {:?}", provider_config);
    configure(&provider_config).await.map_err(|e| e.to_string())
}

// =============================================================================
// State
// =============================================================================

async fn read_state(backend: &dyn StateBackend) -> Result<StateFile, String> {
    Ok(backend
        .read_state()
        .await
        .map_err(|e| format!("Failed to read state: {}", e))?
        .unwrap_or_default())
}

async fn write_state(backend: &dyn StateBackend, state: &mut StateFile) -> Result<(), String> {
    state.increment_serial();
    backend
        .write_state(state)
        .await
        .map_err(|e| format!("Failed to write state: {}", e))
}

/// Run `work` while holding the state lock
async fn locked<T, F>(backend: &dyn StateBackend, operation: &str, work: F) -> Result<T, String>
where
    F: Future<Output = Result<T, String>>,
{
    let lock = backend.acquire_lock(operation).await.map_err(|e| match &e {
        BackendError::Locked(held) => format!(
            "{}\nIf no other command is running, run `barracudawaf force-unlock {}`",
            e, held.id
        ),
        BackendError::UnreadableLock { path, .. } => format!(
            "{}\nIf no other command is running, delete {}",
            e,
            path.display()
        ),
        _ => format!("Failed to acquire state lock: {}", e),
    })?;
    debug!("Acquired state lock {}", lock.id);

    let result = work.await;

    if let Err(e) = backend.release_lock(&lock).await {
        let message = format!("Failed to release state lock {}: {}", lock.id, e);
        return match result {
            Ok(_) => Err(message),
            Err(original) => Err(format!("{}\n{}", original, message)),
        };
    }
    result
}

fn print_dropped(dropped: &[ResourceId]) {
    for id in dropped {
        println!(
            "  {} {} no longer exists and was removed from state",
            "!".yellow().bold(),
            id
        );
    }
    if !dropped.is_empty() {
        println!();
    }
}

// =============================================================================
// Lifecycle commands
// =============================================================================

fn run_validate(file: &Path) -> Result<(), String> {
    let (_, sorted) = load_declared(file)?;

    println!("{}", "Validating...".cyan());
    println!(
        "{}",
        format!("✓ {} resources validated successfully.", sorted.len())
            .green()
            .bold()
    );

    for declared in &sorted {
        println!("  • {}", declared.resource.id);
    }

    Ok(())
}

async fn run_plan(
    file: &Path,
    state_path: &Path,
    connection: &ConnectionArgs,
) -> Result<(), String> {
    let (config, sorted) = load_declared(file)?;
    let provider = connect(&config, connection).await?;
    let backend = LocalBackend::with_path(state_path);

    let mut state = read_state(&backend).await?;
    let dropped = driver::refresh(&provider, &mut state).await?;
    print_dropped(&dropped);

    let plan = driver::plan(&sorted, &state);
    print_plan(&plan);
    Ok(())
}

async fn run_apply(
    file: &Path,
    state_path: &Path,
    connection: &ConnectionArgs,
    auto_approve: bool,
) -> Result<(), String> {
    let (config, sorted) = load_declared(file)?;
    let provider = connect(&config, connection).await?;
    let backend = LocalBackend::with_path(state_path);

    locked(
        &backend,
        "apply",
        apply_changes(&provider, &backend, &sorted, auto_approve),
    )
    .await
}

async fn apply_changes(
    provider: &BarracudaWafProvider,
    backend: &LocalBackend,
    sorted: &[DeclaredResource],
    auto_approve: bool,
) -> Result<(), String> {
    let mut state = read_state(backend).await?;
    let dropped = driver::refresh(provider, &mut state).await?;
    print_dropped(&dropped);
    if !dropped.is_empty() {
        write_state(backend, &mut state).await?;
    }

    let plan = driver::plan(sorted, &state);
    if plan.is_empty() {
        println!("{}", "No changes needed.".green());
        return Ok(());
    }

    print_plan(&plan);
    println!();

    if !auto_approve
        && !confirm(
            "Do you want to perform these actions?",
            "Only 'yes' will be accepted to approve.",
        )?
    {
        println!("{}", "Apply cancelled.".yellow());
        return Ok(());
    }

    println!("{}", "Applying changes...".cyan().bold());
    println!();

    let summary = driver::execute(provider, &plan, &mut state, backend, print_outcome).await?;

    println!();
    if summary.failed == 0 {
        println!(
            "{}",
            format!("Apply complete! {} changes applied.", summary.succeeded)
                .green()
                .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Apply failed. {} succeeded, {} failed.",
            summary.succeeded, summary.failed
        ))
    }
}

async fn run_destroy(
    file: &Path,
    state_path: &Path,
    connection: &ConnectionArgs,
    auto_approve: bool,
) -> Result<(), String> {
    let (config, sorted) = load_declared(file)?;
    let provider = connect(&config, connection).await?;
    let backend = LocalBackend::with_path(state_path);

    locked(
        &backend,
        "destroy",
        destroy_all(&provider, &backend, &sorted, auto_approve),
    )
    .await
}

async fn destroy_all(
    provider: &BarracudaWafProvider,
    backend: &LocalBackend,
    sorted: &[DeclaredResource],
    auto_approve: bool,
) -> Result<(), String> {
    let mut state = read_state(backend).await?;
    let dropped = driver::refresh(provider, &mut state).await?;
    print_dropped(&dropped);
    if !dropped.is_empty() {
        write_state(backend, &mut state).await?;
    }

    let plan = driver::destroy_plan(sorted, &state);
    if plan.is_empty() {
        println!("{}", "No resources to destroy.".green());
        return Ok(());
    }

    println!("{}", "Destroy Plan:".red().bold());
    println!();
    for effect in plan.effects() {
        println!("  {} {}", "-".red().bold(), effect.resource_id());
    }
    println!();
    println!("Plan: {} to destroy.", plan.effects().len().to_string().red());
    println!();

    if !auto_approve
        && !confirm(
            "Do you really want to destroy all resources?",
            "This action cannot be undone. Type 'yes' to confirm.",
        )?
    {
        println!("{}", "Destroy cancelled.".yellow());
        return Ok(());
    }

    println!("{}", "Destroying resources...".red().bold());
    println!();

    let summary = driver::execute(provider, &plan, &mut state, backend, print_outcome).await?;

    println!();
    if summary.failed == 0 {
        println!(
            "{}",
            format!("Destroy complete! {} resources destroyed.", summary.succeeded)
                .green()
                .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Destroy failed. {} succeeded, {} failed.",
            summary.succeeded, summary.failed
        ))
    }
}

async fn run_import(
    file: &Path,
    state_path: &Path,
    connection: &ConnectionArgs,
    id: ResourceId,
    identifier: &str,
    parents: &[String],
) -> Result<(), String> {
    let descriptor = get_descriptor(&id.resource_type)
        .ok_or_else(|| format!("Unknown resource type '{}'", id.resource_type))?;
    let expected = descriptor.endpoint.parent_slots();
    if parents.len() != expected {
        return Err(format!(
            "{} lives at /{}: expected {} --parent value(s), got {}",
            id.resource_type,
            descriptor.endpoint.template(),
            expected,
            parents.len()
        ));
    }

    let config = config::load_or_default(file)?;
    let provider = connect(&config, connection).await?;
    let backend = LocalBackend::with_path(state_path);

    locked(&backend, "import", async {
        let mut state = read_state(&backend).await?;
        let imported =
            driver::import(&provider, &mut state, id.clone(), identifier, parents).await?;
        write_state(&backend, &mut state).await?;

        println!(
            "  {} Imported {} ({})",
            "✓".green(),
            imported.id,
            identifier
        );
        Ok::<(), String>(())
    })
    .await
}

async fn run_refresh(
    file: &Path,
    state_path: &Path,
    connection: &ConnectionArgs,
) -> Result<(), String> {
    let config = config::load_or_default(file)?;
    let provider = connect(&config, connection).await?;
    let backend = LocalBackend::with_path(state_path);

    locked(&backend, "refresh", async {
        let mut state = read_state(&backend).await?;
        let dropped = driver::refresh(&provider, &mut state).await?;
        write_state(&backend, &mut state).await?;

        print_dropped(&dropped);
        println!(
            "{}",
            format!(
                "Refresh complete! {} resources in state.",
                state.resources.len()
            )
            .green()
            .bold()
        );
        Ok::<(), String>(())
    })
    .await
}

async fn run_force_unlock(state_path: &Path, lock_id: &str) -> Result<(), String> {
    let backend = LocalBackend::with_path(state_path);
    backend
        .force_unlock(lock_id)
        .await
        .map_err(|e| format!("Failed to unlock state: {}", e))?;
    println!("{}", format!("State lock {} removed.", lock_id).green().bold());
    Ok(())
}

fn confirm(question: &str, detail: &str) -> Result<bool, String> {
    println!("{}", question.yellow().bold());
    println!("  {}", detail.yellow());
    print!("\n  Enter a value: ");
    std::io::Write::flush(&mut std::io::stdout()).map_err(|e| e.to_string())?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    println!();

    Ok(input.trim() == "yes")
}

// =============================================================================
// Plan output
// =============================================================================

fn print_outcome(effect: &Effect, result: Result<(), &ProviderError>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), format_effect(effect)),
        Err(e) => println!("  {} {} - {}", "✗".red(), format_effect(effect), e),
    }
}

fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        println!("{}", "No changes. Appliance configuration is up-to-date.".green());
        return;
    }

    println!("{}", "Execution Plan:".cyan().bold());
    println!();

    for effect in plan.effects() {
        for line in effect_lines(effect) {
            println!("{}", line);
        }
    }

    println!();
    let summary = plan.summary();
    println!(
        "Plan: {} to add, {} to change, {} to destroy.",
        summary.create.to_string().green(),
        summary.update.to_string().yellow(),
        summary.delete.to_string().red()
    );
}

fn effect_lines(effect: &Effect) -> Vec<String> {
    let mut lines = Vec::new();
    let attr_prefix = "      ";

    match effect {
        Effect::Create(r) => {
            lines.push(format!(
                "  {} {} {}",
                "+".green().bold(),
                r.id.resource_type.cyan().bold(),
                r.id.name
            ));
            for key in ordered_keys(r.attributes.keys()) {
                let shown = format_attribute(&r.id.resource_type, key, &r.attributes[key]);
                lines.push(format!("{}{}: {}", attr_prefix, key, shown.green()));
            }
        }
        Effect::Update { id, from, to } => {
            lines.push(format!(
                "  {} {} {}",
                "~".yellow().bold(),
                id.resource_type.cyan().bold(),
                id.name
            ));
            let changed = find_changed_attributes(&to.attributes, &from.attributes);
            for key in ordered_keys(changed.iter()) {
                let old = from
                    .attributes
                    .get(key)
                    .map(|v| format_attribute(&id.resource_type, key, v))
                    .unwrap_or_else(|| "(none)".to_string());
                let new = format_attribute(&id.resource_type, key, &to.attributes[key]);
                lines.push(format!(
                    "{}{}: {} → {}",
                    attr_prefix,
                    key,
                    old.red(),
                    new.green()
                ));
            }
        }
        Effect::Delete { id, from } => {
            lines.push(format!(
                "  {} {} {}",
                "-".red().bold(),
                id.resource_type.cyan().bold(),
                id.name
            ));
            if let Some(identifier) = &from.identifier {
                lines.push(format!("{}name: {}", attr_prefix, identifier.red().bold()));
            }
        }
    }

    lines
}

/// `name` first, then alphabetical
fn ordered_keys<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<&'a String> {
    let mut keys: Vec<&String> = keys.collect();
    keys.sort_by(|a, b| match (a.as_str(), b.as_str()) {
        ("name", _) => std::cmp::Ordering::Less,
        (_, "name") => std::cmp::Ordering::Greater,
        _ => a.cmp(b),
    });
    keys
}

fn format_effect(effect: &Effect) -> String {
    match effect {
        Effect::Create(r) => format!("Create {}", r.id),
        Effect::Update { id, .. } => format!("Update {}", id),
        Effect::Delete { id, .. } => format!("Delete {}", id),
    }
}

fn is_sensitive(resource_type: &str, key: &str) -> bool {
    get_descriptor(resource_type)
        .and_then(|d| d.field(key))
        .is_some_and(|f| f.sensitive)
}

fn is_sensitive_in_block(resource_type: &str, block: &str, key: &str) -> bool {
    get_descriptor(resource_type)
        .and_then(|d| d.sub_resource(block))
        .and_then(|s| s.fields.iter().find(|f| f.name == key))
        .is_some_and(|f| f.sensitive)
}

/// Render an attribute for display, masking sensitive values
fn format_attribute(resource_type: &str, key: &str, value: &Value) -> String {
    if is_sensitive(resource_type, key) {
        return SENSITIVE.to_string();
    }

    match value {
        Value::List(items) if items.iter().any(|i| matches!(i, Value::Map(_))) => {
            let blocks: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::Map(fields) => {
                        let mut names: Vec<&String> = fields.keys().collect();
                        names.sort();
                        let entries: Vec<String> = names
                            .into_iter()
                            .map(|name| {
                                let shown = if is_sensitive_in_block(resource_type, key, name) {
                                    SENSITIVE.to_string()
                                } else {
                                    format_value(&fields[name])
                                };
                                format!("{}: {}", name, shown)
                            })
                            .collect();
                        format!("{{{}}}", entries.join(", "))
                    }
                    other => format_value(other),
                })
                .collect();
            format!("[{}]", blocks.join(", "))
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let strs: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", strs.join(", "))
        }
        Value::Map(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let strs: Vec<_> = keys
                .into_iter()
                .map(|k| format!("{}: {}", k, format_value(&map[k])))
                .collect();
            format!("{{{}}}", strs.join(", "))
        }
    }
}
