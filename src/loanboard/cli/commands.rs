//! # CLI Layer
//!
//! This module is **one possible UI client** for loanboard. It is the only
//! place that reads stdin, writes stdout, installs logging, or decides exit codes.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Commands`]
//! 2. **Context Setup**: the data directory is resolved and the API loaded
//! 3. **API Dispatch**: one `CatalogApi` call per command
//! 4. **Output**: results are rendered through templates
//! 5. **Shutdown**: background pushes are awaited before the process exits

use super::preset_shell;
use super::render::{
    print_messages, render_presets, render_product, render_product_list, render_settings,
    render_status, stdout_supports_color,
};
use super::setup::{Cli, Commands, PresetCommands, ProductArgs};
use clap::Parser;
use loanboard::api::CatalogApi;
use loanboard::commands::helpers::preset_position;
use loanboard::commands::settings::SettingsAction;
use loanboard::error::{CatalogError, Result};
use loanboard::init::{initialize, resolve_data_dir};
use loanboard::model::{MoveDirection, Product};
use loanboard::selection::{ProductDraft, Selection};
use loanboard::storefront::{self, HttpSource, PageSink};
use loanboard::store::fs::FileStore;
use loanboard::sync::SyncStatus;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Log filter override, e.g. `LOANBOARD_LOG=loanboard=debug`.
pub const LOG_ENV: &str = "LOANBOARD_LOG";
/// `-v` turns on debug output for this crate only, not its HTTP stack.
const VERBOSE_FILTER: &str = "loanboard=debug";

struct AppContext {
    api: CatalogApi<FileStore>,
    use_color: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let catalog = initialize(&data_dir)?;
    let mut ctx = AppContext {
        api: catalog.api,
        use_color: stdout_supports_color(),
    };

    let outcome = match cli.command.unwrap_or(Commands::List) {
        Commands::List => handle_list(&ctx),
        Commands::Add(fields) => handle_add(&mut ctx, fields),
        Commands::Edit { index, fields } => handle_edit(&mut ctx, &index, fields),
        Commands::Show { index } => handle_show(&ctx, &index),
        Commands::Delete { index, yes } => handle_delete(&mut ctx, &index, yes),
        Commands::Move { index, direction } => handle_move(&mut ctx, &index, direction),
        Commands::Presets { action } => handle_presets(&mut ctx, action),
        Commands::Settings { key, value } => handle_settings(&mut ctx, key, value),
        Commands::Status => handle_status(&ctx),
        Commands::Push => handle_push(&mut ctx).await,
        Commands::Storefront {
            url,
            out,
            watch,
            interval,
        } => handle_storefront(&ctx, url, out, watch, interval).await,
    };

    // Let background pushes finish before the runtime shuts down.
    if ctx.api.pending_syncs() > 0 {
        if let Some(SyncStatus::Failed { error, .. }) = ctx.api.wait_for_sync().await {
            tracing::debug!("background sync ended in failure: {error}");
        }
    }

    outcome
}

fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_products();
    print!(
        "{}",
        render_product_list(&result.listed_products, ctx.use_color)
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: ProductArgs) -> Result<()> {
    let mut draft = ctx.api.new_draft();
    apply_fields(&mut draft, &fields, ctx)?;
    let result = ctx.api.save_product(&draft)?;
    print_messages(&result.messages);
    handle_list(ctx)
}

fn handle_edit(ctx: &mut AppContext, index: &str, fields: ProductArgs) -> Result<()> {
    let mut draft = ctx.api.edit_draft(index)?;
    apply_fields(&mut draft, &fields, ctx)?;
    let result = ctx.api.save_product(&draft)?;
    print_messages(&result.messages);
    handle_list(ctx)
}

fn apply_fields(draft: &mut ProductDraft, fields: &ProductArgs, ctx: &AppContext) -> Result<()> {
    if let Some(name) = &fields.name {
        draft.name = name.clone();
    }
    if let Some(image) = &fields.image {
        draft.image = image.clone();
    }
    if let Some(link) = &fields.link {
        draft.link = link.clone();
    }
    let presets = ctx.api.presets();
    for (category, number) in fields.picks() {
        draft
            .selection
            .select(presets, category, preset_position(number)?)?;
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, index: &str) -> Result<()> {
    let result = ctx.api.show_product(index)?;
    let presets = ctx.api.presets();
    for dp in &result.listed_products {
        let pickers = Selection::for_product(&dp.product, presets).pickers(presets);
        print!("{}", render_product(dp, &pickers, ctx.use_color));
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, index: &str, yes: bool) -> Result<()> {
    let result = ctx
        .api
        .delete_product(index, |product| yes || confirm_delete(index, product))?;
    print_messages(&result.messages);
    if result.mutated {
        handle_list(ctx)?;
    }
    Ok(())
}

fn confirm_delete(index: &str, product: &Product) -> bool {
    print!("Delete product {} \"{}\"? [y/N] ", index, product.name);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => {
            println!();
            false
        }
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}

fn handle_move(ctx: &mut AppContext, index: &str, direction: MoveDirection) -> Result<()> {
    let result = ctx.api.move_product(index, direction)?;
    print_messages(&result.messages);
    if result.mutated {
        handle_list(ctx)?;
    }
    Ok(())
}

fn handle_presets(ctx: &mut AppContext, action: Option<PresetCommands>) -> Result<()> {
    let result = match action.unwrap_or(PresetCommands::List) {
        PresetCommands::List => ctx.api.list_presets(),
        PresetCommands::Add { category } => ctx.api.add_preset(category)?,
        PresetCommands::Set {
            category,
            number,
            value,
            field,
        } => ctx.api.set_preset(category, number, field, &value)?,
        PresetCommands::Rm { category, number } => ctx.api.remove_preset(category, number)?,
        PresetCommands::Edit => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            preset_shell::run(&mut ctx.api, stdin.lock(), &mut stdout, ctx.use_color)?
        }
    };

    if let Some(presets) = &result.presets {
        print!("{}", render_presets(presets, ctx.use_color));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => SettingsAction::ShowAll,
        (Some(key), None) => SettingsAction::ShowKey(key),
        (Some(key), Some(value)) => SettingsAction::Set(key, value),
    };
    let result = ctx.api.settings_action(action)?;
    if !result.mutated {
        if let Some(settings) = &result.settings {
            print!("{}", render_settings(settings, ctx.use_color));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status();
    if let Some(report) = &result.status {
        print!("{}", render_status(report, ctx.use_color));
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_push(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.push_now().await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_storefront(
    ctx: &AppContext,
    url: Option<String>,
    out: Option<PathBuf>,
    watch: bool,
    interval: u64,
) -> Result<()> {
    let url = url
        .or_else(|| ctx.api.settings().storefront_url.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            CatalogError::Api(
                "No storefront URL: pass --url or set storefront-url".to_string(),
            )
        })?;
    if watch && interval == 0 {
        return Err(CatalogError::Validation(
            "--interval must be at least 1 second".to_string(),
        ));
    }

    let sink = out.map(PageSink::File).unwrap_or(PageSink::Stdout);
    let source = Arc::new(HttpSource::new()?);

    if watch {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("cannot listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        };
        storefront::watch(source, url, sink, Duration::from_secs(interval), ctrl_c).await
    } else {
        let count = storefront::refresh(source.as_ref(), &url, &sink).await?;
        tracing::debug!(count, "storefront rendered");
        Ok(())
    }
}
