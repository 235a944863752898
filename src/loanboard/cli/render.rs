//! # Rendering Module
//!
//! Turns command results into terminal text through the templates in
//! [`super::templates`], with colors when stdout supports them.
//!
//! Layout calculations (widths, truncation, padding) stay in Rust because they
//! need Unicode-aware processing. Templates only place values and pick styles.

use super::styles::{names, THEME};
use super::templates;
use chrono::{DateTime, Utc};
use console::Term;
use loanboard::api::{CmdMessage, MessageLevel};
use loanboard::commands::StatusReport;
use loanboard::config::Settings;
use loanboard::index::DisplayProduct;
use loanboard::model::{PresetCategory, PresetSet};
use loanboard::selection::PresetPicker;
use loanboard::sync::SyncStatus;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 100;
pub const INDEX_WIDTH: usize = 5;
pub const NAME_WIDTH: usize = 32;
pub const LABEL_WIDTH: usize = 12;

#[derive(Serialize)]
struct ProductLine {
    index: String,
    name: String,
    padding: String,
    summary: String,
}

#[derive(Serialize)]
struct ListData {
    products: Vec<ProductLine>,
    empty: bool,
}

#[derive(Serialize)]
struct Field {
    label: String,
    value: String,
}

#[derive(Serialize)]
struct PickerLine {
    title: String,
    options: Vec<PickerOptionLine>,
}

#[derive(Serialize)]
struct PickerOptionLine {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ProductData {
    index: String,
    name: String,
    fields: Vec<Field>,
    pickers: Vec<PickerLine>,
}

#[derive(Serialize)]
struct PresetCategoryData {
    title: String,
    name: String,
    empty: bool,
    options: Vec<PresetOptionLine>,
}

#[derive(Serialize)]
struct PresetOptionLine {
    number: String,
    label: String,
}

#[derive(Serialize)]
struct PresetsData {
    categories: Vec<PresetCategoryData>,
}

#[derive(Serialize)]
struct SettingRow {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct SettingsData {
    rows: Vec<SettingRow>,
}

#[derive(Serialize)]
struct StatusData {
    generated: String,
    total: usize,
    remote: &'static str,
    remote_style: &'static str,
    target: Option<String>,
    remote_error: Option<String>,
    file_name: String,
    sync: &'static str,
    sync_style: &'static str,
    sync_ago: Option<String>,
    sync_error: Option<String>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub fn stdout_supports_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn environment(use_color: bool) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        THEME.apply(&name, &value.to_string(), use_color)
    });
    for (name, source) in templates::ALL {
        env.add_template(name, source)?;
    }
    Ok(env)
}

fn render<T: Serialize>(name: &str, data: &T, use_color: bool) -> String {
    let rendered = environment(use_color)
        .and_then(|env| env.get_template(name)?.render(data));
    match rendered {
        Ok(mut out) => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        Err(e) => format!("Render error: {}\n", e),
    }
}

pub fn render_product_list(products: &[DisplayProduct], use_color: bool) -> String {
    let lines = products
        .iter()
        .map(|dp| {
            let index = format!("{:>width$} ", format!("{}.", dp.index), width = INDEX_WIDTH - 1);
            let name = truncate_to_width(&dp.product.name, NAME_WIDTH);
            let padding = " ".repeat(NAME_WIDTH.saturating_sub(name.width()) + 1);
            let available = LINE_WIDTH.saturating_sub(INDEX_WIDTH + NAME_WIDTH + 1);
            let summary = truncate_to_width(&product_summary(dp), available);
            ProductLine {
                index,
                name,
                padding,
                summary,
            }
        })
        .collect::<Vec<_>>();

    let data = ListData {
        empty: lines.is_empty(),
        products: lines,
    };
    render("list", &data, use_color)
}

fn product_summary(dp: &DisplayProduct) -> String {
    let p = &dp.product;
    let amount = format!("{} {}", p.amount, p.unit);
    [amount.trim(), p.period.as_str(), p.discount.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn render_product(dp: &DisplayProduct, pickers: &[PresetPicker], use_color: bool) -> String {
    let p = &dp.product;
    let fields = [
        ("Image", &p.image),
        ("Link", &p.link),
        ("Amount", &format!("{} {}", p.amount, p.unit)),
        ("Procedure", &p.procedure),
        ("Period", &p.period),
        ("Age", &p.age),
        ("Promotion", &p.promotion),
        ("Discount", &p.discount),
    ]
    .iter()
    .map(|(label, value)| Field {
        label: pad_label(label),
        value: value.trim().to_string(),
    })
    .collect();

    let pickers = pickers
        .iter()
        .map(|picker| PickerLine {
            title: pad_label(&picker.title),
            options: picker
                .options
                .iter()
                .map(|o| PickerOptionLine {
                    text: format!("{}. {}", o.number, o.label),
                    style: if o.selected {
                        names::SELECTED
                    } else {
                        names::MUTED
                    },
                })
                .collect(),
        })
        .collect();

    let data = ProductData {
        index: format!("{}.", dp.index),
        name: p.name.clone(),
        fields,
        pickers,
    };
    render("product", &data, use_color)
}

pub fn render_presets(presets: &PresetSet, use_color: bool) -> String {
    let categories = PresetCategory::ALL
        .iter()
        .map(|&category| {
            let options: Vec<_> = presets
                .labels(category)
                .into_iter()
                .enumerate()
                .map(|(i, label)| PresetOptionLine {
                    number: format!("{:>4}.", i + 1),
                    label,
                })
                .collect();
            PresetCategoryData {
                title: category.title().to_string(),
                name: format!("({})", category.as_str()),
                empty: options.is_empty(),
                options,
            }
        })
        .collect();
    render("presets", &PresetsData { categories }, use_color)
}

pub fn render_settings(settings: &Settings, use_color: bool) -> String {
    let width = settings
        .list_all()
        .iter()
        .map(|(k, _)| k.width())
        .max()
        .unwrap_or(0);
    let rows = settings
        .list_all()
        .into_iter()
        .map(|(key, value)| SettingRow {
            key: format!("{:<width$}", key, width = width),
            value,
        })
        .collect();
    render("settings", &SettingsData { rows }, use_color)
}

pub fn render_status(report: &StatusReport, use_color: bool) -> String {
    let (remote, remote_style) = if report.remote_configured {
        ("configured", names::SUCCESS)
    } else {
        ("not configured", names::MUTED)
    };
    let sync_style = match report.sync {
        SyncStatus::Idle => names::MUTED,
        SyncStatus::Pending { .. } => names::WARNING,
        SyncStatus::Synced { .. } => names::SUCCESS,
        SyncStatus::Failed { .. } => names::ERROR,
    };
    let sync_error = match &report.sync {
        SyncStatus::Failed {
            attempts, error, ..
        } => Some(format!("{} (after {} attempt(s))", error, attempts)),
        _ => None,
    };

    let data = StatusData {
        generated: report
            .generated_at
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string(),
        total: report.total_products,
        remote,
        remote_style,
        target: report.remote_target.clone(),
        remote_error: report.remote_error.clone(),
        file_name: report.file_name.clone(),
        sync: report.sync.label(),
        sync_style,
        sync_ago: report.sync.timestamp().map(format_time_ago),
        sync_error,
    };
    render("status", &data, use_color)
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let messages = messages
        .iter()
        .map(|msg| MessageData {
            content: msg.content.clone(),
            style: match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
                MessageLevel::Error => names::ERROR,
            },
        })
        .collect();
    render("messages", &MessagesData { messages }, use_color)
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, stdout_supports_color()));
}

fn pad_label(label: &str) -> String {
    format!(
        "{}{}",
        label,
        " ".repeat(LABEL_WIDTH.saturating_sub(label.width()))
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
