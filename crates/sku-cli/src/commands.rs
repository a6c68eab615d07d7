use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, info_span, warn};

use sku_core::{
    CheckOptions, Encoded, Selection, SelectionError, Selections, assemble, check_category,
    check_inventory, default_selection, encode, join_description, matrix_size, ordered_extras,
    ordered_fields, ordered_options, select_extras,
};
use sku_model::{
    Category, CategoryReport, Extra, ExtrasMode, Field, Inventory, IssueSeverity, ModelError,
    SkuOption,
};
use sku_report::{ExportOptions, export_matrix, plan_export};
use sku_store::{ConfigStore, JsonFileStore, fingerprint, parse_configuration};

use crate::cli::{
    AssembleArgs, CategoryCommand, CheckArgs, ExtraCommand, ExtrasModeArg, FieldCommand,
    ImportArgs, InitArgs, ItemChange, MatrixArgs, OptionCommand, ShowArgs,
};
use crate::types::{
    AssembleResult, CategoriesResult, CategorySummary, CheckResult, FieldSummary, MatrixResult,
    SavedResult, ShowResult,
};

/// Load the configuration, or the factory default when the file is absent.
pub fn load_config(config_path: &Path) -> Result<Inventory> {
    let store = JsonFileStore::new(config_path);
    store
        .load_or_default()
        .with_context(|| format!("load configuration from {}", config_path.display()))
}

pub fn run_categories(config_path: &Path) -> Result<CategoriesResult> {
    let inventory = load_config(config_path)?;
    let fingerprint = fingerprint(&inventory)?;
    let categories = inventory
        .categories()
        .iter()
        .map(|category| CategorySummary {
            name: category.name.clone(),
            fields: category.fields.len(),
            extras: category.extras.len(),
            extras_mode: category.settings.extras_mode,
            separator: category.settings.separator.clone(),
            rows: matrix_size(category).rows(),
        })
        .collect();
    Ok(CategoriesResult {
        config_path: config_path.to_path_buf(),
        fingerprint,
        categories,
    })
}

pub fn run_show(config_path: &Path, args: &ShowArgs) -> Result<ShowResult> {
    let inventory = load_config(config_path)?;
    let category = inventory.require(&args.category)?;
    let fields = ordered_fields(&category.fields)
        .into_iter()
        .map(|field| FieldSummary {
            name: field.name.clone(),
            order: field.order,
            kind: field.kind(),
            options: ordered_options(field)
                .into_iter()
                .map(SkuOption::label)
                .collect(),
        })
        .collect();
    Ok(ShowResult {
        category: category.name.clone(),
        settings: category.settings.clone(),
        fields,
        extras: ordered_extras(category)
            .into_iter()
            .map(Extra::label)
            .collect(),
        size: matrix_size(category),
    })
}

pub fn run_assemble(config_path: &Path, args: &AssembleArgs) -> Result<AssembleResult> {
    let inventory = load_config(config_path)?;
    let category = inventory.require(&args.category)?;
    let span = info_span!("assemble", category = %category.name);
    let _guard = span.enter();
    log_issues(&check_category(category, &CheckOptions::default()));

    let requested = parse_selections(&args.select)?;
    if let Some(unknown) = requested
        .keys()
        .find(|name| category.field(name.as_str()).is_none())
    {
        return Err(SelectionError::UnknownField {
            field: unknown.clone(),
        }
        .into());
    }

    let mut selections = Selections::new();
    let mut labels = Vec::new();
    for field in ordered_fields(&category.fields) {
        let encoded = match requested.get(&field.name) {
            Some(value) => encode(field, Selection::Value(value)),
            None => default_selection(field),
        };
        // An empty dropdown contributes nothing; every other failure is fatal.
        let encoded = match encoded {
            Ok(encoded) => encoded,
            Err(error @ SelectionError::NoOptionsAvailable { .. }) => {
                warn!(field = %field.name, "{error}");
                Encoded::default()
            }
            Err(error) => return Err(error.into()),
        };
        selections.insert(field.name.clone(), encoded.code);
        labels.push(encoded.label);
    }

    let codes: Vec<&str> = args.extras.iter().map(String::as_str).collect();
    let extras = select_extras(category, &codes)?;
    let sku = assemble(category, &selections, &extras);
    let description = join_description(
        labels.iter().map(String::as_str),
        extras.iter().map(|extra| extra.name.as_str()),
    );
    info!(%sku, "assembled");
    Ok(AssembleResult {
        category: category.name.clone(),
        sku,
        description,
    })
}

/// Parse repeated `FIELD=VALUE` arguments; a later value for the same
/// field wins.
pub fn parse_selections(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(field, value)| (field.trim().to_string(), value.to_string()))
                .filter(|(field, _)| !field.is_empty())
                .ok_or_else(|| anyhow!("invalid selection {entry:?}: expected FIELD=VALUE"))
        })
        .collect()
}

fn log_issues(report: &CategoryReport) {
    for issue in &report.issues {
        match issue.severity {
            IssueSeverity::Error => {
                error!(category = %report.category, kind = ?issue.kind, "{}", issue.message);
            }
            IssueSeverity::Warning => {
                warn!(category = %report.category, kind = ?issue.kind, "{}", issue.message);
            }
        }
    }
}

pub fn run_check(config_path: &Path, args: &CheckArgs) -> Result<CheckResult> {
    let inventory = load_config(config_path)?;
    let options = if args.strict {
        CheckOptions::strict()
    } else {
        CheckOptions::default()
    };
    Ok(CheckResult {
        reports: check_inventory(&inventory, &options),
    })
}

pub fn run_matrix(config_path: &Path, args: &MatrixArgs) -> Result<MatrixResult> {
    let inventory = load_config(config_path)?;
    let fingerprint = fingerprint(&inventory)?;
    let categories: Vec<&Category> = match &args.category {
        Some(name) => vec![inventory.require(name)?],
        None => inventory.categories().iter().collect(),
    };
    let options = ExportOptions::default()
        .with_max_rows((!args.no_limit).then_some(args.max_rows))
        .with_field_columns(args.field_columns)
        .with_extras_column(args.extras_column);

    // Refuse before the output file is created or truncated.
    let planned = plan_export(&categories, &options)?;
    info!(
        rows = planned.total_rows,
        categories = planned.categories.len(),
        %fingerprint,
        "exporting matrix"
    );

    let plan = match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let progress = progress_bar(planned.total_rows);
            let plan = export_matrix(&categories, file, &options, |rows| {
                progress.set_position(rows);
            })?;
            progress.finish_and_clear();
            plan
        }
        None => export_matrix(&categories, io::stdout().lock(), &options, |_| {})?,
    };
    Ok(MatrixResult {
        output: args.output.clone(),
        fingerprint,
        plan,
    })
}

fn progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")
    {
        progress.set_style(style);
    }
    progress
}

pub fn run_init(config_path: &Path, args: &InitArgs) -> Result<SavedResult> {
    let store = JsonFileStore::new(config_path);
    let inventory = store.initialize(args.force)?;
    Ok(SavedResult {
        config_path: config_path.to_path_buf(),
        fingerprint: fingerprint(&inventory)?,
        message: format!("wrote factory default with {} categories", inventory.len()),
    })
}

pub fn run_import(config_path: &Path, args: &ImportArgs) -> Result<SavedResult> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let inventory = parse_configuration(&bytes, &args.file)?;
    JsonFileStore::new(config_path).save(&inventory)?;
    Ok(SavedResult {
        config_path: config_path.to_path_buf(),
        fingerprint: fingerprint(&inventory)?,
        message: format!(
            "imported {} categories from {}",
            inventory.len(),
            args.file.display()
        ),
    })
}

/// Load, apply `edit`, and save the result atomically.
fn edit_config(
    config_path: &Path,
    edit: impl FnOnce(&mut Inventory) -> Result<String>,
) -> Result<SavedResult> {
    let store = JsonFileStore::new(config_path);
    let mut inventory = load_config(config_path)?;
    let message = edit(&mut inventory)?;
    store.save(&inventory)?;
    Ok(SavedResult {
        config_path: config_path.to_path_buf(),
        fingerprint: fingerprint(&inventory)?,
        message,
    })
}

fn require_mut<'a>(inventory: &'a mut Inventory, name: &str) -> Result<&'a mut Category> {
    Ok(inventory
        .get_mut(name)
        .ok_or_else(|| ModelError::UnknownCategory {
            name: name.to_string(),
        })?)
}

pub fn run_category(config_path: &Path, command: &CategoryCommand) -> Result<SavedResult> {
    edit_config(config_path, |inventory| match command {
        CategoryCommand::Add { name } => {
            inventory.add_category(name)?;
            Ok(format!("added category {name}"))
        }
        CategoryCommand::Remove { name } => {
            let removed = inventory.remove_category(name)?;
            Ok(format!(
                "removed category {name} ({} fields, {} extras)",
                removed.fields.len(),
                removed.extras.len()
            ))
        }
        CategoryCommand::Settings(args) => {
            let category = require_mut(inventory, &args.name)?;
            if let Some(separator) = &args.separator {
                category.settings.separator.clone_from(separator);
            }
            if let Some(mode) = args.extras_mode {
                category.settings.extras_mode = match mode {
                    ExtrasModeArg::Single => ExtrasMode::Single,
                    ExtrasModeArg::Multiple => ExtrasMode::Multiple,
                };
            }
            Ok(format!(
                "{}: separator {:?}, extras mode {:?}",
                category.name, category.settings.separator, category.settings.extras_mode
            ))
        }
    })
}

pub fn run_field(config_path: &Path, command: &FieldCommand) -> Result<SavedResult> {
    edit_config(config_path, |inventory| match command {
        FieldCommand::Add(args) => {
            let category = require_mut(inventory, &args.category)?;
            let order = args
                .order
                .unwrap_or_else(|| next_order(category.fields.iter().map(|field| field.order)));
            let field = if args.free_text {
                Field::free_text(args.name.as_str(), Some(order))
            } else {
                Field::dropdown(args.name.as_str(), Some(order), Vec::new())
            };
            category.add_field(field)?;
            Ok(format!("added field {} to {}", args.name, args.category))
        }
        FieldCommand::Remove { category, name } => {
            require_mut(inventory, category)?.remove_field(name)?;
            Ok(format!("removed field {name} from {category}"))
        }
        FieldCommand::Set {
            category,
            name,
            order,
        } => {
            require_mut(inventory, category)?.field_mut(name)?.order = Some(*order);
            Ok(format!("moved field {name} in {category} to order {order}"))
        }
    })
}

pub fn run_option(config_path: &Path, command: &OptionCommand) -> Result<SavedResult> {
    edit_config(config_path, |inventory| match command {
        OptionCommand::Add(args) => {
            let field = require_mut(inventory, &args.category)?.field_mut(&args.field)?;
            let order = args
                .order
                .unwrap_or_else(|| next_order(field.options().iter().map(|option| option.order)));
            let option = SkuOption::new(args.code.as_str(), args.name.as_str(), Some(order));
            let label = option.label();
            field.add_option(option)?;
            Ok(format!("added option {label} to {}", args.field))
        }
        OptionCommand::Remove(args) => {
            let removed = require_mut(inventory, &args.category)?
                .field_mut(&args.field)?
                .remove_option(&args.code)?;
            Ok(format!("removed option {} from {}", removed.label(), args.field))
        }
        OptionCommand::Set(args) => {
            let target = &args.option;
            let option = require_mut(inventory, &target.category)?
                .field_mut(&target.field)?
                .option_mut(&target.code)?;
            apply_change(&args.change, &mut option.name, &mut option.order);
            Ok(format!("updated option {} in {}", option.label(), target.field))
        }
    })
}

pub fn run_extra(config_path: &Path, command: &ExtraCommand) -> Result<SavedResult> {
    edit_config(config_path, |inventory| match command {
        ExtraCommand::Add(args) => {
            let category = require_mut(inventory, &args.category)?;
            let order = args
                .order
                .unwrap_or_else(|| next_order(category.extras.iter().map(|extra| extra.order)));
            let extra = Extra::new(args.code.as_str(), args.name.as_str(), Some(order));
            let label = extra.label();
            category.extras.push(extra);
            Ok(format!("added extra {label} to {}", args.category))
        }
        ExtraCommand::Remove { category, code } => {
            let removed = require_mut(inventory, category)?.remove_extra(code)?;
            Ok(format!("removed extra {} from {category}", removed.label()))
        }
        ExtraCommand::Set(args) => {
            let extra = require_mut(inventory, &args.category)?.extra_mut(&args.code)?;
            apply_change(&args.change, &mut extra.name, &mut extra.order);
            Ok(format!("updated extra {} in {}", extra.label(), args.category))
        }
    })
}

fn apply_change(change: &ItemChange, name: &mut String, order: &mut Option<i64>) {
    if let Some(new_name) = &change.name {
        name.clone_from(new_name);
    }
    if let Some(new_order) = change.order {
        *order = Some(new_order);
    }
}

/// One past the highest explicit order, or 1.
fn next_order(orders: impl Iterator<Item = Option<i64>>) -> i64 {
    orders
        .flatten()
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
