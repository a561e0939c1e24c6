//! Pricing Service command-line entry point.
//!
//! Reads JSON documents from a file or stdin and writes JSON results to
//! stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use pricing_service::config::PricingConfig;
use pricing_service::models::{ComponentStructure, FeeType, FormFields, PricingType};
use pricing_service::services::{
    default_fields, price_component, price_inputs_from_value, reconcile_metric,
    resolve_pricing_type, restore_form, validate_price_entry, validate_pricing, FieldError,
    MetricCatalog,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::observability::init_tracing;
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pricing-service")]
#[command(about = "Convert, validate and reconcile price component definitions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the pricing type for a fee type
    Resolve {
        /// rate, slot, capacity, usage, extraRecurring or oneTime
        #[arg(long, value_parser = parse_fee_type)]
        fee_type: FeeType,

        /// per_unit, tiered, volume, package or matrix (usage only)
        #[arg(long)]
        usage_model: Option<String>,
    },

    /// Print the initial form fields for a new price entry
    Defaults {
        /// rate, slot, capacity, perUnit, tiered, volume, package, matrix, extraRecurring or oneTime
        #[arg(long, value_parser = parse_pricing_type)]
        pricing_type: PricingType,
    },

    /// Validate a `{pricingType, fields}` document
    Validate {
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Check the pricing shape only, without requiring a billing term
        #[arg(long)]
        shape_only: bool,
    },

    /// Build the price list for a `{structure, fields, currency?}` document
    Convert {
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Currency to use when the document does not name one
        #[arg(short, long)]
        currency: Option<String>,
    },

    /// Restore an edit form from a stored price list
    Restore {
        #[arg(short, long, default_value = "-")]
        input: String,
    },

    /// Reconcile matrix rows against a metric's declared dimensions
    Reconcile {
        #[arg(short, long)]
        metric: String,

        #[arg(short, long, default_value = "-")]
        input: String,
    },
}

fn parse_fee_type(s: &str) -> Result<FeeType, String> {
    FeeType::parse(s).ok_or_else(|| format!("unknown fee type: {}", s))
}

fn parse_pricing_type(s: &str) -> Result<PricingType, String> {
    PricingType::parse(s).ok_or_else(|| format!("unknown pricing type: {}", s))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    pricing_type: PricingType,
    #[serde(default)]
    fields: FormFields,
}

#[derive(Debug, Deserialize)]
struct ConvertRequest {
    structure: ComponentStructure,
    #[serde(default)]
    fields: FormFields,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    errors: &'a [FieldError],
}

fn read_input(input: &str) -> Result<String, AppError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
    println!("{}", json);
    Ok(())
}

/// Print the field errors for the form layer, then fail with a validation exit code.
fn report_validation(errors: &[FieldError]) -> Result<(), AppError> {
    print_json(&ValidationReport {
        valid: errors.is_empty(),
        errors,
    })?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(anyhow::anyhow!(
            "{} field(s) failed validation",
            errors.len()
        )))
    }
}

fn run(command: Commands, config: &PricingConfig) -> Result<(), AppError> {
    match command {
        Commands::Resolve {
            fee_type,
            usage_model,
        } => {
            let pricing_type = resolve_pricing_type(fee_type, usage_model.as_deref());
            print_json(&serde_json::json!({
                "feeType": fee_type,
                "pricingType": pricing_type,
                "wireKind": pricing_type.wire_kind(),
            }))?;
        }

        Commands::Defaults { pricing_type } => {
            print_json(&serde_json::json!({
                "pricingType": pricing_type,
                "fields": default_fields(pricing_type),
            }))?;
        }

        Commands::Validate { input, shape_only } => {
            let request: ValidateRequest = serde_json::from_str(&read_input(&input)?)?;
            let result = if shape_only {
                validate_pricing(request.pricing_type, &request.fields)
            } else {
                validate_price_entry(request.pricing_type, &request.fields)
            };
            let errors = result.err().map(|f| f.errors).unwrap_or_default();
            report_validation(&errors)?;
        }

        Commands::Convert { input, currency } => {
            let request: ConvertRequest = serde_json::from_str(&read_input(&input)?)?;
            let currency = request
                .currency
                .or(currency)
                .unwrap_or_else(|| config.pricing.default_currency.clone());

            match price_component(request.structure, &request.fields, &currency) {
                Ok(component) => {
                    tracing::info!(
                        pricing_type = %component.pricing_type,
                        entries = component.prices.len(),
                        currency = %currency,
                        "Price component converted"
                    );
                    print_json(&component)?;
                }
                Err(pricing_service::error::PricingError::Validation(failure)) => {
                    report_validation(&failure.errors)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Restore { input } => {
            let value: serde_json::Value = serde_json::from_str(&read_input(&input)?)?;
            let prices = price_inputs_from_value(&value)?;
            let restored = restore_form(&prices)?;
            tracing::info!(
                pricing_type = %restored.pricing_type,
                entries = prices.len(),
                "Price form restored"
            );
            print_json(&restored)?;
        }

        Commands::Reconcile { metric, input } => {
            let path = config.pricing.metric_catalog_path.as_ref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("METRIC_CATALOG_PATH is required"))
            })?;
            let catalog = MetricCatalog::from_file(path)?;
            let fields: FormFields = serde_json::from_str(&read_input(&input)?)?;

            let rows = reconcile_metric(&catalog, &metric, &fields.matrix_rows)?;
            tracing::info!(metric_id = %metric, rows = rows.len(), "Matrix reconciled");
            print_json(&rows)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match PricingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.common.log_format,
    );

    tracing::debug!(
        version = %config.service_version,
        default_currency = %config.pricing.default_currency,
        "Starting pricing-service"
    );

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            if let Ok(report) = serde_json::to_string(&e.report()) {
                eprintln!("{}", report);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
