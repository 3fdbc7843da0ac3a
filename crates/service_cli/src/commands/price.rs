//! Price command implementation
//!
//! Converts the submitted form into a validated input, prices it with the
//! Monte Carlo engine and renders the estimate as a table or JSON.

use pricer_core::types::PricingInput;
use pricer_pricing::{price_option, PricingResult};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::form::{parse_form, Form};
use crate::Result;

/// Priced request, as written to stdout.
#[derive(Debug, Serialize)]
pub struct PriceReport<'a> {
    /// Validated inputs the estimate was computed from
    pub input: &'a PricingInput,
    /// Present value estimate
    pub price: f64,
    /// Standard error of the estimate
    pub std_error: f64,
    /// 95% confidence interval half-width
    pub confidence_95: f64,
    /// 99% confidence interval half-width
    pub confidence_99: f64,
    /// Seed used, if the run was seeded
    pub seed: Option<u64>,
}

impl<'a> PriceReport<'a> {
    /// Build a report from an input and its estimate
    pub fn new(input: &'a PricingInput, result: &PricingResult, seed: Option<u64>) -> Self {
        Self {
            input,
            price: result.price,
            std_error: result.std_error,
            confidence_95: result.confidence_95(),
            confidence_99: result.confidence_99(),
            seed,
        }
    }
}

/// Run the price command
pub fn run(config: &CliConfig, form: &Form) -> Result<()> {
    let input = parse_form(form, &config.defaults)?;

    info!(
        spot = input.spot(),
        rate = input.rate(),
        volatility = input.volatility(),
        maturity = input.maturity(),
        simulations = input.simulations() as u64,
        payoff = input.payoff(),
        "Starting pricing"
    );

    let result = price_option(&input, config.seed)?;
    let report = PriceReport::new(&input, &result, config.seed);

    println!("{}", render(&report, config.format)?);

    info!(price = result.price, std_error = result.std_error, "Pricing complete");
    Ok(())
}

/// Render a report in the requested format
pub fn render(report: &PriceReport<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_table(report: &PriceReport<'_>) -> String {
    let seed = report
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());
    let rows = [
        ("Price", format!("{:.4}", report.price)),
        ("Std error", format!("{:.4}", report.std_error)),
        ("95% CI", format!("± {:.4}", report.confidence_95)),
        ("99% CI", format!("± {:.4}", report.confidence_99)),
        ("Spot", report.input.spot().to_string()),
        ("Rate", report.input.rate().to_string()),
        ("Volatility", report.input.volatility().to_string()),
        ("Maturity", report.input.maturity().to_string()),
        ("Simulations", report.input.simulations().to_string()),
        ("Payoff", report.input.payoff().to_string()),
        ("Seed", seed),
    ];

    let key_width = rows
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0)
        .max("Field".len());
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0)
        .max("Value".len());

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{right}",
            "─".repeat(key_width + 2),
            "─".repeat(value_width + 2)
        )
    };
    let row = |key: &str, value: &str| {
        let key_pad = key_width - key.chars().count();
        let value_pad = value_width - value.chars().count();
        format!(
            "│ {key}{} │ {value}{} │",
            " ".repeat(key_pad),
            " ".repeat(value_pad)
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule("┌", "┬", "┐"));
    lines.push(row("Field", "Value"));
    lines.push(rule("├", "┼", "┤"));
    for (key, value) in &rows {
        lines.push(row(key, value));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}
