//! # Commands
//!
//! Loads item specs, drives the cart, renders the result.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  spec file ──► load_specs() ──► Cart::add(all specs, one call)         │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              Cart::remove(id) for each --remove         │
//! │                              (misses are reported, not fatal)           │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                      render totals / items as text or JSON              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use basket_core::{CartTotals, LineItem, LineItemSpec, RemoveOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::{CartInput, Commands};
use crate::config::{CliConfig, OutputFormat};
use crate::error::CliError;
use crate::state::CartState;

/// Reads a JSON array of item specs.
pub fn load_specs(path: &Path) -> Result<Vec<LineItemSpec>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let specs: Vec<LineItemSpec> =
        serde_json::from_str(&raw).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), count = specs.len(), "loaded item specs");
    Ok(specs)
}

/// Outcome of one requested removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalReport {
    pub id: u64,
    pub removed: bool,
}

/// Fills the shared cart from `input` and applies its removals.
pub fn populate(state: &CartState, input: &CartInput) -> Result<Vec<RemovalReport>, CliError> {
    let specs = load_specs(&input.file)?;
    state.with_cart_mut(|cart| cart.add(specs))??;

    let mut reports = Vec::with_capacity(input.remove.len());
    for &id in &input.remove {
        let outcome = state.with_cart_mut(|cart| cart.remove(id))?;
        if outcome == RemoveOutcome::NotFound {
            warn!(id, "no item with this id in cart, nothing removed");
        }
        reports.push(RemovalReport {
            id,
            removed: outcome.is_removed(),
        });
    }

    Ok(reports)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsResponse<'a> {
    cart: &'a str,
    created_at: DateTime<Utc>,
    totals: CartTotals,
    grand_total: f64,
    removals: &'a [RemovalReport],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemsResponse<'a> {
    cart: &'a str,
    created_at: DateTime<Utc>,
    items: &'a [LineItem],
    removals: &'a [RemovalReport],
}

/// Runs the selected command and returns what should go to stdout.
pub fn run(command: &Commands, config: &CliConfig) -> Result<String, CliError> {
    let state = CartState::new(config.cart_name.clone());
    let removals = populate(&state, command.input())?;
    let created_at = state.with_cart(|cart| cart.created_at())?;

    match command {
        Commands::Totals(_) => {
            let (totals, grand_total) =
                state.with_cart(|cart| (cart.totals(), cart.grand_total()))?;
            info!(cart = %config.cart_name, grand_total, "computed cart totals");

            match config.output {
                OutputFormat::Json => to_json(&TotalsResponse {
                    cart: &config.cart_name,
                    created_at,
                    totals,
                    grand_total,
                    removals: &removals,
                }),
                OutputFormat::Text => Ok(render_totals(
                    &config.cart_name,
                    &totals,
                    grand_total,
                    &removals,
                )),
            }
        }
        Commands::Items(_) => {
            let items = state.with_cart(|cart| cart.items())?;
            info!(cart = %config.cart_name, count = items.len(), "listed cart items");

            match config.output {
                OutputFormat::Json => to_json(&ItemsResponse {
                    cart: &config.cart_name,
                    created_at,
                    items: &items,
                    removals: &removals,
                }),
                OutputFormat::Text => Ok(render_items(&config.cart_name, &items, &removals)),
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::Encode)
}

// =============================================================================
// Text Rendering
// =============================================================================

pub fn render_totals(
    cart: &str,
    totals: &CartTotals,
    grand_total: f64,
    removals: &[RemovalReport],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cart: {}", cart);
    let _ = writeln!(out, "  {:<16}{:>12}", "Quantity", totals.total_qty);
    let _ = writeln!(out, "  {:<16}{:>12.2}", "Subtotal", totals.total_price);
    let _ = writeln!(out, "  {:<16}{:>12.2}", "Tax", totals.total_tax_amt);
    let _ = writeln!(out, "  {:<16}{:>12.2}", "Flat discounts", totals.total_discount_amt);
    let _ = writeln!(out, "  {:<16}{:>12.2}", "Grand total", grand_total);
    render_removals(&mut out, removals);
    out
}

pub fn render_items(cart: &str, items: &[LineItem], removals: &[RemovalReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cart: {} ({} items)", cart, items.len());
    let _ = writeln!(
        out,
        "  {:>6}  {:<24}{:>6}{:>10}{:>10}{:>10}{:>10}",
        "ID", "Name", "Qty", "Total", "Tax", "Discount", "Final"
    );
    for item in items {
        let _ = writeln!(
            out,
            "  {:>6}  {:<24}{:>6}{:>10.2}{:>10.2}{:>10.2}{:>10.2}",
            item.id(),
            item.name(),
            item.qty(),
            item.total(),
            item.tax_amt(),
            item.final_discount(),
            item.final_price()
        );
    }
    render_removals(&mut out, removals);
    out
}

fn render_removals(out: &mut String, removals: &[RemovalReport]) {
    for report in removals.iter().filter(|r| !r.removed) {
        let _ = writeln!(out, "  note: no item with id {} found in cart", report.id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn spec_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn input(file: &NamedTempFile, remove: Vec<u64>) -> CartInput {
        CartInput {
            file: file.path().to_path_buf(),
            remove,
        }
    }

    const SPECS: &str = r#"[
        { "id": 1, "name": "Apple", "price": 0.5, "qty": 4, "taxRate": 10 },
        { "id": 2, "name": " Bread ", "price": 3.0, "qty": 1, "taxRate": 5, "discountAmt": 0.15 },
        { "id": 1, "name": "Apple", "price": 0.5, "qty": 2, "taxRate": 10 }
    ]"#;

    #[test]
    fn test_load_specs_reads_camel_case() {
        let file = spec_file(SPECS);
        let specs = load_specs(file.path()).unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1].discount_amt, 0.15);
        assert_eq!(specs[1].tax_rate, Some(5.0));
    }

    #[test]
    fn test_load_specs_missing_file() {
        let err = load_specs(&PathBuf::from("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IoError);
    }

    #[test]
    fn test_load_specs_bad_json() {
        let file = spec_file("{ not json");
        let err = load_specs(file.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[test]
    fn test_populate_merges_and_reports_removals() {
        let file = spec_file(SPECS);
        let state = CartState::new("test");

        let reports = populate(&state, &input(&file, vec![2, 9])).unwrap();

        assert_eq!(
            reports,
            vec![
                RemovalReport { id: 2, removed: true },
                RemovalReport { id: 9, removed: false },
            ]
        );
        let (len, qty) = state
            .with_cart(|cart| (cart.len(), cart.get(1).map(|i| i.qty())))
            .unwrap();
        assert_eq!(len, 1);
        assert_eq!(qty, Some(6));
    }

    #[test]
    fn test_populate_rejects_invalid_item() {
        let file = spec_file(r#"[{ "id": 1.5, "name": "Bad", "price": 1, "qty": 1, "taxRate": 5 }]"#);
        let state = CartState::new("test");

        let err = populate(&state, &input(&file, vec![])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Invalid Id");
        assert!(state.with_cart(|cart| cart.is_empty()).unwrap());
    }

    #[test]
    fn test_run_totals_json() {
        let file = spec_file(SPECS);
        let config = CliConfig {
            cart_name: "lane-1".to_string(),
            output: OutputFormat::Json,
            verbose: false,
        };

        let out = run(&Commands::Totals(input(&file, vec![])), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["cart"], "lane-1");
        assert!(value["createdAt"]
            .as_str()
            .is_some_and(|ts| ts.parse::<DateTime<Utc>>().is_ok()));
        assert_eq!(value["totals"]["totalQty"], 7);
        let grand_total = value["grandTotal"].as_f64().unwrap();
        // Apple: 3.0 + 0.3, Bread: 3.0 + 0.15 - 0.15
        assert!((grand_total - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_run_items_text() {
        let file = spec_file(SPECS);
        let config = CliConfig::default();

        let out = run(&Commands::Items(input(&file, vec![42])), &config).unwrap();

        assert!(out.starts_with("Cart: default (2 items)"));
        assert!(out.contains("Apple"));
        assert!(out.contains("Bread"));
        assert!(out.contains("no item with id 42 found in cart"));
    }

    #[test]
    fn test_run_items_json_carries_timestamp() {
        let file = spec_file(SPECS);
        let config = CliConfig {
            output: OutputFormat::Json,
            ..CliConfig::default()
        };
        let before = Utc::now();

        let out = run(&Commands::Items(input(&file, vec![])), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let created_at: DateTime<Utc> = value["createdAt"].as_str().unwrap().parse().unwrap();
        assert!(created_at >= before);
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_populate_reports_wrong_json_type_as_field_error() {
        let file = spec_file(r#"[{ "id": 1, "name": null, "price": 1, "qty": 1, "taxRate": 5 }]"#);
        let state = CartState::new("test");

        let err = populate(&state, &input(&file, vec![])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Invalid Name");
    }

    #[test]
    fn test_demo_cart_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/cart.json");
        let state = CartState::new("demo");

        populate(&state, &CartInput { file: path, remove: vec![] }).unwrap();

        let (len, coffee_qty) = state
            .with_cart(|cart| (cart.len(), cart.get(1).map(|i| i.qty())))
            .unwrap();
        assert_eq!(len, 3);
        assert_eq!(coffee_qty, Some(3));
    }

    #[test]
    fn test_render_totals_text() {
        let totals = CartTotals {
            total_qty: 3,
            total_price: 50.0,
            total_tax_amt: 0.0,
            total_discount_amt: 0.0,
            total_final_price: 50.0,
        };

        let out = render_totals("demo", &totals, 50.0, &[]);
        assert!(out.contains("Quantity"));
        assert!(out.contains("50.00"));
        assert!(!out.contains("note:"));
    }
}
