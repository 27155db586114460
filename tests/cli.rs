//! E2E tests for the income, compare, brackets and products commands

use std::process::{Command, Output};

fn taxsaver(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taxsaver"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Official reference: 82 341 € for one part on revenus 2023
#[test]
fn income_reference_amount() {
    let output = taxsaver(&["income", "--income", "82341"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("revenus 2023 (barème 2024)"));
    assert!(stdout.contains("Gross tax: 17 988,53 €"));
    assert!(stdout.contains("Net tax: 17 988,53 €"));
    assert!(stdout.contains("Marginal rate: 30 %"));
}

#[test]
fn income_couple_with_children_json() {
    let output = taxsaver(&[
        "income", "--income", "80000", "--status", "couple", "--children", "2", "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["parts"], "3");
    assert_eq!(json["gross_tax"], "5072.98");
    assert_eq!(json["decote"], "0.00");
    assert_eq!(json["net_tax"], "5072.98");
    assert_eq!(json["marginal_rate_pct"], "11");
    assert_eq!(json["brackets"].as_array().map(Vec::len), Some(5));
}

#[test]
fn income_zero_has_no_effective_rate() {
    let output = taxsaver(&["income", "--income", "0", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["net_tax"], "0.00");
    assert!(json.get("effective_rate_pct").is_none());
}

#[test]
fn income_details_table() {
    let output = taxsaver(&["income", "-i", "50000", "--details"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Taxable (per part)"));
    assert!(stdout.contains("1 925,33 €"));
}

#[test]
fn income_rejects_unsupported_year() {
    let output = taxsaver(&["income", "--income", "50000", "--year", "2015"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no tax tables for income year 2015"));
}

#[test]
fn income_rejects_non_numeric_income() {
    let output = taxsaver(&["income", "--income", "lots"]);
    assert!(!output.status.success());
}

#[test]
fn compare_default_iphone_bnc() {
    let output = taxsaver(&["compare", "--details"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("PURCHASE: iPhone"));
    assert!(stdout.contains("Gain from buying through the company: 1 683,33 €"));
    assert!(stdout.contains("Personal purchase cost: 2 083,33 €"));
    assert!(stdout.contains("Company purchase cost: 400,00 €"));
    assert!(stdout.contains("in favour of the company purchase"));
}

#[test]
fn compare_salary_without_vat_recovery_json() {
    let output = taxsaver(&[
        "compare",
        "--product",
        "car",
        "--remuneration",
        "salary",
        "--no-vat-recovery",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["product"], "Car");
    assert_eq!(json["marginal_rate_pct"], "30");
    assert_eq!(json["personal_cost"], "28571.43");
    assert_eq!(json["company_cost"], "5000.00");
    assert_eq!(json["vat_recovered"], false);
    assert_eq!(json["recommended"], "company");
}

#[test]
fn compare_other_requires_price() {
    let output = taxsaver(&["compare", "--product", "other"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("a price is required for product 'Other'"));
}

#[test]
fn compare_other_with_price() {
    let output = taxsaver(&["compare", "-p", "other", "--price", "600", "--income", "20000", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["price_ht"], "500.00");
    assert_eq!(json["marginal_rate_pct"], "11");
}

#[test]
fn brackets_table_and_csv() {
    let output = taxsaver(&["brackets"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Up to 11 294 €"));
    assert!(stdout.contains("Over 177 106 €"));
    assert!(stdout.contains("DECOTE"));

    let output = taxsaver(&["brackets", "--year", "2022", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("taxable_income_per_part,rate_pct"));
    assert!(stdout.contains("Up to 10 777 €,0"));
}

#[test]
fn products_csv() {
    let output = taxsaver(&["products", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("name,price_ttc,vat_rate,price_ht"));
    assert!(stdout.contains("Mac,2000.00,20,1666.67"));
    assert!(stdout.contains("Restaurant,20.00,10,18.18"));
}
