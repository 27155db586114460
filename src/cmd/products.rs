//! Products command - the purchase catalog

use crate::cmd::render_table;
use crate::money::{format_eur, format_rate, plain};
use crate::tax::purchase::{price_excluding_vat, Product, PRODUCTS};
use crate::utils::write_csv;
use clap::Args;
use serde::Serialize;
use std::io;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct ProductsCommand {
    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price TTC")]
    price_ttc: String,
    #[tabled(rename = "VAT")]
    vat_rate: String,
    #[tabled(rename = "Price HT")]
    price_ht: String,
}

impl ProductsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.csv {
            let rows = PRODUCTS
                .iter()
                .map(csv_row)
                .collect::<anyhow::Result<Vec<_>>>()?;
            return write_csv(rows, io::stdout());
        }

        let rows = PRODUCTS
            .iter()
            .map(table_row)
            .collect::<anyhow::Result<Vec<_>>>()?;
        println!("{}", render_table(&rows));
        Ok(())
    }
}

fn table_row(product: &Product) -> anyhow::Result<ProductRow> {
    if product.is_custom() {
        return Ok(ProductRow {
            name: product.name.to_string(),
            price_ttc: "--price".to_string(),
            vat_rate: format_rate(product.vat_rate),
            price_ht: String::new(),
        });
    }
    Ok(ProductRow {
        name: product.name.to_string(),
        price_ttc: format_eur(product.price),
        vat_rate: format_rate(product.vat_rate),
        price_ht: format_eur(price_excluding_vat(product.price, product.vat_rate)?),
    })
}

fn csv_row(product: &Product) -> anyhow::Result<ProductRow> {
    Ok(ProductRow {
        name: product.name.to_string(),
        price_ttc: plain(product.price),
        vat_rate: product.vat_rate.normalize().to_string(),
        price_ht: plain(price_excluding_vat(product.price, product.vat_rate)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::purchase::{OTHER, RESTAURANT};

    #[test]
    fn table_row_shows_ht_price() {
        let row = table_row(&RESTAURANT).unwrap();
        assert_eq!(row.price_ttc, "20,00 €");
        assert_eq!(row.vat_rate, "10 %");
        assert_eq!(row.price_ht, "18,18 €");
    }

    #[test]
    fn custom_product_has_no_catalog_price() {
        let row = table_row(&OTHER).unwrap();
        assert_eq!(row.price_ttc, "--price");
        assert!(row.price_ht.is_empty());
    }

    #[test]
    fn csv_row_uses_plain_numbers() {
        let row = csv_row(&RESTAURANT).unwrap();
        assert_eq!(row.price_ttc, "20.00");
        assert_eq!(row.vat_rate, "10");
        assert_eq!(row.price_ht, "18.18");
    }
}
