use clap::{Parser, Subcommand};
use taxsaver::cmd::{
    brackets::BracketsCommand, compare::CompareCommand, income::IncomeCommand,
    products::ProductsCommand,
};

#[derive(Parser, Debug)]
#[command(
    name = "taxsaver",
    version,
    about = "French income tax and company vs. personal purchase calculators"
)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income tax for a household, with decote and high income contribution
    Income(IncomeCommand),
    /// Compare buying through the company with buying personally
    Compare(CompareCommand),
    /// Show the income tax scale for a year
    Brackets(BracketsCommand),
    /// List the purchase catalog
    Products(ProductsCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Command::Income(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Brackets(cmd) => cmd.exec(),
        Command::Products(cmd) => cmd.exec(),
    }
}
