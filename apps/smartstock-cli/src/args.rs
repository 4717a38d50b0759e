//! Command line parsing.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use smartstock_core::PaymentMethod;

pub const USAGE: &str = "\
Usage: smartstock [--config <path>] <command>

Commands:
  products [term]                         List products, optionally filtered
  sell [--method M] [--tendered X] CODE…  Scan codes and register a sale
                                          (M: efectivo | tarjeta | qr | transferencia)
  closure [preview|close]                 Show or close today's cash closure
  dashboard                               Daily stats and sales charts
  config [init]                           Show the effective config, or write defaults
  help                                    Show this message

Environment:
  SMARTSTOCK_API_URL, SMARTSTOCK_TIMEOUT_SECS, SMARTSTOCK_USER_ID,
  SMARTSTOCK_OPERATOR_NAME, RUST_LOG";

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Products { term: Option<String> },
    Sell(SellArgs),
    Closure(ClosureAction),
    Dashboard,
    ConfigShow,
    ConfigInit,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SellArgs {
    pub method: PaymentMethod,
    pub tendered: Option<String>,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureAction {
    Preview,
    Close,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path = None;
        let mut rest = Vec::new();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if arg == "--config" {
                let path = iter.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            } else {
                rest.push(arg);
            }
        }

        let mut rest = rest.into_iter();
        let command = match rest.next().as_deref() {
            None | Some("help") | Some("--help") | Some("-h") => Command::Help,
            Some("products") => Command::Products { term: rest.next() },
            Some("sell") => Command::Sell(parse_sell(rest)?),
            Some("closure") => match rest.next().as_deref() {
                None | Some("preview") => Command::Closure(ClosureAction::Preview),
                Some("close") => Command::Closure(ClosureAction::Close),
                Some(other) => bail!("unknown closure action '{}'", other),
            },
            Some("dashboard") => Command::Dashboard,
            Some("config") => match rest.next().as_deref() {
                None | Some("show") => Command::ConfigShow,
                Some("init") => Command::ConfigInit,
                Some(other) => bail!("unknown config action '{}'", other),
            },
            Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
        };

        Ok(Args {
            config_path,
            command,
        })
    }
}

fn parse_sell(mut rest: impl Iterator<Item = String>) -> Result<SellArgs> {
    let mut method = PaymentMethod::default();
    let mut tendered = None;
    let mut codes = Vec::new();

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--method" => {
                let value = rest.next().ok_or_else(|| anyhow!("--method needs a value"))?;
                method = value.parse().map_err(anyhow::Error::msg)?;
            }
            "--tendered" => {
                tendered = Some(rest.next().ok_or_else(|| anyhow!("--tendered needs a value"))?);
            }
            _ => codes.push(arg),
        }
    }

    if codes.is_empty() {
        bail!("sell needs at least one barcode or product name");
    }
    Ok(SellArgs {
        method,
        tendered,
        codes,
    })
}
