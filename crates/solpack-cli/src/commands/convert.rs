//! Unit conversion commands

use clap::Args;
use solpack_abi::{from_wei, to_wei};

use crate::{config::Config, output::Output, CliError};

/// Scale a decimal amount up to the smallest unit
#[derive(Debug, Args)]
pub struct ToWeiArgs {
    /// Amount such as 1.5
    amount: String,

    /// Decimals of the unit (default from config)
    #[arg(long)]
    decimals: Option<u32>,
}

impl ToWeiArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let decimals = self.decimals.unwrap_or(config.decimals);
        let result = to_wei(&self.amount, decimals)?;

        Output::new(json)
            .field("amount", &self.amount)
            .field_u64("decimals", decimals.into())
            .field("result", &result)
            .message(&result)
            .print();

        Ok(())
    }
}

/// Scale an integer amount down from the smallest unit
#[derive(Debug, Args)]
pub struct FromWeiArgs {
    /// Integer amount in the smallest unit
    amount: String,

    /// Decimals of the unit (default from config)
    #[arg(long)]
    decimals: Option<u32>,
}

impl FromWeiArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let decimals = self.decimals.unwrap_or(config.decimals);
        let result = from_wei(&self.amount, decimals)?;

        Output::new(json)
            .field("amount", &self.amount)
            .field_u64("decimals", decimals.into())
            .field("result", &result)
            .message(&result)
            .print();

        Ok(())
    }
}
