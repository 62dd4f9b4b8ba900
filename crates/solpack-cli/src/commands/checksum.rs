//! Address checksum command

use clap::Args;
use solpack_crypto::{check_address_checksum, to_checksum_address};

use crate::{config::Config, output::Output, CliError};

/// Mixed-case checksum form of an address
#[derive(Debug, Args)]
pub struct ChecksumArgs {
    /// 20-byte hex address
    address: String,
}

impl ChecksumArgs {
    pub fn execute(self, _config: &Config, json: bool) -> Result<(), CliError> {
        let checksummed = to_checksum_address(&self.address)?;
        let valid = check_address_checksum(&self.address);

        Output::new(json)
            .field("address", &checksummed)
            .field_bool("input_checksum_valid", valid)
            .message(&checksummed)
            .print();

        Ok(())
    }
}
