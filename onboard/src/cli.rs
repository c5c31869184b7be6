use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use client::{Config, ConfigBuilder, ConfigBuilderError};
use registration::{ProtocolVersion, DEFAULT_BLOCKS_PER_YEAR};
use ssv_types::{OperatorDescriptor, OperatorPublicKey};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "onboard")]
#[command(about = "Split a validator key across SSV operators and build its registration")]
pub struct Onboard {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the registration payload for a validator key without sending it
    BuildPayload(BuildPayload),
}

#[derive(Args, Debug)]
pub struct BuildPayload {
    /// File holding the hex encoded validator secret key
    #[arg(long)]
    pub secret_file: PathBuf,

    /// Operator as `<base64 public key>[,<fee in wei per block>]`, in slot order
    #[arg(long = "operator", required = true, value_parser = parse_operator)]
    pub operators: Vec<OperatorDescriptor>,

    /// Account that will own the validator
    #[arg(long, value_parser = parse_address)]
    pub owner: Address,

    /// Network fee in wei per block
    #[arg(long, default_value = "0", value_parser = parse_wei)]
    pub network_fee: U256,

    #[arg(long, default_value_t = ProtocolVersion::Current)]
    pub protocol: ProtocolVersion,

    /// Blocks of fees held as liquidation collateral
    #[arg(long, default_value_t = 0)]
    pub liquidation_collateral_blocks: u64,

    #[arg(long, default_value_t = DEFAULT_BLOCKS_PER_YEAR)]
    pub blocks_per_year: u64,

    /// Operators required before the key may be split
    #[arg(long, default_value_t = 4)]
    pub min_operators: usize,

    /// Network contract the call is addressed to
    #[arg(long, value_parser = parse_address)]
    pub contract: Option<Address>,
}

impl BuildPayload {
    /// Slots follow the operators given, capped by the committee maximum
    pub fn config(&self) -> Result<Config, ConfigBuilderError> {
        ConfigBuilder::new()
            .with_min_operators(self.min_operators)
            .with_slots(self.operators.len().max(self.min_operators))
            .with_protocol(self.protocol)
            .with_network_fee(self.network_fee)
            .with_liquidation_collateral_blocks(self.liquidation_collateral_blocks)
            .with_blocks_per_year(self.blocks_per_year)
            .with_contract_address(self.contract.unwrap_or_default())
            .build()
    }
}

fn parse_operator(value: &str) -> Result<OperatorDescriptor, String> {
    let (key, fee) = match value.split_once(',') {
        Some((key, fee)) => (key, parse_wei(fee)?),
        None => (value, U256::ZERO),
    };
    let public_key = OperatorPublicKey::parse(key)?;
    Ok(OperatorDescriptor::new(public_key, "").with_fee(fee))
}

fn parse_address(value: &str) -> Result<Address, String> {
    Address::from_str(value.trim()).map_err(|e| format!("Invalid address: {}", e))
}

fn parse_wei(value: &str) -> Result<U256, String> {
    U256::from_str(value.trim()).map_err(|e| format!("Invalid amount: {}", e))
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    // Operator public key of operator 1141 on mainnet
    const OPERATOR_KEY: &str = "LS0tLS1CRUdJTiBSU0EgUFVCTElDIEtFWS0tLS0tCk1JSUJJakFOQmdrcWhraUc5dzBCQVFFRkFBT0NBUThBTUlJQkNnS0NBUUVBMVg2MUFXY001QUNLaGN5MTlUaEIKby9HMWlhN1ByOVUralJ5aWY5ZjAyRG9sd091V2ZLLzdSVUlhOEhEbHBvQlVERDkwRTVQUGdJSy9sTXB4RytXbwpwQ2N5bTBpWk9UT0JzNDE5bEh3TzA4bXFja1JsZEg5WExmbmY2UThqWFR5Ym1yYzdWNmwyNVprcTl4U0owbHR1CndmTnVTSzNCZnFtNkQxOUY0aTVCbmVaSWhjRVJTYlFLWDFxbWNqYnZFL2cyQko4TzhaZUgrd0RzTHJiNnZXQVIKY3BYWG1uelE3Vlp6ZklHTGVLVU1CTTh6SW0rcXI4RGZ4SEhSeVU1QTE3cFU4cy9MNUp5RXE1RGJjc2Q2dHlnbQp5UE9BYUNzWldVREI3UGhLOHpUWU9WYi9MM1lnSTU4bjFXek5IM0s5cmFreUppTmUxTE9GVVZzQTFDUnhtQ2YzCmlRSURBUUFCCi0tLS0tRU5EIFJTQSBQVUJMSUMgS0VZLS0tLS0K";

    #[test]
    fn parses_build_payload() {
        let with_fee = format!("{OPERATOR_KEY},1000");
        let args = Onboard::try_parse_from([
            "onboard",
            "build-payload",
            "--secret-file",
            "key.txt",
            "--operator",
            OPERATOR_KEY,
            "--operator",
            with_fee.as_str(),
            "--owner",
            "0x00000000000000000000000000000000000000aa",
            "--protocol",
            "legacy",
        ])
        .unwrap();

        let Command::BuildPayload(args) = args.command;
        assert_eq!(args.operators.len(), 2);
        assert_eq!(args.operators[0].fee, U256::ZERO);
        assert_eq!(args.operators[1].fee, U256::from(1000));
        assert_eq!(args.protocol, ProtocolVersion::Legacy);
        assert_eq!(args.owner, Address::with_last_byte(0xaa));
        assert_eq!(args.contract, None);
    }

    fn build_payload_args(operator_count: usize) -> BuildPayload {
        let mut argv = vec![
            "onboard".to_string(),
            "build-payload".to_string(),
            "--secret-file".to_string(),
            "key.txt".to_string(),
            "--owner".to_string(),
            "0x00000000000000000000000000000000000000aa".to_string(),
        ];
        for fee in 0..operator_count {
            argv.push("--operator".to_string());
            argv.push(format!("{OPERATOR_KEY},{fee}"));
        }
        let Command::BuildPayload(args) = Onboard::try_parse_from(argv).unwrap().command;
        args
    }

    #[test]
    fn operators_beyond_committee_maximum_are_rejected() {
        let config = build_payload_args(13).config().unwrap();
        assert_eq!(config.slots(), 13);

        assert_eq!(
            build_payload_args(14).config().unwrap_err(),
            ConfigBuilderError::SlotsAboveMaximum
        );
    }

    #[test]
    fn slots_cover_the_minimum() {
        let config = build_payload_args(2).config().unwrap();
        assert_eq!(config.slots(), 4);
    }

    #[test]
    fn rejects_malformed_operator() {
        assert!(parse_operator("not base64!").is_err());
        assert!(parse_operator(&format!("{OPERATOR_KEY},lots")).is_err());
    }
}
