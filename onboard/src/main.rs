mod cli;

use clap::Parser;
use cli::{BuildPayload, Command, Onboard};
use quorum::QuorumSelector;
use registration::PayloadBuilder;
use ssv_types::{Slot, ValidatorSecret};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zeroize::Zeroizing;

fn main() -> ExitCode {
    // Setup a log filter & tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match Onboard::parse().command {
        Command::BuildPayload(args) => build_payload(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to build payload");
            ExitCode::FAILURE
        }
    }
}

fn build_payload(args: BuildPayload) -> Result<(), String> {
    let config = args.config().map_err(|e| e.to_string())?;

    let mut secret = {
        let contents = Zeroizing::new(
            std::fs::read_to_string(&args.secret_file)
                .map_err(|e| format!("Unable to read {}: {}", args.secret_file.display(), e))?,
        );
        ValidatorSecret::from_hex(&contents).map_err(|e| e.to_string())?
    };

    let mut quorum = QuorumSelector::new(config.min_operators(), config.slots());
    for (slot, operator) in Slot::range(args.operators.len()).zip(args.operators) {
        let public_key = operator.public_key.clone();
        if !quorum.select(operator, slot) {
            return Err(format!("Operator {} listed more than once", public_key));
        }
    }

    let mut builder = PayloadBuilder::new(config.protocol(), config.fee_schedule());
    let payload = builder
        .build(&mut secret, &quorum, args.owner)
        .map_err(|e| e.to_string())?;
    secret.scrub();

    info!(
        validator = %payload.validator_public_key,
        operators = payload.operator_public_keys.len(),
        protocol = %payload.protocol(),
        "Built registration payload"
    );
    println!("validator public key: {}", payload.validator_public_key);
    for (operator, share) in payload
        .operator_public_keys
        .iter()
        .zip(&payload.share_public_keys)
    {
        println!("operator {} share {}", operator, share);
    }
    if let Some(amount) = payload.amount() {
        println!("total fee: {} wei", amount);
    }
    let call = payload.to_call(args.owner, config.contract_address());
    println!("method: {}", call.method);
    println!("calldata: 0x{}", hex::encode(&call.input));
    Ok(())
}
