//! Dump tool: read a CRL set file, optionally apply a delta update,
//! optionally write the merged result, then print every issuer hash in hex
//! followed by its revoked serials.

use color_eyre::eyre::eyre;
use crlset::{apply_delta, parse, serialize, telemetry};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        return Err(eyre!(
            "usage: crlset-dump <crlset-file> [<delta-file>] [<output-file>]"
        ));
    }

    let bytes = tokio::fs::read(&args[1]).await?;
    let mut set = parse(&bytes)?;

    if let Some(delta_path) = args.get(2) {
        let delta_bytes = tokio::fs::read(delta_path).await?;
        set = apply_delta(&set, &delta_bytes)?;
    }

    if let Some(output_path) = args.get(3) {
        tokio::fs::write(output_path, serialize(&set)?).await?;
    }

    for entry in set.crls() {
        println!("{}", hex::encode(&entry.issuer_spki_hash));
        for serial in &entry.revoked_serials {
            println!("  {}", hex::encode(serial));
        }
    }

    Ok(())
}
