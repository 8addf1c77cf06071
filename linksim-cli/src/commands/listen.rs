use crate::transport::WireListener;
use anyhow::{Context, Result};
use linksim_core::{receive, LinkConfig};
use tracing::info;

pub fn execute(addr: &str, config: &LinkConfig, count: usize) -> Result<()> {
    let listener =
        WireListener::bind(addr).with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    for exchange in 0..count {
        let wire = listener
            .accept_one()
            .with_context(|| format!("exchange {exchange} failed"))?;
        info!("received {} wire bits", wire.len());

        let report =
            receive(&wire, config).context("failed to decode the received wire")?;
        super::receive::print_report(&report);
    }

    Ok(())
}
