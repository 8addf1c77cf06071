use anyhow::{Context, Result};
use linksim_core::{bits, transmit, LinkConfig};
use tracing::{info, warn};

pub fn execute(text: &str, config: &LinkConfig, json: bool, peer: Option<&str>) -> Result<()> {
    let report =
        transmit(text, config).with_context(|| format!("failed to encode {text:?}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("source bits : {}", bits::to_wire_string(&report.source_bits));
        println!("line bits   : {}", bits::to_wire_string(&report.line_bits));
        println!("frames      : {}", report.frames);
        println!("wire        : {}", report.wire);
        println!("signal      : {} samples", report.signal.len());
    }

    if let Some(addr) = peer {
        let ack = crate::transport::send(addr, &report.wire)
            .with_context(|| format!("failed to reach peer {addr}"))?;
        if ack == report.wire {
            info!("wire acknowledged by {}", addr);
        } else {
            warn!("acknowledgement from {} does not match the wire", addr);
        }
    }

    Ok(())
}
