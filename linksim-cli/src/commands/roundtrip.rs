use anyhow::{Context, Result};
use colored::*;
use linksim_core::channel::{Channel, Loopback};
use linksim_core::{bits, receive, transmit, LinkConfig};

pub fn execute(text: &str, config: &LinkConfig) -> Result<()> {
    let tx = transmit(text, config).with_context(|| format!("failed to encode {text:?}"))?;

    println!("source bits : {}", bits::to_wire_string(&tx.source_bits));
    println!("line bits   : {}", bits::to_wire_string(&tx.line_bits));
    println!("frames      : {}", tx.frames);
    println!("wire        : {}", tx.wire);
    println!("signal      : {} samples", tx.signal.len());

    let mut channel = Loopback::new();
    channel.send(&tx.wire)?;
    let delivered = channel.latest_received().unwrap_or_default().to_owned();

    let rx = receive(&delivered, config).context("failed to decode the delivered wire")?;
    super::receive::print_report(&rx);

    if rx.text == text {
        println!("{} round trip matched", "✓".green());
    } else {
        println!("{} round trip mismatch: got {:?}", "✗".red(), rx.text);
    }

    Ok(())
}
