// examples/renderer_demo.rs
//
// Drives a MediaRenderer whose base URL is known (no discovery):
//  - reads volume, mute and transport state
//  - optionally loads and plays a URI
//  - prints the playback position
//
// Build and run (from pmocontrol crate root):
//   cargo run --example renderer_demo -- <base_url> [uri]
//
//   base_url: e.g. http://192.168.1.20:1400
//   uri     : optional URI to play

use std::env;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use pmoconfig::get_config;
use pmocontrol::{AvTransportClient, MASTER_CHANNEL, RenderingControlClient, init_logging};

fn main() -> Result<()> {
    let config = get_config();
    init_logging(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    let base_url = args
        .first()
        .context("usage: renderer_demo <base_url> [uri]")?
        .clone();

    let rendering = RenderingControlClient::from_config(base_url.as_str(), &config);
    let transport = AvTransportClient::from_config(base_url.as_str(), &config);

    let volume = rendering.get_volume(0, MASTER_CHANNEL)?;
    let mute = rendering.get_mute(0, MASTER_CHANNEL)?;
    println!("Volume: {} (mute: {})", volume, mute);

    let state = transport.get_transport_info(0)?;
    println!(
        "Transport: {:?} ({})",
        state.state(),
        state.current_transport_status
    );

    if let Some(uri) = args.get(1) {
        transport.set_av_transport_uri(0, uri, "")?;
        transport.play(0, "1")?;
        thread::sleep(Duration::from_secs(5));
    }

    let position = transport.get_position_info(0)?;
    println!(
        "Track {}: {} / {} s",
        position.track,
        position.rel_time_secs().unwrap_or(0),
        position.track_duration_secs().unwrap_or(0)
    );

    let media = transport.get_media_info(0)?;
    println!("Current URI: {}", media.current_uri);

    Ok(())
}
