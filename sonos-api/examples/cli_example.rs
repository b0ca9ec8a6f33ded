//! # Sonos CLI Example
//!
//! Runs one command against a speaker whose IP you already know.
//!
//! ```bash
//! cargo run --example cli_example -- 192.168.1.100 status
//! cargo run --example cli_example -- 192.168.1.100 volume 25
//! SONOS_LOG_MODE=debug cargo run --example cli_example -- 192.168.1.100 toggle
//! ```
//!
//! Commands: `status`, `play`, `pause`, `stop`, `toggle`, `next`, `previous`,
//! `volume [level]`, `mute`, `repeat`, `shuffle`, `radio <address> <title>`,
//! `queue <speaker-id>`, `join <master-id>`, `leave`.

use std::env;
use std::net::Ipv4Addr;
use std::process;

use sonos_api::logging::init_logging_from_env;
use sonos_api::{ApiError, Direction, SonosClient, TcpTransport, ValueBuffer};

fn usage() -> ! {
    eprintln!("usage: cli_example <speaker-ip> <command> [args...]");
    process::exit(2);
}

fn status<H: sonos_api::ErrorHandler>(client: &mut SonosClient<TcpTransport, H>, ip: Ipv4Addr) -> Result<(), ApiError> {
    let mut uri = ValueBuffer::<128>::new();
    let state = client.get_state(ip)?;
    let mode = client.get_play_mode(ip)?;
    let track = client.get_track_info(ip, &mut uri)?;
    let volume = client.get_volume(ip)?;
    let muted = client.get_mute(ip)?;

    println!("state:    {:?}", state);
    println!("mode:     repeat={} shuffle={}", mode.repeat, mode.shuffle);
    println!("source:   {:?}", sonos_api::SourceScheme::classify(uri.as_str()));
    println!("track:    #{} {}", track.number, uri.as_str());
    println!(
        "position: {}s / {}s ({:.1}%)",
        track.position,
        track.duration,
        f64::from(track.per_mille()) / 10.0
    );
    println!("volume:   {}{}", volume, if muted { " (muted)" } else { "" });
    Ok(())
}

fn main() {
    if let Err(e) = init_logging_from_env() {
        eprintln!("logging: {}", e);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(ip) = args.first().and_then(|ip| ip.parse::<Ipv4Addr>().ok()) else {
        usage();
    };
    let command = args.get(1).map(String::as_str).unwrap_or("status");
    let arg = |i: usize| args.get(i).map(String::as_str);

    let mut client = SonosClient::with_error_handler(|| eprintln!("speaker did not answer"));

    let result = match command {
        "status" => status(&mut client, ip),
        "play" => client.play(ip),
        "pause" => client.pause(ip),
        "stop" => client.stop(ip),
        "toggle" => client.toggle_pause(ip),
        "next" => client.skip(ip, Direction::Forward),
        "previous" => client.skip(ip, Direction::Backward),
        "volume" => match arg(2).map(str::parse::<u8>) {
            Some(Ok(level)) => client.set_volume(ip, level),
            Some(Err(_)) => usage(),
            None => client.get_volume(ip).map(|volume| println!("{}", volume)),
        },
        "mute" => client.toggle_mute(ip),
        "repeat" => client.toggle_repeat(ip),
        "shuffle" => client.toggle_shuffle(ip),
        "radio" => match (arg(2), arg(3)) {
            (Some(address), Some(title)) => client.play_radio(ip, address, title),
            _ => usage(),
        },
        "queue" => match arg(2) {
            Some(id) => client.play_queue(ip, id),
            None => usage(),
        },
        "join" => match arg(2) {
            Some(id) => client.connect_to_master(ip, id),
            None => usage(),
        },
        "leave" => client.disconnect_from_master(ip),
        _ => usage(),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", command, e);
        process::exit(1);
    }
}
