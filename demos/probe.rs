//! Example: Probe a video file and print its dimensions and rotation.

use std::env;

use vidprobe::probe_file;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <video_file>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} movie.mp4", args[0]);
        std::process::exit(1);
    }

    // Respect RUST_LOG if set; default to the probe's debug output.
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "vidprobe=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let path = &args[1];

    match probe_file(path) {
        Ok(info) => {
            println!("File: {}", info.file_name);

            if info.has_dimensions() {
                println!("Dimensions: {}x{}", info.width, info.height);
                println!("Rotation: {} degrees", info.rotation);
            } else {
                println!("No video track geometry found");
            }
        }
        Err(e) => {
            eprintln!("Error probing file: {}", e);
            std::process::exit(1);
        }
    }
}
