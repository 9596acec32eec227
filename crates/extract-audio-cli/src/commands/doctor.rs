use anyhow::Result;
use std::path::Path;
use std::process::Command;

use extract_audio_core::{config::Config, locator};

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    println!("extract_audio dependency check\n");

    let config = Config::load(config_path)?;
    let mut all_ok = true;

    print!("ffmpeg:  ");
    match locator::locate_with_source(&config.paths) {
        Ok((path, source)) => {
            let version = Command::new(&path).args(["-version"]).output();
            match version {
                Ok(out) => {
                    let first_line = String::from_utf8_lossy(&out.stdout)
                        .lines()
                        .next()
                        .unwrap_or("")
                        .to_string();
                    // Extract just version number
                    let version_part = first_line.split_whitespace().nth(2).unwrap_or("unknown");
                    println!("OK ({}, via {})", version_part, source);
                    println!("         {}", path.display());
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    println!("         {}", path.display());
                    all_ok = false;
                }
            }
        }
        Err(_) => {
            println!("NOT FOUND");
            println!("         Install FFmpeg or place the binary next to extract_audio");
            all_ok = false;
        }
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for details.");
    }

    Ok(())
}
