use anyhow::Result;
use extract_audio_core::config::Config;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("extract_audio configuration\n");

    println!("[paths]");
    if let Some(ref p) = config.paths.ffmpeg {
        println!("  ffmpeg = {:?}", p);
    } else {
        println!("  ffmpeg = (auto-detect)");
    }

    println!("\n[output]");
    println!("  default_codec = {:?}", config.output.default_codec);
    if let Some(ref d) = config.output.default_directory {
        println!("  default_directory = {:?}", d);
    } else {
        println!("  default_directory = (same as input)");
    }

    // Show config file locations
    println!("\nConfig file locations (in priority order):");
    if let Some(p) = config_path {
        println!("  1. {} (specified)", p.display());
    }
    if let Some(config_dir) = dirs::config_dir() {
        println!("  2. {}/extract-audio/config.toml", config_dir.display());
    }
    println!("  3. Environment variables (EXTRACT_AUDIO_*)");

    Ok(())
}
