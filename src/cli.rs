//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};

/// LessonLinker - lesson distribution and click tracking backend
#[derive(Parser, Debug)]
#[command(name = "lessonlinker")]
#[command(version)]
#[command(about = "Lesson distribution backend with short tracking links", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print a sample configuration, or write it to a file
    GenerateConfig {
        /// Output file path (default: stdout)
        output: Option<String>,
    },
}

/// 写出示例配置
pub fn generate_config(output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
            println!("Sample configuration written to {}", path);
        }
        None => println!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}
