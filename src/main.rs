use clap::Parser;
use colored::Colorize;

use lessonlinker::cli::{Cli, Commands, generate_config};
use lessonlinker::config::{get_config, init_config_from};
use lessonlinker::errors::LessonLinkerError;
use lessonlinker::runtime::modes::run_server;
use lessonlinker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { output }) = &cli.command {
        return generate_config(output.as_deref());
    }

    init_config_from(&cli.config);
    let config = get_config();

    // guard 必须存活到进程结束，否则文件日志会丢失
    let _log_guard = init_logging(&config.logging)?;

    if let Err(e) = run_server().await {
        match e.downcast_ref::<LessonLinkerError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
        }
        std::process::exit(1);
    }

    Ok(())
}
