use workshop::batch::{self, BatchScript};
use workshop::{Config, cleanup_old_logs, init_logger_with_file};

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    let log_path = config.log_path();
    let log_dir = log_path.as_deref().and_then(|p| p.to_str());
    let json_logs = config.log_json || config.is_production();
    init_logger_with_file(&config.log_level, json_logs, log_dir)?;

    if let Some(log_path) = log_path.as_deref() {
        let removed = cleanup_old_logs(log_path)?;
        if removed > 0 {
            tracing::info!(removed, "Removed expired log files");
        }
    }

    // 2. 读取脚本
    let Some(script_path) = std::env::args().nth(1) else {
        anyhow::bail!("usage: workshop <script.json>");
    };
    let script = BatchScript::load(&script_path)?;

    tracing::info!(
        environment = %config.environment,
        script = %script_path,
        "Workshop batch starting"
    );

    // 3. 执行并逐行输出响应
    let report = batch::run(script, &config)?;
    for response in &report.responses {
        println!("{}", serde_json::to_string(response)?);
    }

    tracing::info!(
        summary = ?report.status_summary,
        failed = report.failed(),
        "Status summary"
    );
    Ok(())
}
