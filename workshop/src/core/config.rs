use std::path::{Path, PathBuf};

use shared::models::BusinessHours;

use crate::scheduling::DEFAULT_SLOT_STEP_MINUTES;
use crate::utils::time;

/// 运行配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/workshop | 工作目录 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志输出 |
/// | LOG_DIR | (none) | 日志文件目录 |
/// | BUSINESS_HOURS_START | 08:00 | 营业开始 |
/// | BUSINESS_HOURS_END | 17:00 | 营业结束 |
/// | WORKING_DAYS | 1,2,3,4,5,6 | 营业日 (0=Sunday) |
/// | SLOT_STEP_MINUTES | 30 | 预约时段间隔 |
///
/// # 示例
///
/// ```text
/// BUSINESS_HOURS_END=19:00 WORKING_DAYS=1,2,3,4,5 workshop script.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Business hours loaded at startup; administrators may replace them at runtime
    pub business_hours: BusinessHours,
    pub slot_step_minutes: u32,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = BusinessHours::default();

        let start = std::env::var("BUSINESS_HOURS_START")
            .ok()
            .map(|v| time::parse_time_or(&v, defaults.start))
            .unwrap_or(defaults.start);
        let end = std::env::var("BUSINESS_HOURS_END")
            .ok()
            .map(|v| time::parse_time_or(&v, defaults.end))
            .unwrap_or(defaults.end);
        let working_days = std::env::var("WORKING_DAYS")
            .ok()
            .and_then(|v| match time::parse_working_days(&v) {
                Ok(days) => Some(days),
                Err(e) => {
                    tracing::warn!("Ignoring WORKING_DAYS '{}': {}", v, e);
                    None
                }
            })
            .unwrap_or(defaults.working_days);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/workshop".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            business_hours: BusinessHours {
                start,
                end,
                working_days,
            },
            slot_step_minutes: std::env::var("SLOT_STEP_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|step: &u32| *step > 0)
                .unwrap_or(DEFAULT_SLOT_STEP_MINUTES),
        }
    }

    /// 使用自定义营业时间覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_business_hours(business_hours: BusinessHours) -> Self {
        let mut config = Self::from_env();
        config.business_hours = business_hours;
        config.slot_step_minutes = DEFAULT_SLOT_STEP_MINUTES;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 日志目录; 相对路径基于工作目录
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(|dir| {
            let dir = Path::new(dir);
            if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                Path::new(&self.work_dir).join(dir)
            }
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
