//! 核心模块 - 配置和错误定义
//!
//! - [`Config`] - 运行配置 (environment driven)
//! - [`WorkshopError`] - domain error for every core operation

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{WorkshopError, WorkshopResult};
