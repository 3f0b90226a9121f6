//! 工具模块 - 通用工具函数
//!
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - date / time-of-day parsing
//! - [`validation`] - text length limits

pub mod logger;
pub mod time;
pub mod validation;
