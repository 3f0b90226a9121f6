//! Workshop core - 车辆维修预约与服务记录
//!
//! # 架构概述
//!
//! - **预约生命周期** (`appointments`): transition table, command handlers and
//!   the [`WorkshopManager`] pipeline
//! - **服务记录** (`appointments::service_log`): checklist, parts and the
//!   finalize lock
//! - **排班** (`scheduling`): slot generation and admission checks
//! - **费用** (`money`): decimal cost computation
//!
//! # 模块结构
//!
//! ```text
//! workshop/src/
//! ├── core/          # 配置、错误
//! ├── appointments/  # 生命周期、服务记录、命令处理
//! ├── scheduling/    # 营业时间、时段、冲突检查
//! ├── storage.rs     # 版本化存储 + 事件日志
//! ├── catalog.rs     # 服务 / 配件目录
//! ├── money.rs       # 费用计算
//! ├── batch.rs       # JSON 批处理
//! └── utils/         # 日志、时间、校验
//! ```

pub mod appointments;
pub mod batch;
pub mod catalog;
pub mod core;
pub mod money;
pub mod scheduling;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use appointments::{ServiceCase, WorkshopManager};
pub use catalog::{CatalogLookup, InMemoryCatalog};
pub use core::{Config, WorkshopError, WorkshopResult};
pub use storage::{AppointmentStore, InMemoryStore};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
