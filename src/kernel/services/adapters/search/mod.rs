//! 搜索服务模块
//!
//! - SearchExecutor: 调用外部搜索进程 (ripgrep)，流式读取输出
//! - ResultShaper: 解析 `--vimgrep` 输出行并施加结果上限

mod executor;
mod parse;

pub use executor::SearchExecutor;
pub use parse::{parse_vimgrep_line, ResultShaper};
