//! TFS 文本搜索核心库
//!
//! 设计要点：
//! - 单线程、阻塞式流水线：参数解析 → 项目选择 → 文件扫描 → 结果输出。
//! - 服务端访问通过 `VersionControl` trait 显式传入，默认实现基于 TFS REST API。
//! - 命中记录由扫描阶段返回，不使用全局可变状态。
//! - 任何远端或 I/O 错误都会中止本次运行，由调用方负责展示。

mod args;
mod client;
mod config;
mod engine;
mod filter;
mod http;
mod lists;
mod matcher;
mod options;
mod pipeline;
mod report;
mod scan;
mod selector;
mod types;

pub use args::{parse_args, usage, ArgsError, VALID_SWITCHES};
pub use client::{ClientError, VersionControl};
pub use config::{ClientConfig, CONFIG_ENV, PAT_ENV};
pub use filter::NameFilter;
pub use http::TfsHttpClient;
pub use lists::read_list_file;
pub use matcher::TermMatcher;
pub use options::{ScanStats, SearchOptions, DEFAULT_FILTER, DEFAULT_SERVER};
pub use pipeline::{load_search_terms, search_and_report, RunContext};
pub use report::{print_matches, write_csv, write_csv_file, CSV_HEADERS};
pub use scan::{scan_projects, ScanSettings};
pub use selector::{select_projects, ProjectScope};
pub use types::{Item, ItemType, MatchRecord, Project, WorkingFolder, Workspace};
