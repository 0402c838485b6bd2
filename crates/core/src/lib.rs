pub mod config;
pub mod converter;
pub mod format;
pub mod handler;
pub mod router;
pub mod runner;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, MarkupConfig, TimeoutConfig, ToolsConfig,
};
pub use converter::{ConversionJob, ConversionOutcome, ConvertError, FileConverter, IoOp};
pub use format::{classify, extension_of, Category, Format};
pub use handler::{Handler, HandlerRegistry};
pub use router::{route, Plan, RouteError};
pub use runner::{ProcessRunner, RunnerError, Tool, ToolOutput, ToolRunner, WaitPolicy};
