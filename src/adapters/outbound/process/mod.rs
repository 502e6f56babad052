/// Process adapters: child process execution and the scanner CLI
mod command_runner;
mod command_scanner;

pub use command_runner::TokioCommandRunner;
pub use command_scanner::CommandScanner;
