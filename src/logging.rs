use flexi_logger::{
    opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle,
    Naming,
};

/// Sets up a rotating file logger under `directory`, duplicating warnings
/// and above to stderr. The log level comes from the environment, falling
/// back to "debug".
pub fn setup_logging(directory: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("debug")?
        .log_to_file(
            FileSpec::default()
                .directory(directory)
                .basename("collect"),
        )
        .format(opt_format)
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
            Naming::Numbers,
            Cleanup::KeepLogFiles(7),
        )
        .start()
}
