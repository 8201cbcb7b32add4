//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::writer::LogFileWriter;
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    fn create_test_config() -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig {
                enabled: true,
                colored: false,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("test.log"),
                append: true,
                format: LogFormat::Full,
            },
            level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(config.console.colored);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = create_test_config();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = create_test_config().with_level("loud");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_file_needs_path() {
        let config = FileConfig::new(true, PathBuf::new(), true, LogFormat::Json);
        assert!(config.is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    fn file_config(dir: &TempDir, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("nested").join("roster.log"),
            append,
            format: LogFormat::Json,
        }
    }

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let writer = LogFileWriter::new(&file_config(&dir, true)).unwrap();

        {
            let mut guard = writer.make_writer();
            guard.write_all(b"first line\n").unwrap();
        }

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(content, "first line\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_append_mode_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);
        {
            let writer = LogFileWriter::new(&config).unwrap();
            writer.make_writer().write_all(b"one\n").unwrap();
        }
        {
            let writer = LogFileWriter::new(&config).unwrap();
            writer.make_writer().write_all(b"two\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_truncate_mode_replaces_content() {
        let dir = TempDir::new().unwrap();
        let mut config = file_config(&dir, true);
        {
            let writer = LogFileWriter::new(&config).unwrap();
            writer.make_writer().write_all(b"stale\n").unwrap();
        }
        config.append = false;
        {
            let writer = LogFileWriter::new(&config).unwrap();
            writer.make_writer().write_all(b"fresh\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "fresh\n");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_known_levels_are_valid(
            level in prop_oneof![
                Just("trace"), Just("debug"), Just("info"), Just("warn"), Just("error")
            ],
            upper in any::<bool>(),
        ) {
            let level = if upper { level.to_uppercase() } else { level.to_string() };
            let config = LoggerConfig::default().with_level(level);
            prop_assert!(config.validate().is_ok());
        }

        #[test]
        fn property_format_round_trips(format in prop_oneof![
            Just(LogFormat::Full), Just(LogFormat::Compact), Just(LogFormat::Json)
        ]) {
            prop_assert_eq!(format.as_str().parse::<LogFormat>().unwrap(), format);
        }
    }
}
