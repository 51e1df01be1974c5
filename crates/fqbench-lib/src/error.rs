use std::process::ExitStatus;

/// Errors produced while parsing a size budget such as `500k` or `2G`
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SizeError {
    #[error("Empty size specification")]
    Empty,

    /// No leading digits were found
    #[error("Size specification has no numeric value: {0:?}")]
    MissingValue(String),

    /// The trailing unit is not one of `k`, `M`, `G`
    #[error("Unsupported size suffix {suffix:?} in {input:?} - expecting one of [k, M, G]")]
    InvalidSuffix { input: String, suffix: String },

    /// The value does not fit into 64 bits once multiplied by its unit
    #[error("Size specification overflows: {0:?}")]
    Overflow(String),
}

/// Errors produced by an external compressor process
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all (usually: not installed)
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully
    #[error("Command `{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_error_messages() {
        let error = SizeError::InvalidSuffix {
            input: "10T".to_string(),
            suffix: "T".to_string(),
        };
        let error_str = format!("{}", error);
        assert!(error_str.contains("10T"));
        assert!(error_str.contains("[k, M, G]"));

        let error = SizeError::MissingValue("k".to_string());
        assert!(format!("{}", error).contains("no numeric value"));
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        use std::error::Error as _;

        let error = CommandError::Spawn {
            command: "nonexistent -c".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(format!("{}", error).contains("nonexistent -c"));
        assert!(error.source().is_some());
    }
}
