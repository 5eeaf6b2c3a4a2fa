//! Input handling for secret payloads.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::errors::CliError;

/// Read a secret payload from `--value`, `--file`, a hidden prompt, or stdin.
///
/// The prompt is used only when stdin is a terminal. Empty payloads are
/// rejected. The buffer is wiped when dropped.
pub fn read_secret_value(
    value: Option<String>,
    file: Option<&str>,
) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let data = if let Some(value) = value {
        Zeroizing::new(value.into_bytes())
    } else if let Some(path) = file {
        let path = Path::new(path);
        Zeroizing::new(
            std::fs::read(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        )
    } else if io::stdin().is_terminal() {
        let entered = Zeroizing::new(
            Password::new()
                .with_prompt("Secret value")
                .with_confirmation("Confirm secret value", "Values do not match")
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read secret value: {}", e))?,
        );
        Zeroizing::new(entered.as_bytes().to_vec())
    } else {
        let mut buffer = Zeroizing::new(Vec::new());
        io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read secret value from stdin: {}", e))?;
        buffer
    };

    if data.is_empty() {
        return Err(CliError::InvalidInput("Secret value cannot be empty".to_string()).into());
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_flag_wins() {
        let data = read_secret_value(Some("hunter2".to_string()), Some("/nonexistent")).unwrap();
        assert_eq!(data.as_slice(), b"hunter2");
    }

    #[test]
    fn test_reads_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, [0u8, 1, 2, 255]).unwrap();

        let data = read_secret_value(None, path.to_str()).unwrap();
        assert_eq!(data.as_slice(), &[0u8, 1, 2, 255]);
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = read_secret_value(Some(String::new()), None).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }
}
