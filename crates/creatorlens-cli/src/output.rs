//! JSON report rendering for both commands.

use std::path::PathBuf;

use serde::Serialize;

/// Where and how to emit the rendered report.
#[derive(Debug, Clone)]
pub(crate) struct OutputOptions {
    pub pretty: bool,
    pub path: Option<PathBuf>,
}

/// Serialize `value` and write it to the configured destination.
///
/// Stdout output is exactly one JSON document so the command composes with
/// `jq` and friends; file output gets a trailing newline and a confirmation
/// line on stdout.
pub(crate) fn write_report<T: Serialize>(value: &T, opts: &OutputOptions) -> anyhow::Result<()> {
    let rendered = if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match &opts.path {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n")).map_err(|e| {
                anyhow::anyhow!("failed to write report to {}: {e}", path.display())
            })?;
            println!("wrote report to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        value: u32,
    }

    #[test]
    fn write_report_to_file_appends_newline() {
        let dir = std::env::temp_dir().join("creatorlens-output-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");

        let opts = OutputOptions {
            pretty: false,
            path: Some(path.clone()),
        };
        write_report(&Sample { name: "x", value: 3 }, &opts).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\"name\":\"x\",\"value\":3}\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_report_fails_on_unwritable_path() {
        let opts = OutputOptions {
            pretty: true,
            path: Some(PathBuf::from("/nonexistent-dir/report.json")),
        };
        let err = write_report(&Sample { name: "x", value: 3 }, &opts).unwrap_err();
        assert!(err.to_string().contains("failed to write report"));
    }
}
