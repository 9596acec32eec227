//! FFmpeg subprocess execution with live log capture

use crate::error::RunError;
use crate::request::Invocation;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Outcome of one FFmpeg run. Immutable once the child has exited.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output_path: PathBuf,
    pub log_text: String,
}

#[derive(Debug)]
pub struct Runner {
    ffmpeg_path: PathBuf,
}

impl Runner {
    pub fn new(ffmpeg_path: PathBuf) -> Self {
        Self { ffmpeg_path }
    }

    /// Run FFmpeg, forwarding each log line through `log_tx` as it arrives.
    ///
    /// stdout and stderr are merged in arrival order. A nonzero exit is
    /// reported through [`ExtractionResult`], not as an error; `Err` is
    /// reserved for a process that cannot be started or talked to. A dropped
    /// receiver on `log_tx` does not affect the run.
    pub async fn run(
        &self,
        invocation: &Invocation,
        log_tx: mpsc::Sender<String>,
    ) -> Result<ExtractionResult, RunError> {
        info!("Running ffmpeg for {}", invocation.output.display());

        let mut child = Command::new(&self.ffmpeg_path)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RunError::Launch)?;

        let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump_lines(stdout, line_tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump_lines(stderr, line_tx.clone()));
        }
        drop(line_tx);

        let mut log_text = String::new();
        while let Some(line) = line_rx.recv().await {
            log_text.push_str(&line);
            log_text.push('\n');
            let _ = log_tx.send(line).await;
        }

        // The pipes are drained, so the child has exited or is about to.
        let status = child.wait().await?;
        debug!("ffmpeg exited with {:?}", status.code());

        Ok(ExtractionResult {
            success: status.success(),
            exit_code: status.code(),
            output_path: invocation.output.clone(),
            log_text,
        })
    }
}

async fn pump_lines<R>(reader: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
            break;
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;

    fn sh_invocation(script: &str) -> Invocation {
        Invocation {
            args: vec!["-c".into(), script.into()],
            output: Path::new("/tmp/out.mp3").to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported_not_raised() {
        let runner = Runner::new(PathBuf::from("/bin/sh"));
        let (tx, _rx) = mpsc::channel(64);

        let result = runner
            .run(&sh_invocation("echo from-stdout; echo from-stderr 1>&2; exit 3"), tx)
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.log_text.contains("from-stdout"));
        assert!(result.log_text.contains("from-stderr"));
    }

    #[tokio::test]
    async fn test_lines_are_forwarded_live() {
        let runner = Runner::new(PathBuf::from("/bin/sh"));
        let (tx, mut rx) = mpsc::channel(64);

        let result = runner
            .run(&sh_invocation("echo one; echo two"), tx)
            .await
            .unwrap();
        assert!(result.success);

        let mut forwarded = Vec::new();
        while let Some(line) = rx.recv().await {
            forwarded.push(line);
        }
        assert_eq!(forwarded, vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_fail_run() {
        let runner = Runner::new(PathBuf::from("/bin/sh"));
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = runner
            .run(&sh_invocation("echo ignored"), tx)
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.log_text.contains("ignored"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let runner = Runner::new(PathBuf::from("/definitely/not/a/binary"));
        let (tx, _rx) = mpsc::channel(1);

        let err = runner.run(&sh_invocation("true"), tx).await.unwrap_err();
        assert!(matches!(err, RunError::Launch(_)));
    }
}
