//! Runs nuXmv in interactive mode on one model file and a fixed command
//! script.

use crate::*;
use sk_domain::*;
use sk_model::*;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct NuXmv {
    settings: EngineSettings,
}

impl NuXmv {
    pub fn new(settings: EngineSettings) -> NuXmv {
        NuXmv { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Commands fed to the engine on stdin. The model file is given on the
    /// command line, `read_model` picks it up from there.
    pub fn command_script(strategy: Strategy, bound: u32) -> String {
        let commands = [
            format!("set engine {}", strategy.engine_tag()),
            "read_model".to_string(),
            "flatten_hierarchy".to_string(),
            "encode_variables".to_string(),
            "build_boolean_model".to_string(),
            "bmc_setup".to_string(),
            format!("check_ltlspec_bmc -k {bound}"),
            "quit".to_string(),
        ];
        let mut script = commands.join("\n");
        script.push('\n');
        script
    }

    pub fn artifact_path(task: &VerificationTask, dir: &Path) -> PathBuf {
        dir.join(task.artifact_file_name())
    }

    /// Writes the task's model where `run_artifact` expects it.
    pub fn prepare(&self, task: &VerificationTask, dir: &Path) -> SKResult<PathBuf> {
        let path = Self::artifact_path(task, dir);
        write_smv(&task.model, &path)?;
        debug!(task = %task.name, path = %path.display(), "wrote model");
        Ok(path)
    }

    /// Writes the model and runs the engine on it. A missing engine and a
    /// run past the timeout are errors, never verdicts.
    pub async fn run_task(
        &self,
        task: &VerificationTask,
        dir: &Path,
    ) -> SKResult<VerificationResult> {
        let path = self.prepare(task, dir)?;
        self.run_artifact(task, &path).await
    }

    pub async fn run_artifact(
        &self,
        task: &VerificationTask,
        artifact: &Path,
    ) -> SKResult<VerificationResult> {
        let exe = self.settings.resolve()?;
        let script = Self::command_script(task.strategy, task.bound);
        debug!(
            task = %task.name,
            strategy = %task.strategy,
            bound = task.bound,
            engine = %exe.display(),
            "starting engine"
        );

        let start = Instant::now();
        let mut child = Command::new(&exe)
            .arg("-int")
            .arg(artifact)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    SKError::EngineUnavailable(format!("{}: {e}", exe.display()))
                }
                _ => SKError::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // an engine that exits early closes its end first
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let timeout = self.settings.timeout();
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(task = %task.name, strategy = %task.strategy, ?timeout, "engine timed out");
                return Err(SKError::Timeout(timeout));
            }
        };
        let elapsed = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(task = %task.name, "engine stdout:\n{}", stdout);
        if !stderr.trim().is_empty() {
            warn!(task = %task.name, "engine stderr:\n{}", stderr);
        }

        let verdict = interpret(&stdout, &stderr);
        info!(
            task = %task.name,
            strategy = %task.strategy,
            bound = task.bound,
            %verdict,
            elapsed_ms = elapsed.as_millis() as u64,
            "engine finished"
        );

        Ok(VerificationResult {
            task: task.name.clone(),
            strategy: task.strategy,
            bound: task.bound,
            target: task.model.target,
            verdict,
            elapsed,
            cpu_seconds: extract_cpu_seconds(&stdout),
            memory_mb: extract_memory_mb(&stdout),
            stdout,
            stderr,
        })
    }

    /// Like `run_task`, with errors folded into an inconclusive verdict.
    pub async fn verify(&self, task: &VerificationTask, dir: &Path) -> VerificationResult {
        let start = Instant::now();
        match self.run_task(task, dir).await {
            Ok(r) => r,
            Err(e) => self.fold(task, e, start),
        }
    }

    /// Like `run_artifact`, with errors folded into an inconclusive verdict.
    pub async fn verify_artifact(
        &self,
        task: &VerificationTask,
        artifact: &Path,
    ) -> VerificationResult {
        let start = Instant::now();
        match self.run_artifact(task, artifact).await {
            Ok(r) => r,
            Err(e) => self.fold(task, e, start),
        }
    }

    fn fold(&self, task: &VerificationTask, e: SKError, start: Instant) -> VerificationResult {
        warn!(task = %task.name, strategy = %task.strategy, error = %e, "no verdict");
        VerificationResult::failed(task, Inconclusive::from(e), start.elapsed())
    }
}

#[cfg(test)]
mod test_engine {
    use super::*;

    #[test]
    fn script_follows_the_fixed_protocol() {
        assert_eq!(
            NuXmv::command_script(Strategy::Sat, 20),
            "set engine sat\nread_model\nflatten_hierarchy\nencode_variables\n\
             build_boolean_model\nbmc_setup\ncheck_ltlspec_bmc -k 20\nquit\n"
        );
        let bdd = NuXmv::command_script(Strategy::Bdd, 0);
        assert!(bdd.starts_with("set engine bdd\n"));
        assert!(bdd.contains("check_ltlspec_bmc -k 0\n"));
    }
}
