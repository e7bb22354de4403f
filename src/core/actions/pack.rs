//! Produce a clean copy of project source via the package tool's pack step.

use std::path::PathBuf;
use std::sync::Arc;

use crate::action::{Action, ActionOutcome, Purpose};
use crate::error::{Error, Result};
use crate::log_status;
use crate::npm::NpmRunner;
use crate::osutils::OsUtils;

/// Packs a manifest-described project into a source tarball and extracts it
/// into the artifacts directory.
///
/// The pack step applies the manifest's own exclusions (test fixtures,
/// development files), so the extracted tree is the distributable file set.
/// The intermediate archive is written to the scratch directory and left
/// there; cleanup belongs to the caller.
pub struct PackAction {
    artifacts_dir: PathBuf,
    scratch_dir: PathBuf,
    manifest_path: PathBuf,
    osutils: Arc<dyn OsUtils>,
    npm: Arc<dyn NpmRunner>,
}

impl PackAction {
    pub fn new(
        artifacts_dir: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        osutils: Arc<dyn OsUtils>,
        npm: Arc<dyn NpmRunner>,
    ) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            scratch_dir: scratch_dir.into(),
            manifest_path: manifest_path.into(),
            osutils,
            npm,
        }
    }
}

impl Action for PackAction {
    fn name(&self) -> &'static str {
        "NpmPack"
    }

    fn description(&self) -> &'static str {
        "Packaging source with the package tool"
    }

    fn purpose(&self) -> Purpose {
        Purpose::CopySource
    }

    fn execute(&self) -> Result<ActionOutcome> {
        let project_dir = self
            .osutils
            .abspath(&self.osutils.dirname(&self.manifest_path))
            .map_err(|e| Error::action_failed(self.name(), e.message))?;

        // The file: prefix makes the tool treat the argument as a local
        // directory rather than a registry package name.
        let package_ref = format!("file:{}", project_dir.display());

        log_status!(
            "pack",
            "Packaging {} in {}",
            package_ref,
            self.scratch_dir.display()
        );

        let tarball_name = self
            .npm
            .run(&["pack", "-q", &package_ref], &self.scratch_dir)
            .map_err(|e| Error::action_failed(self.name(), e.message))?;

        let tarball_path = self.osutils.joinpath(&self.scratch_dir, &tarball_name);

        log_status!(
            "pack",
            "Extracting {} to {}",
            tarball_path.display(),
            self.artifacts_dir.display()
        );

        self.osutils
            .extract_tarball(&tarball_path, &self.artifacts_dir)
            .map_err(|e| Error::action_failed(self.name(), e.message))?;

        Ok(ActionOutcome::Ran)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::FakeNpm;
    use crate::osutils::StdOsUtils;
    use std::fs::File;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_tarball(path: &Path, files: &[(&str, &str)]) {
        let gz = flate2::write::GzEncoder::new(
            File::create(path).unwrap(),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(gz);
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn packs_into_scratch_and_extracts_into_artifacts() {
        let project = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let artifacts = tempdir().unwrap();

        let manifest = project.path().join("package.json");
        std::fs::write(&manifest, "{\"name\": \"demo\"}").unwrap();

        let tarball = scratch.path().join("demo-0.1.0.tgz");
        write_tarball(
            &tarball,
            &[("package/package.json", "{\"name\": \"demo\"}")],
        );

        let npm = Arc::new(FakeNpm::new().respond_with(Ok("demo-0.1.0.tgz")));
        let action = PackAction::new(
            artifacts.path(),
            scratch.path(),
            &manifest,
            Arc::new(StdOsUtils::new()),
            Arc::clone(&npm) as Arc<dyn crate::npm::NpmRunner>,
        );

        assert_eq!(action.execute().unwrap(), ActionOutcome::Ran);

        // Pack ran in the scratch dir against the project as a local folder.
        let calls = npm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (args, cwd) = &calls[0];
        let expected_ref = format!(
            "file:{}",
            std::path::absolute(project.path()).unwrap().display()
        );
        assert_eq!(args, &vec!["pack".to_string(), "-q".to_string(), expected_ref]);
        assert_eq!(cwd, scratch.path());

        // Extracted tree landed in the artifacts dir; the archive stayed in
        // scratch and never leaked into artifacts.
        assert!(artifacts.path().join("package/package.json").is_file());
        assert!(tarball.is_file());
        assert!(!artifacts.path().join("demo-0.1.0.tgz").exists());
    }

    #[test]
    fn executor_failure_becomes_action_failed_with_same_message() {
        let project = tempdir().unwrap();
        let manifest = project.path().join("package.json");
        std::fs::write(&manifest, "{}").unwrap();

        let npm = Arc::new(FakeNpm::new().respond_with(Err("npm pack failed (exit code 1): EACCES")));
        let action = PackAction::new(
            project.path().join("artifacts"),
            project.path().join("scratch"),
            &manifest,
            Arc::new(StdOsUtils::new()),
            npm,
        );

        let err = action.execute().unwrap_err();
        assert_eq!(err.code.as_str(), "action.failed");
        assert_eq!(err.message, "npm pack failed (exit code 1): EACCES");
        assert_eq!(err.details["action"], "NpmPack");
    }

    #[test]
    fn extraction_failure_becomes_action_failed() {
        let project = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let manifest = project.path().join("package.json");
        std::fs::write(&manifest, "{}").unwrap();

        // npm reports an archive that was never written
        let npm = Arc::new(FakeNpm::new().respond_with(Ok("missing-0.1.0.tgz")));
        let action = PackAction::new(
            project.path().join("artifacts"),
            scratch.path(),
            &manifest,
            Arc::new(StdOsUtils::new()),
            npm,
        );

        let err = action.execute().unwrap_err();
        assert_eq!(err.code.as_str(), "action.failed");
        assert!(err.message.contains("missing-0.1.0.tgz"));
    }
}
