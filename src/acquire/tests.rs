use super::*;

use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

use crate::aws::{AwsCli, CliError};

mod target_tests {
    use super::*;

    #[test]
    fn test_parse_s3_uri() {
        let target = TargetRef::parse("s3://letters/human-resources/page1.png").unwrap();
        assert_eq!(target.key(), "human-resources/page1.png");
        assert_eq!(target.file_name(), "page1.png");
        assert_eq!(target.reference(), "s3://letters/human-resources/page1.png");
    }

    #[test]
    fn test_parse_object_at_bucket_root() {
        let target = TargetRef::parse("s3://letters/page1.jpg").unwrap();
        assert_eq!(target.key(), "page1.jpg");
        assert_eq!(target.file_name(), "page1.jpg");
    }

    #[test]
    fn test_parse_bare_key() {
        let target = TargetRef::parse("scans/2024/page.png").unwrap();
        assert_eq!(target.key(), "scans/2024/page.png");
        assert_eq!(target.file_name(), "page.png");
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(matches!(
            TargetRef::parse("s3://letters"),
            Err(AcquireError::InvalidReference { .. })
        ));
        assert!(matches!(
            TargetRef::parse(""),
            Err(AcquireError::InvalidReference { .. })
        ));
        assert!(matches!(
            TargetRef::parse("s3://letters/folder/"),
            Err(AcquireError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_local_path_uses_file_name() {
        let target = TargetRef::parse("s3://letters/a/b/page.png").unwrap();
        assert_eq!(
            target.local_path(Path::new("/tmp/sigdetect")),
            PathBuf::from("/tmp/sigdetect/page.png")
        );
    }
}

mod local_tests {
    use super::*;

    #[tokio::test]
    async fn test_copies_into_scratch_dir() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("hr")).unwrap();
        std::fs::write(root.path().join("hr/page.png"), b"png-bytes").unwrap();

        let acquirer = LocalAcquirer::new(root.path());
        let target = TargetRef::parse("s3://letters/hr/page.png").unwrap();

        let local = acquirer.acquire(&target, scratch.path()).await.unwrap();
        assert_eq!(local, scratch.path().join("page.png"));
        assert_eq!(std::fs::read(&local).unwrap(), b"png-bytes");

        let again = acquirer.acquire(&target, scratch.path()).await.unwrap();
        assert_eq!(again, local);
        assert_eq!(std::fs::read(&again).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_creates_missing_scratch_dir() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        std::fs::write(root.path().join("page.jpg"), b"jpg").unwrap();

        let nested = scratch.path().join("nested/scratch");
        let acquirer = LocalAcquirer::new(root.path());
        let target = TargetRef::parse("page.jpg").unwrap();

        let local = acquirer.acquire(&target, &nested).await.unwrap();
        assert!(local.exists());
    }

    #[tokio::test]
    async fn test_missing_object() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();

        let acquirer = LocalAcquirer::new(root.path());
        let target = TargetRef::parse("s3://letters/missing.png").unwrap();

        let result = acquirer.acquire(&target, scratch.path()).await;
        assert!(matches!(result, Err(AcquireError::NotFound { key }) if key == "missing.png"));
    }

    #[tokio::test]
    async fn test_key_escaping_root_rejected() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();

        let acquirer = LocalAcquirer::new(root.path());
        let target = TargetRef::parse("../etc/passwd.png").unwrap();

        let result = acquirer.acquire(&target, scratch.path()).await;
        assert!(matches!(result, Err(AcquireError::KeyOutsideRoot { .. })));
    }
}

mod s3_tests {
    use super::*;

    #[cfg(unix)]
    fn fake_aws(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("aws");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_bucket_from_config() {
        let acquirer = S3Acquirer::new("working-letters");
        assert_eq!(acquirer.bucket(), "working-letters");
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_download_passes_uri_and_dest() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        // args: s3 cp <uri> <dest> --only-show-errors
        let aws = fake_aws(bin.path(), r#"printf '%s' "$3" > "$4""#);

        let acquirer = S3Acquirer::new("working-letters").with_cli(AwsCli::new().with_program(aws));
        let target = TargetRef::parse("s3://other-bucket/hr/page1.png").unwrap();

        let local = acquirer.acquire(&target, scratch.path()).await.unwrap();
        assert_eq!(local, scratch.path().join("page1.png"));
        assert_eq!(
            std::fs::read_to_string(&local).unwrap(),
            "s3://working-letters/hr/page1.png"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_cli_failure_is_acquire_error() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let aws = fake_aws(bin.path(), "echo 'An error occurred (404)' >&2; exit 1");

        let acquirer = S3Acquirer::new("letters").with_cli(AwsCli::new().with_program(aws));
        let target = TargetRef::parse("s3://letters/page.png").unwrap();

        let result = acquirer.acquire(&target, scratch.path()).await;
        match result {
            Err(AcquireError::Cli(CliError::Failed { stderr, .. })) => {
                assert!(stderr.contains("404"));
            }
            other => panic!("expected CLI failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_cli_timeout() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let aws = fake_aws(bin.path(), "sleep 5");

        let cli = AwsCli::new()
            .with_program(aws)
            .with_timeout(Duration::from_millis(100));
        let acquirer = S3Acquirer::new("letters").with_cli(cli);
        let target = TargetRef::parse("s3://letters/page.png").unwrap();

        let result = acquirer.acquire(&target, scratch.path()).await;
        assert!(matches!(
            result,
            Err(AcquireError::Cli(CliError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_cli_binary() {
        let scratch = TempDir::new().unwrap();
        let cli = AwsCli::new().with_program("/nonexistent/bin/aws");
        let acquirer = S3Acquirer::new("letters").with_cli(cli);
        let target = TargetRef::parse("s3://letters/page.png").unwrap();

        let result = acquirer.acquire(&target, scratch.path()).await;
        assert!(matches!(
            result,
            Err(AcquireError::Cli(CliError::Spawn { .. }))
        ));
    }
}
