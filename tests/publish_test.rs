// tests/publish_test.rs
//
// End-to-end workflow runs against the mock host, through the public API.
use release_bump::config::{FileConfig, Inputs};
use release_bump::github::mock::{HostCall, MOCK_CREATED_RELEASE_ID};
use release_bump::github::{MockHost, Release};
use release_bump::publish::{self, PublishAction};
use release_bump::version::Version;
use std::io::Write;

const HEAD_SHA: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

fn artifact_named(name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"binary payload").unwrap();
    (dir, path)
}

fn inputs_for(path: &std::path::Path, version_type: &str) -> Inputs {
    Inputs::resolve(
        version_type,
        path.to_str().unwrap(),
        Some("v1.0.0"),
        Some("octo/widget"),
        Some("secret".to_string()),
        &FileConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_failed_lookup_degrades_to_base_and_creates() {
    let (_dir, path) = artifact_named("app.tar.gz");
    let inputs = inputs_for(&path, "major");
    let host = MockHost::failing_latest();

    let outcome = publish::run(&host, &inputs, HEAD_SHA).await.unwrap();

    // Lookup failure is recoverable: the run degrades to the base version
    // and still performs the create+upload sequence.
    assert_eq!(outcome.previous, Version::new(1, 0, 0));
    assert_eq!(outcome.version, Version::new(2, 0, 0));
    assert_eq!(host.calls().len(), 2);
}

#[tokio::test]
async fn test_asset_is_attached_under_its_base_file_name() {
    let (_dir, path) = artifact_named("widget-linux-x86_64.tar.gz");
    let inputs = inputs_for(&path, "patch");
    let host = MockHost::new();

    let outcome = publish::run(&host, &inputs, HEAD_SHA).await.unwrap();

    match outcome.action {
        PublishAction::Created { release_id, asset } => {
            assert_eq!(release_id, MOCK_CREATED_RELEASE_ID);
            // Base file name only, no directory components.
            assert_eq!(asset, "widget-linux-x86_64.tar.gz");
        }
        other => panic!("expected create path, got {:?}", other),
    }

    assert_eq!(
        host.calls()[1],
        HostCall::UploadAsset {
            release_id: MOCK_CREATED_RELEASE_ID,
            file_name: "widget-linux-x86_64.tar.gz".to_string(),
            size: b"binary payload".len(),
        }
    );
}

#[tokio::test]
async fn test_update_path_renames_tag_and_display_name_together() {
    let (_dir, path) = artifact_named("app.tar.gz");
    let inputs = inputs_for(&path, "minor");
    let host = MockHost::with_latest_release(Release {
        id: 321,
        tag_name: "v4.7.2".to_string(),
        name: Some("v4.7.2".to_string()),
        target_commitish: HEAD_SHA.to_string(),
    });

    let outcome = publish::run(&host, &inputs, HEAD_SHA).await.unwrap();

    assert_eq!(outcome.version, Version::new(4, 8, 0));
    assert_eq!(
        host.calls(),
        vec![HostCall::UpdateRelease {
            release_id: 321,
            tag_name: "v4.8.0".to_string(),
            name: "v4.8.0".to_string(),
        }]
    );
}
