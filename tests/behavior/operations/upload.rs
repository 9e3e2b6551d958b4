use crate::*;
use ctmu::error::{FailureKind, Result};
use ctmu::storage::{Outcome, StorageAdapter, StorageClient};
use libtest_mimic::Trial;
use tokio::fs;

pub fn tests(clients: &TestClients, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        clients,
        test_upload_then_download_is_byte_identical,
        test_upload_overwrites_existing_object,
        test_upload_to_directory_key_appends_file_name,
        test_upload_missing_local_file,
        test_upload_directory_is_rejected,
        test_adapter_upload_reports_s3_location
    ));
}

async fn round_trip(client: &StorageClient) -> Result<()> {
    let local = tempfile::tempdir()?;
    let source = local.path().join("local.txt");
    let content = TEST_FIXTURE.new_content(1..64 * 1024);
    fs::write(&source, &content).await?;

    let key = format!("{}test.bin", TEST_FIXTURE.new_dir_path());
    let uploaded = client.upload(&source, &key).await?;
    assert_eq!(uploaded, key);

    let target = local.path().join("downloaded.bin");
    let bytes = client.download(&key, &target).await?;
    assert_eq!(bytes, content.len() as u64);
    assert_eq!(fs::read(&target).await?, content);
    Ok(())
}

async fn test_upload_then_download_is_byte_identical(clients: TestClients) -> Result<()> {
    round_trip(&clients.object).await?;
    round_trip(&clients.file_sync).await
}

async fn test_upload_overwrites_existing_object(clients: TestClients) -> Result<()> {
    let client = &clients.object;
    let local = tempfile::tempdir()?;
    let source = local.path().join("local.txt");
    let key = format!("{}overwrite.txt", TEST_FIXTURE.new_dir_path());

    fs::write(&source, b"first version").await?;
    client.upload(&source, &key).await?;
    fs::write(&source, b"second").await?;
    client.upload(&source, &key).await?;

    let stored = client.operator().read(&key).await?;
    assert_eq!(stored.to_vec(), b"second".to_vec());
    Ok(())
}

async fn test_upload_to_directory_key_appends_file_name(clients: TestClients) -> Result<()> {
    let client = &clients.file_sync;
    let local = tempfile::tempdir()?;
    let source = local.path().join("notes.txt");
    fs::write(&source, b"hello").await?;

    let dir = TEST_FIXTURE.new_dir_path();
    let uploaded = client.upload(&source, &format!("/{dir}")).await?;
    assert_eq!(uploaded, format!("{dir}notes.txt"));

    let stored = client.operator().read(&uploaded).await?;
    assert_eq!(stored.to_vec(), b"hello".to_vec());
    Ok(())
}

async fn test_upload_missing_local_file(clients: TestClients) -> Result<()> {
    let local = tempfile::tempdir()?;
    let missing = local.path().join("does-not-exist.txt");
    let key = format!("{}missing.txt", TEST_FIXTURE.new_dir_path());

    for client in [&clients.object, &clients.file_sync] {
        let err = client.upload(&missing, &key).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert!(err.to_string().contains("Local file not found"));
    }
    Ok(())
}

async fn test_upload_directory_is_rejected(clients: TestClients) -> Result<()> {
    let local = tempfile::tempdir()?;
    let key = format!("{}dir", TEST_FIXTURE.new_dir_path());

    let err = clients.object.upload(local.path(), &key).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert!(err.to_string().contains("Not a regular file"));
    Ok(())
}

async fn test_adapter_upload_reports_s3_location(clients: TestClients) -> Result<()> {
    let client = &clients.object;
    let adapter = StorageAdapter::with_operator(client.config().clone(), client.operator().clone());

    let local = tempfile::tempdir()?;
    let source = local.path().join("local.txt");
    fs::write(&source, b"Hello from ctmu").await?;

    let key = format!("{}test.txt", TEST_FIXTURE.new_dir_path());
    let outcome = adapter.upload(&source, &key).await;
    let message = match outcome {
        Outcome::Success(message) => message,
        Outcome::Failure(failure) => panic!("upload failed: {failure}"),
    };
    assert!(message.starts_with("Uploaded "));
    assert!(message.contains(&client.location(&key)));
    assert!(client.location(&key).starts_with("s3://"));
    Ok(())
}
