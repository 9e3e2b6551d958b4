use crate::*;
use ctmu::error::{FailureKind, Result};
use ctmu::storage::{EntryKind, StorageAdapter};
use libtest_mimic::Trial;
use uuid::Uuid;

pub fn tests(clients: &TestClients, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        clients,
        test_list_object_prefix_without_matches_is_empty,
        test_list_object_prefix_is_flat,
        test_list_file_sync_children,
        test_list_file_sync_missing_directory,
        test_list_file_sync_file_path,
        test_adapter_list_serializes_entries,
        test_list_reports_file_timestamps
    ));
}

async fn test_list_object_prefix_without_matches_is_empty(clients: TestClients) -> Result<()> {
    let prefix = format!("{}/nothing-here/", Uuid::new_v4());
    let entries = clients.object.list(&prefix).await?;
    assert!(entries.is_empty(), "unexpected entries: {entries:?}");
    Ok(())
}

async fn test_list_object_prefix_is_flat(clients: TestClients) -> Result<()> {
    let client = &clients.object;
    let prefix = TEST_FIXTURE.new_dir_path();
    client
        .operator()
        .write(&format!("{prefix}a.txt"), vec![1u8; 100])
        .await?;
    client
        .operator()
        .write(&format!("{prefix}sub/b.txt"), vec![2u8; 200])
        .await?;

    let mut entries = client.list(&prefix).await?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "sub/b.txt"]);
    assert!(entries.iter().all(|e| e.kind == EntryKind::File));
    assert_eq!(entries[0].size, 100);
    assert_eq!(entries[1].size, 200);
    assert_eq!(entries[1].path, format!("{prefix}sub/b.txt"));
    Ok(())
}

async fn test_list_file_sync_children(clients: TestClients) -> Result<()> {
    let client = &clients.file_sync;
    let dir = TEST_FIXTURE.new_dir_path();
    client.operator().create_dir(&dir).await?;
    client
        .operator()
        .write(&format!("{dir}file1.txt"), vec![0u8; 100])
        .await?;
    client
        .operator()
        .create_dir(&format!("{dir}folder1/"))
        .await?;
    client
        .operator()
        .write(&format!("{dir}folder1/deeper.txt"), vec![0u8; 10])
        .await?;

    let entries = client.list(&format!("/{dir}")).await?;
    assert_eq!(entries.len(), 2, "unexpected entries: {entries:?}");

    let file = entries
        .iter()
        .find(|e| e.kind == EntryKind::File)
        .expect("file entry");
    assert_eq!(file.name, "file1.txt");
    assert_eq!(file.size, 100);

    let folder = entries
        .iter()
        .find(|e| e.kind == EntryKind::Directory)
        .expect("directory entry");
    assert_eq!(folder.name, "folder1");
    assert!(folder.is_dir());
    Ok(())
}

async fn test_list_file_sync_missing_directory(clients: TestClients) -> Result<()> {
    let missing = format!("/{}/non_existent_dir/", Uuid::new_v4());
    let err = clients.file_sync.list(&missing).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::RemoteNotFound);
    Ok(())
}

async fn test_list_file_sync_file_path(clients: TestClients) -> Result<()> {
    let client = &clients.file_sync;
    let path = format!("{}single.txt", TEST_FIXTURE.new_dir_path());
    client.operator().write(&path, vec![7u8; 42]).await?;

    let entries = client.list(&path).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "single.txt");
    assert_eq!(entries[0].size, 42);
    Ok(())
}

async fn test_adapter_list_serializes_entries(clients: TestClients) -> Result<()> {
    let client = &clients.object;
    let prefix = TEST_FIXTURE.new_dir_path();
    client
        .operator()
        .write(&format!("{prefix}only.txt"), b"abc".to_vec())
        .await?;

    let adapter = StorageAdapter::with_operator(client.config().clone(), client.operator().clone());
    let outcome = adapter.list(&prefix).await;
    let json = serde_json::to_value(&outcome).map_err(std::io::Error::other)?;

    assert_eq!(json["ok"], true);
    assert_eq!(json["data"][0]["name"], "only.txt");
    assert_eq!(json["data"][0]["kind"], "File");
    assert_eq!(json["data"][0]["size"], 3);
    Ok(())
}

async fn test_list_reports_file_timestamps(clients: TestClients) -> Result<()> {
    for client in [&clients.object, &clients.file_sync] {
        let dir = TEST_FIXTURE.new_dir_path();
        client.operator().create_dir(&dir).await?;
        client
            .operator()
            .write(&format!("{dir}stamped.txt"), vec![5u8; 64])
            .await?;

        let entries = client.list(&dir).await?;
        let file = entries
            .iter()
            .find(|e| e.name == "stamped.txt")
            .expect("file entry");
        assert_eq!(file.size, 64);
        assert!(file.last_modified.is_some(), "missing mtime: {file:?}");
    }
    Ok(())
}
